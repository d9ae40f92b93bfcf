use crate::constants::{POWERUP_LIFETIME, POWERUP_RADIUS};
use crate::pool::Poolable;
use crate::types::Vector2D;
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerUpKind {
    #[default]
    ExtraLife,
    RapidFire,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::ExtraLife,
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Whether the pickup takes effect on contact instead of going into the
    /// held-item slot.
    pub fn applies_on_pickup(&self) -> bool {
        matches!(self, PowerUpKind::ExtraLife)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::ExtraLife => "LIFE",
            PowerUpKind::RapidFire => "RAPID",
            PowerUpKind::Shield => "SHIELD",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PowerUp {
    pub position: Vector2D,
    pub kind: PowerUpKind,
    pub lifetime: f64,
    pub animation_timer: f64,
    active: bool,
}

impl PowerUp {
    pub fn spawn(&mut self, position: Vector2D, kind: PowerUpKind) {
        self.position = position;
        self.kind = kind;
        self.lifetime = POWERUP_LIFETIME;
        self.animation_timer = 0.0;
        self.active = true;
    }

    pub fn update(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        self.lifetime -= dt;
        self.animation_timer += dt;
        if self.lifetime <= 0.0 {
            self.active = false;
        }
    }

    pub fn radius(&self) -> f64 {
        POWERUP_RADIUS
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn collect(&mut self) {
        self.active = false;
    }
}

impl Poolable for PowerUp {
    fn is_active(&self) -> bool {
        self.active
    }
}
