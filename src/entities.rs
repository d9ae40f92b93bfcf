use crate::constants::*;
use crate::pool::Poolable;
use crate::types::{Arena, Vector2D, teleport_coordinate};
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AsteroidSize {
    #[default]
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(&self) -> f64 {
        match self {
            AsteroidSize::Large => LARGE_ASTEROID_RADIUS,
            AsteroidSize::Medium => MEDIUM_ASTEROID_RADIUS,
            AsteroidSize::Small => SMALL_ASTEROID_RADIUS,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            AsteroidSize::Large => LARGE_ASTEROID_POINTS,
            AsteroidSize::Medium => MEDIUM_ASTEROID_POINTS,
            AsteroidSize::Small => SMALL_ASTEROID_POINTS,
        }
    }

    /// Size of the two pieces this asteroid breaks into, and how far apart
    /// (per axis) they are placed from the parent's centre.
    pub fn fragments(&self) -> Option<(AsteroidSize, f64)> {
        match self {
            AsteroidSize::Large => Some((AsteroidSize::Medium, LARGE_FRAGMENT_OFFSET)),
            AsteroidSize::Medium => Some((AsteroidSize::Small, MEDIUM_FRAGMENT_OFFSET)),
            AsteroidSize::Small => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Asteroid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub size: AsteroidSize,
    pub rotation: f64, // degrees
    pub rotation_speed: f64,
    pub color_index: u8,
    active: bool,
}

impl Asteroid {
    /// Activates the asteroid with a random heading and spin. Speed is drawn
    /// from the base range and multiplied by `difficulty`.
    pub fn spawn(
        &mut self,
        position: Vector2D,
        size: AsteroidSize,
        difficulty: f64,
        rng: &mut impl Rng,
    ) {
        let speed = rng.gen_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED) * difficulty;
        let heading = rng.gen_range(0.0..360.0);

        self.position = position;
        self.size = size;
        self.velocity = Vector2D::from_degrees(heading).scale(speed);
        self.rotation = 0.0;
        self.rotation_speed = rng.gen_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN);
        self.color_index = rng.gen_range(0..ASTEROID_PALETTE_SIZE);
        self.active = true;
    }

    pub fn update(&mut self, dt: f64, arena: Arena) {
        if !self.active {
            return;
        }
        self.position = self.position.add(self.velocity.scale(dt));
        self.rotation += self.rotation_speed * dt;

        let radius = self.radius();
        self.position.x = teleport_coordinate(self.position.x, arena.width, radius);
        self.position.y = teleport_coordinate(self.position.y, arena.height, radius);
    }

    pub fn radius(&self) -> f64 {
        self.size.radius()
    }

    pub fn points(&self) -> u32 {
        self.size.points()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn destroy(&mut self) {
        self.active = false;
    }
}

impl Poolable for Asteroid {
    fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Clone, Debug, Default)]
pub struct Projectile {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub lifetime: f64, // seconds left
    active: bool,
}

impl Projectile {
    pub fn fire(&mut self, position: Vector2D, heading: f64) {
        self.position = position;
        self.velocity = Vector2D::from_degrees(heading).scale(PROJECTILE_SPEED);
        self.lifetime = PROJECTILE_LIFETIME;
        self.active = true;
    }

    pub fn update(&mut self, dt: f64, arena: Arena) {
        if !self.active {
            return;
        }
        self.position = self.position.add(self.velocity.scale(dt));
        self.lifetime -= dt;

        self.position.x = teleport_coordinate(self.position.x, arena.width, 0.0);
        self.position.y = teleport_coordinate(self.position.y, arena.height, 0.0);

        if self.lifetime <= 0.0 {
            self.active = false;
        }
    }

    pub fn radius(&self) -> f64 {
        PROJECTILE_RADIUS
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Poolable for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }
}
