use crate::config::ObjectsConfig;
use crate::entities::{Asteroid, AsteroidSize, Projectile};
use crate::pool::Pool;
use crate::powerups::{PowerUp, PowerUpKind};
use crate::types::{Arena, Vector2D};
use log::debug;
use rand::Rng;

/// Owns every non-player entity. Spawn requests that find no free slot are
/// dropped.
#[derive(Debug)]
pub struct ObjectManager {
    asteroids: Pool<Asteroid>,
    projectiles: Pool<Projectile>,
    powerups: Pool<PowerUp>,
    arena: Arena,
    edge_margin: f64,
    powerup_interval: f64,
    powerup_edge_margin: f64,
    powerup_timer: f64,
}

impl ObjectManager {
    pub fn new(arena: Arena, config: &ObjectsConfig) -> Self {
        ObjectManager {
            asteroids: Pool::with_capacity(config.max_asteroids),
            projectiles: Pool::with_capacity(config.max_projectiles),
            powerups: Pool::with_capacity(config.max_powerups),
            arena,
            edge_margin: config.edge_spawn_margin,
            powerup_interval: config.powerup_spawn_interval,
            powerup_edge_margin: config.powerup_spawn_edge_margin,
            powerup_timer: 0.0,
        }
    }

    pub fn spawn_asteroid(
        &mut self,
        position: Vector2D,
        size: AsteroidSize,
        difficulty: f64,
        rng: &mut impl Rng,
    ) {
        match self.asteroids.acquire() {
            Some(asteroid) => asteroid.spawn(position, size, difficulty, rng),
            None => debug!("Asteroid pool full, dropping {:?} spawn", size),
        }
    }

    /// Large asteroids just outside random screen edges.
    pub fn spawn_asteroids(&mut self, count: usize, difficulty: f64, rng: &mut impl Rng) {
        for _ in 0..count {
            let position = self.random_edge_position(rng);
            self.spawn_asteroid(position, AsteroidSize::Large, difficulty, rng);
        }
    }

    /// Cooldown is the caller's business.
    pub fn fire_projectile(&mut self, position: Vector2D, heading: f64) {
        match self.projectiles.acquire() {
            Some(projectile) => projectile.fire(position, heading),
            None => debug!("Projectile pool full, shot dropped"),
        }
    }

    /// Spawns a power-up of `kind`, or of a uniformly random kind when `None`.
    pub fn spawn_powerup(
        &mut self,
        position: Vector2D,
        kind: Option<PowerUpKind>,
        rng: &mut impl Rng,
    ) {
        let kind = kind.unwrap_or_else(|| PowerUpKind::random(rng));
        match self.powerups.acquire() {
            Some(power_up) => power_up.spawn(position, kind),
            None => debug!("Power-up pool full, dropping {:?}", kind),
        }
    }

    pub fn update_objects(&mut self, dt: f64, rng: &mut impl Rng) {
        let arena = self.arena;
        for asteroid in self.asteroids.iter_mut() {
            asteroid.update(dt, arena);
        }
        for projectile in self.projectiles.iter_mut() {
            projectile.update(dt, arena);
        }
        for power_up in self.powerups.iter_mut() {
            power_up.update(dt);
        }

        if self.powerup_interval > 0.0 {
            self.powerup_timer += dt;
            if self.powerup_timer >= self.powerup_interval {
                self.powerup_timer = 0.0;
                let position = self.random_inner_position(rng);
                self.spawn_powerup(position, None, rng);
            }
        }
    }

    pub fn reset_objects(&mut self) {
        for asteroid in self.asteroids.iter_mut() {
            asteroid.destroy();
        }
        for projectile in self.projectiles.iter_mut() {
            projectile.deactivate();
        }
        for power_up in self.powerups.iter_mut() {
            power_up.collect();
        }
        self.powerup_timer = 0.0;
    }

    /// A point `edge_margin` outside one of the four screen edges.
    pub fn random_edge_position(&self, rng: &mut impl Rng) -> Vector2D {
        let Arena { width, height } = self.arena;
        let margin = self.edge_margin;
        match rng.gen_range(0..4) {
            0 => Vector2D::new(uniform(rng, 0.0, width), -margin),
            1 => Vector2D::new(width + margin, uniform(rng, 0.0, height)),
            2 => Vector2D::new(uniform(rng, 0.0, width), height + margin),
            _ => Vector2D::new(-margin, uniform(rng, 0.0, height)),
        }
    }

    fn random_inner_position(&self, rng: &mut impl Rng) -> Vector2D {
        let Arena { width, height } = self.arena;
        let margin = self
            .powerup_edge_margin
            .min(width / 2.0 - 1.0)
            .min(height / 2.0 - 1.0)
            .max(0.0);
        Vector2D::new(
            uniform(rng, margin, width - margin),
            uniform(rng, margin, height - margin),
        )
    }

    pub fn has_active_asteroids(&self) -> bool {
        self.asteroids.active().next().is_some()
    }

    pub fn asteroids(&self) -> &Pool<Asteroid> {
        &self.asteroids
    }

    pub fn asteroids_mut(&mut self) -> &mut Pool<Asteroid> {
        &mut self.asteroids
    }

    pub fn projectiles(&self) -> &Pool<Projectile> {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut Pool<Projectile> {
        &mut self.projectiles
    }

    pub fn powerups(&self) -> &Pool<PowerUp> {
        &self.powerups
    }

    pub fn powerups_mut(&mut self) -> &mut Pool<PowerUp> {
        &mut self.powerups
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }
}

/// `low` when the range is empty or not a number.
fn uniform(rng: &mut impl Rng, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
