//! Per-frame overlap resolution between the ship, projectiles, asteroids and
//! power-ups. Every test is a circle test on position and radius.

use crate::entities::AsteroidSize;
use crate::inventory::Inventory;
use crate::objects::ObjectManager;
use crate::powerups::PowerUpKind;
use crate::score::Score;
use crate::ship::Spaceship;
use crate::types::{Vector2D, circles_overlap};
use log::info;
use rand::Rng;

/// What one collision pass changed, for the frame loop and the log.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollisionReport {
    pub asteroids_destroyed: u32,
    pub points_awarded: u32,
    pub powerups_dropped: u32,
    pub shield_absorbed: bool,
    pub life_lost: bool,
    pub collected: Vec<PowerUpKind>,
}

/// Borrows the object collections and the score for one pass. Owns nothing.
pub struct CollisionSystem<'a> {
    objects: &'a mut ObjectManager,
    score: &'a mut Score,
    powerup_drop_chance: f64,
}

impl<'a> CollisionSystem<'a> {
    pub fn new(
        objects: &'a mut ObjectManager,
        score: &'a mut Score,
        powerup_drop_chance: f64,
    ) -> Self {
        CollisionSystem {
            objects,
            score,
            powerup_drop_chance,
        }
    }

    pub fn check_collisions(
        &mut self,
        player: &mut Spaceship,
        inventory: &mut Inventory,
        has_shield: bool,
        is_invulnerable: bool,
        rng: &mut impl Rng,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();
        self.check_projectile_asteroid_collisions(rng, &mut report);
        self.check_player_asteroid_collisions(player, has_shield, is_invulnerable, &mut report);
        self.check_player_powerup_collisions(player, inventory, &mut report);
        report
    }

    /// Each projectile destroys at most one asteroid per pass; every
    /// projectile gets its own chance, so simultaneous hits all count.
    pub fn check_projectile_asteroid_collisions(
        &mut self,
        rng: &mut impl Rng,
        report: &mut CollisionReport,
    ) {
        for p in 0..self.objects.projectiles().len() {
            let Some(projectile) = self.objects.projectiles().get(p) else {
                continue;
            };
            if !projectile.is_active() {
                continue;
            }
            let (shot_at, shot_radius) = (projectile.position, projectile.radius());

            let hit = self.objects.asteroids().iter().position(|asteroid| {
                asteroid.is_active()
                    && circles_overlap(shot_at, shot_radius, asteroid.position, asteroid.radius())
            });
            let Some(a) = hit else {
                continue;
            };

            if let Some(projectile) = self.objects.projectiles_mut().get_mut(p) {
                projectile.deactivate();
            }
            if let Some(asteroid) = self.objects.asteroids_mut().get_mut(a) {
                let (position, size, points) =
                    (asteroid.position, asteroid.size, asteroid.points());
                asteroid.destroy();
                self.resolve_asteroid_hit(position, size, points, rng, report);
            }
        }
    }

    fn resolve_asteroid_hit(
        &mut self,
        position: Vector2D,
        size: AsteroidSize,
        points: u32,
        rng: &mut impl Rng,
        report: &mut CollisionReport,
    ) {
        self.score.add_points(points);
        report.asteroids_destroyed += 1;
        report.points_awarded += points;
        info!("{:?} asteroid destroyed (+{}), score {}", size, points, self.score.current());

        if let Some((child, offset)) = size.fragments() {
            let difficulty = self.score.difficulty_multiplier();
            for sign in [1.0, -1.0] {
                let at = Vector2D::new(position.x + sign * offset, position.y + sign * offset);
                self.objects.spawn_asteroid(at, child, difficulty, rng);
            }
        }

        if size == AsteroidSize::Large && rng.gen_range(0.0..1.0) < self.powerup_drop_chance {
            self.objects.spawn_powerup(position, None, rng);
            report.powerups_dropped += 1;
        }
    }

    /// Skipped entirely while invulnerable: the asteroid is left alone too.
    pub fn check_player_asteroid_collisions(
        &mut self,
        player: &mut Spaceship,
        has_shield: bool,
        is_invulnerable: bool,
        report: &mut CollisionReport,
    ) {
        if is_invulnerable {
            return;
        }
        let (ship_at, ship_radius) = (player.position, player.hit_radius());
        let hit = self.objects.asteroids_mut().iter_mut().find(|asteroid| {
            asteroid.is_active()
                && circles_overlap(ship_at, ship_radius, asteroid.position, asteroid.radius())
        });
        let Some(asteroid) = hit else {
            return;
        };
        asteroid.destroy();

        if has_shield {
            player.deactivate_shield();
            report.shield_absorbed = true;
            info!("Shield absorbed an asteroid hit");
        } else {
            player.lose_life();
            report.life_lost = true;
        }
    }

    /// Extra lives apply on contact; other kinds go to the held-item slot.
    pub fn check_player_powerup_collisions(
        &mut self,
        player: &mut Spaceship,
        inventory: &mut Inventory,
        report: &mut CollisionReport,
    ) {
        let (ship_at, ship_radius) = (player.position, player.hit_radius());
        for power_up in self.objects.powerups_mut().iter_mut() {
            if !power_up.is_active()
                || !circles_overlap(ship_at, ship_radius, power_up.position, power_up.radius())
            {
                continue;
            }
            power_up.collect();
            report.collected.push(power_up.kind);
            if power_up.kind.applies_on_pickup() {
                player.add_life();
                info!("Extra life collected, lives {}", player.lives());
            } else {
                inventory.stage(power_up.kind);
            }
        }
    }
}
