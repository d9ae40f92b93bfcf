use crate::constants::*;
use crate::types::{Arena, Vector2D, wrap_coordinate};
use log::info;

/// The player's ship. One per session; the game owns it and lends it to the
/// collision pass and the input handling.
#[derive(Clone, Debug)]
pub struct Spaceship {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub rotation: f64, // degrees, 0 = +x
    thrusting: bool,
    lives: u32,
    invulnerable: bool,
    invulnerability_timer: f64,
    shield_active: bool,
    shield_timer: f64,
    shield_animation_timer: f64,
    arena: Arena,
}

impl Spaceship {
    pub fn new(arena: Arena, lives: u32) -> Self {
        let mut ship = Spaceship {
            position: arena.center(),
            velocity: Vector2D::ZERO,
            rotation: 0.0,
            thrusting: false,
            lives,
            invulnerable: false,
            invulnerability_timer: 0.0,
            shield_active: false,
            shield_timer: 0.0,
            shield_animation_timer: 0.0,
            arena,
        };
        ship.reset();
        ship
    }

    /// Back to the spawn pose. Invulnerability is left alone so a respawn
    /// keeps the grace period `lose_life` just granted.
    pub fn reset(&mut self) {
        self.position = self.arena.center();
        self.velocity = Vector2D::ZERO;
        self.rotation = 0.0;
        self.thrusting = false;
        self.shield_active = false;
        self.shield_timer = 0.0;
        self.shield_animation_timer = 0.0;
    }

    pub fn update(&mut self, dt: f64) {
        self.position = self.position.add(self.velocity.scale(dt));
        self.position.x = wrap_coordinate(self.position.x, self.arena.width);
        self.position.y = wrap_coordinate(self.position.y, self.arena.height);

        self.velocity = self.velocity.scale(SPACESHIP_DRAG);

        if self.invulnerable {
            self.invulnerability_timer -= dt;
            if self.invulnerability_timer <= 0.0 {
                self.invulnerable = false;
                self.invulnerability_timer = 0.0;
            }
        }

        if self.shield_active {
            self.shield_timer -= dt;
            self.shield_animation_timer += dt;
            if self.shield_timer <= 0.0 {
                self.deactivate_shield();
            }
        }
    }

    pub fn start_thrust(&mut self) {
        self.thrusting = true;
    }

    pub fn stop_thrust(&mut self) {
        self.thrusting = false;
    }

    pub fn apply_thrust(&mut self, dt: f64) {
        if !self.thrusting {
            return;
        }
        let push = Vector2D::from_degrees(self.rotation).scale(SPACESHIP_ACCELERATION * dt);
        self.velocity = self.velocity.add(push);

        let speed = self.velocity.length();
        if speed > MAX_SPACESHIP_SPEED {
            self.velocity = self.velocity.scale(MAX_SPACESHIP_SPEED / speed);
        }
    }

    /// `direction` is -1.0 (counter-clockwise on screen) or 1.0.
    pub fn rotate(&mut self, direction: f64, dt: f64) {
        self.rotation += direction * SPACESHIP_ROTATION_SPEED * dt;
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        // must precede reset()
        self.invulnerable = true;
        self.invulnerability_timer = INVULNERABILITY_SECONDS;
        self.deactivate_shield();
        self.reset();
        info!("Ship lost a life. Lives left: {}", self.lives);
    }

    pub fn add_life(&mut self) {
        self.lives += 1;
    }

    pub fn activate_shield(&mut self) {
        self.shield_active = true;
        self.shield_timer = SHIELD_SECONDS;
        self.shield_animation_timer = 0.0;
    }

    pub fn deactivate_shield(&mut self) {
        self.shield_active = false;
        self.shield_timer = 0.0;
    }

    /// Where projectiles leave the ship.
    pub fn muzzle(&self) -> Vector2D {
        self.position.add(Vector2D::from_degrees(self.rotation).scale(MUZZLE_OFFSET))
    }

    /// Nose followed by the two rear corners.
    pub fn vertices(&self) -> [Vector2D; 3] {
        [0.0, 120.0, 240.0].map(|offset| {
            self.position
                .add(Vector2D::from_degrees(self.rotation + offset).scale(SPACESHIP_SIZE))
        })
    }

    pub fn hit_radius(&self) -> f64 {
        SPACESHIP_SIZE
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn invulnerability_time(&self) -> f64 {
        self.invulnerability_timer
    }

    pub fn is_shield_active(&self) -> bool {
        self.shield_active
    }

    pub fn shield_time_remaining(&self) -> f64 {
        self.shield_timer
    }

    pub fn shield_animation_time(&self) -> f64 {
        self.shield_animation_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship() -> Spaceship {
        Spaceship::new(Arena::new(SCREEN_WIDTH, SCREEN_HEIGHT), STARTING_LIVES)
    }

    #[test]
    fn spawns_centered_and_vulnerable() {
        let ship = ship();
        assert_eq!(ship.position, Vector2D::new(600.0, 400.0));
        assert_eq!(ship.lives(), STARTING_LIVES);
        assert!(!ship.is_invulnerable());
        assert!(!ship.is_shield_active());
    }

    #[test]
    fn thrust_only_while_flag_set_and_capped() {
        let mut ship = ship();
        ship.apply_thrust(1.0);
        assert_eq!(ship.velocity, Vector2D::ZERO);

        ship.start_thrust();
        for _ in 0..20 {
            ship.apply_thrust(1.0);
        }
        assert!((ship.velocity.length() - MAX_SPACESHIP_SPEED).abs() < 1e-9);
        assert!(ship.velocity.y.abs() < 1e-9);

        ship.stop_thrust();
        let before = ship.velocity;
        ship.apply_thrust(1.0);
        assert_eq!(ship.velocity, before);
    }

    #[test]
    fn update_wraps_and_damps() {
        let mut ship = ship();
        ship.position = Vector2D::new(1195.0, 5.0);
        ship.velocity = Vector2D::new(100.0, -100.0);
        ship.update(0.1);
        assert!((ship.position.x - 5.0).abs() < 1e-9);
        assert!((ship.position.y - 795.0).abs() < 1e-9);
        assert!((ship.velocity.x - 99.0).abs() < 1e-9);
    }

    #[test]
    fn rotate_uses_direction_and_dt() {
        let mut ship = ship();
        ship.rotate(1.0, 0.5);
        assert_eq!(ship.rotation, 100.0);
        ship.rotate(-1.0, 0.25);
        assert_eq!(ship.rotation, 50.0);
    }

    #[test]
    fn losing_a_life_grants_invulnerability_after_reset() {
        let mut ship = ship();
        ship.position = Vector2D::new(10.0, 10.0);
        ship.velocity = Vector2D::new(30.0, 0.0);
        ship.rotation = 45.0;
        ship.activate_shield();

        ship.lose_life();

        assert_eq!(ship.lives(), STARTING_LIVES - 1);
        assert!(ship.is_invulnerable());
        assert_eq!(ship.invulnerability_time(), INVULNERABILITY_SECONDS);
        assert!(!ship.is_shield_active());
        assert_eq!(ship.position, Vector2D::new(600.0, 400.0));
        assert_eq!(ship.velocity, Vector2D::ZERO);
        assert_eq!(ship.rotation, 0.0);
    }

    #[test]
    fn invulnerability_runs_out() {
        let mut ship = ship();
        ship.lose_life();
        ship.update(2.9);
        assert!(ship.is_invulnerable());
        ship.update(0.2);
        assert!(!ship.is_invulnerable());
    }

    #[test]
    fn lives_never_go_negative() {
        let mut ship = Spaceship::new(Arena::new(100.0, 100.0), 1);
        ship.lose_life();
        ship.lose_life();
        assert_eq!(ship.lives(), 0);
    }

    #[test]
    fn second_shield_pickup_restarts_timer() {
        let mut ship = ship();
        ship.activate_shield();
        ship.update(5.0);
        assert!((ship.shield_time_remaining() - 3.0).abs() < 1e-9);
        ship.activate_shield();
        assert_eq!(ship.shield_time_remaining(), SHIELD_SECONDS);
        ship.update(7.9);
        assert!(ship.is_shield_active());
        ship.update(0.2);
        assert!(!ship.is_shield_active());
    }

    #[test]
    fn muzzle_sits_ahead_of_nose() {
        let ship = ship();
        assert!((ship.muzzle().x - 620.0).abs() < 1e-9);
        let nose = ship.vertices()[0];
        assert!((nose.x - 615.0).abs() < 1e-9);
    }
}
