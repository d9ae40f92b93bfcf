// --- Arena ---
pub const SCREEN_WIDTH: f64 = 1200.0;
pub const SCREEN_HEIGHT: f64 = 800.0;

// --- Player ---
pub const STARTING_LIVES: u32 = 3;
pub const MAX_SPACESHIP_SPEED: f64 = 400.0; // px/s
pub const SPACESHIP_ACCELERATION: f64 = 300.0; // px/s^2
pub const SPACESHIP_ROTATION_SPEED: f64 = 200.0; // deg/s
pub const SPACESHIP_DRAG: f64 = 0.99; // applied once per frame
pub const SPACESHIP_SIZE: f64 = 15.0;
pub const INVULNERABILITY_SECONDS: f64 = 3.0;
pub const SHIELD_SECONDS: f64 = 8.0;
pub const MUZZLE_OFFSET: f64 = 20.0;

// --- Projectiles ---
pub const PROJECTILE_SPEED: f64 = 500.0;
pub const PROJECTILE_LIFETIME: f64 = 2.0; // seconds
pub const PROJECTILE_RADIUS: f64 = 2.0;
pub const MAX_PROJECTILES: usize = 10;
pub const FIRE_COOLDOWN: f64 = 0.2;
pub const RAPID_FIRE_COOLDOWN: f64 = 0.05;
pub const RAPID_FIRE_SHOTS: u32 = 50;

// --- Asteroids ---
pub const MAX_ASTEROIDS: usize = 20;
pub const ASTEROID_MIN_SPEED: f64 = 50.0;
pub const ASTEROID_MAX_SPEED: f64 = 150.0;
pub const ASTEROID_MAX_SPIN: f64 = 5.0; // deg/s, either direction
pub const ASTEROID_PALETTE_SIZE: u8 = 6;
pub const LARGE_ASTEROID_RADIUS: f64 = 50.0;
pub const MEDIUM_ASTEROID_RADIUS: f64 = 30.0;
pub const SMALL_ASTEROID_RADIUS: f64 = 15.0;
pub const LARGE_ASTEROID_POINTS: u32 = 20;
pub const MEDIUM_ASTEROID_POINTS: u32 = 50;
pub const SMALL_ASTEROID_POINTS: u32 = 100;
pub const LARGE_FRAGMENT_OFFSET: f64 = 20.0;
pub const MEDIUM_FRAGMENT_OFFSET: f64 = 15.0;
pub const INITIAL_WAVE_SIZE: usize = 4;
pub const EDGE_SPAWN_MARGIN: f64 = 50.0;
pub const ASTEROID_TRICKLE_INTERVAL: f64 = 10.0; // seconds between edge spawns

// --- Power-ups ---
pub const MAX_POWERUPS: usize = 10;
pub const POWERUP_LIFETIME: f64 = 10.0;
pub const POWERUP_RADIUS: f64 = 20.0;
pub const POWERUP_DROP_CHANCE: f64 = 0.2; // Large asteroids only
pub const POWERUP_SPAWN_INTERVAL: f64 = 15.0;
pub const POWERUP_SPAWN_EDGE_MARGIN: f64 = 100.0;

// --- Scoring ---
pub const POINTS_PER_LEVEL: u32 = 1000;
pub const POINTS_PER_DIFFICULTY_STEP: f64 = 5000.0;
pub const MAX_DIFFICULTY_MULTIPLIER: f64 = 3.0;
pub const MAX_HIGHSCORES: usize = 10;
pub const HIGHSCORE_NAME_LEN: usize = 5;

// --- Screens ---
pub const STATE_TRANSITION_SECONDS: f64 = 0.1;
pub const MENU_ENTRIES: usize = 5;
pub const TARGET_FPS: u64 = 60;
