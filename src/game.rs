use crate::collision::{CollisionReport, CollisionSystem};
use crate::config::GameConfig;
use crate::entities::AsteroidSize;
use crate::highscores::HighscoreTable;
use crate::input::FrameInput;
use crate::inventory::Inventory;
use crate::objects::ObjectManager;
use crate::score::{KeyValueStore, Score};
use crate::ship::Spaceship;
use crate::state::{Action, GameState, StateManager};
use log::{info, warn};
use rand::rngs::StdRng;

/// One session: the ship, every other entity, score keeping and the screen
/// flow. `update` runs exactly one frame.
pub struct Game<S: KeyValueStore> {
    config: GameConfig,
    player: Spaceship,
    objects: ObjectManager,
    score: Score,
    inventory: Inventory,
    highscores: HighscoreTable,
    states: StateManager,
    store: S,
    rng: StdRng,
    asteroid_timer: f64,
    running: bool,
    last_report: CollisionReport,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(config: GameConfig, store: S, highscores: HighscoreTable, rng: StdRng) -> Self {
        let arena = config.arena();
        let score = Score::load(&store);
        info!("Starting session, high score {}", score.high());
        Game {
            player: Spaceship::new(arena, config.player.starting_lives),
            objects: ObjectManager::new(arena, &config.objects),
            inventory: Inventory::new(&config.rules),
            score,
            highscores,
            states: StateManager::new(),
            store,
            rng,
            asteroid_timer: 0.0,
            running: true,
            last_report: CollisionReport::default(),
            config,
        }
    }

    /// Input, then navigation, then (while playing) physics, collisions,
    /// spawning and the game-over check.
    pub fn update(&mut self, dt: f64, input: &FrameInput) {
        let action = self.states.handle_input(input);
        self.apply(action);
        if !self.running {
            return;
        }

        if self.states.current().is_playing() {
            self.handle_flight_input(dt, input);
        }
        self.states.update(dt);

        if self.states.current().is_playing() {
            self.update_in_game(dt);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::StartGame => {
                self.reset_game();
                self.states.set_state(GameState::Playing);
            }
            Action::Quit => {
                info!("Quit requested");
                self.running = false;
            }
            Action::SubmitName { name, score } => {
                info!("New highscore {} by {}", score, name);
                if let Err(e) = self.highscores.add(name, score) {
                    warn!("Could not save highscores: {e}");
                }
            }
        }
    }

    fn handle_flight_input(&mut self, dt: f64, input: &FrameInput) {
        if input.thrust {
            self.player.start_thrust();
            self.player.apply_thrust(dt);
        } else {
            self.player.stop_thrust();
        }
        if input.rotate_left {
            self.player.rotate(-1.0, dt);
        }
        if input.rotate_right {
            self.player.rotate(1.0, dt);
        }
        if input.fire {
            self.inventory.try_fire(&self.player, &mut self.objects);
        }
        if input.use_item {
            self.inventory.use_item(&mut self.player);
        }
    }

    fn update_in_game(&mut self, dt: f64) {
        self.player.update(dt);
        self.objects.update_objects(dt, &mut self.rng);
        self.inventory.tick(dt);
        self.asteroid_timer += dt;

        let has_shield = self.player.is_shield_active();
        let is_invulnerable = self.player.is_invulnerable();
        self.last_report = CollisionSystem::new(
            &mut self.objects,
            &mut self.score,
            self.config.rules.powerup_drop_chance,
        )
        .check_collisions(
            &mut self.player,
            &mut self.inventory,
            has_shield,
            is_invulnerable,
            &mut self.rng,
        );

        self.handle_spawning();
        self.check_game_state();
    }

    fn handle_spawning(&mut self) {
        if self.asteroid_timer > self.config.rules.asteroid_trickle_interval {
            let position = self.objects.random_edge_position(&mut self.rng);
            let difficulty = self.score.difficulty_multiplier();
            self.objects
                .spawn_asteroid(position, AsteroidSize::Large, difficulty, &mut self.rng);
            self.asteroid_timer = 0.0;
        }
    }

    fn check_game_state(&mut self) {
        if !self.objects.has_active_asteroids() {
            let count = self.config.objects.initial_wave + self.score.level() as usize;
            info!("Wave cleared, spawning {} asteroids", count);
            self.objects
                .spawn_asteroids(count, self.score.difficulty_multiplier(), &mut self.rng);
        }

        if self.player.lives() == 0 {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        let final_score = self.score.current();
        info!("Game over, final score {}", final_score);
        self.save_high_score();
        if self.highscores.is_new_highscore(final_score) {
            self.states.begin_name_entry(final_score);
        } else {
            self.states.set_state(GameState::GameOver);
        }
    }

    pub fn reset_game(&mut self) {
        info!("Resetting game");
        self.score.reset();
        self.player = Spaceship::new(self.config.arena(), self.config.player.starting_lives);
        self.objects.reset_objects();
        self.inventory.reset();
        self.asteroid_timer = 0.0;
        self.last_report = CollisionReport::default();
        self.objects.spawn_asteroids(
            self.config.objects.initial_wave,
            self.score.difficulty_multiplier(),
            &mut self.rng,
        );
    }

    fn save_high_score(&mut self) {
        if let Err(e) = self.score.save_high_score(&mut self.store) {
            warn!("Could not save high score: {e}");
        }
    }

    /// Persists what has to outlive the process.
    pub fn shutdown(&mut self) {
        self.save_high_score();
        info!("Session closed, high score {}", self.score.high());
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> GameState {
        self.states.current()
    }

    pub fn states(&self) -> &StateManager {
        &self.states
    }

    pub fn player(&self) -> &Spaceship {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Spaceship {
        &mut self.player
    }

    pub fn objects(&self) -> &ObjectManager {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectManager {
        &mut self.objects
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn highscores(&self) -> &HighscoreTable {
        &self.highscores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seconds since the last trickle asteroid.
    pub fn asteroid_timer(&self) -> f64 {
        self.asteroid_timer
    }

    pub fn last_report(&self) -> &CollisionReport {
        &self.last_report
    }
}
