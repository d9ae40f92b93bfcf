use asteroid_arcade::config::GameConfig;
use asteroid_arcade::entities::AsteroidSize;
use asteroid_arcade::game::Game;
use asteroid_arcade::highscores::HighscoreTable;
use asteroid_arcade::input::FrameInput;
use asteroid_arcade::powerups::PowerUpKind;
use asteroid_arcade::score::{HIGHSCORE_KEY, KeyValueStore, MemoryStore};
use asteroid_arcade::state::GameState;
use asteroid_arcade::types::Vector2D;
use rand::SeedableRng;
use rand::rngs::StdRng;

const DT: f64 = 1.0 / 60.0;

fn new_game(config: GameConfig, table: HighscoreTable) -> Game<MemoryStore> {
    Game::new(config, MemoryStore::default(), table, StdRng::seed_from_u64(11))
}

fn press(f: impl FnOnce(&mut FrameInput)) -> FrameInput {
    let mut input = FrameInput::default();
    f(&mut input);
    input
}

fn idle(game: &mut Game<MemoryStore>, frames: usize) {
    for _ in 0..frames {
        game.update(DT, &FrameInput::default());
    }
}

/// Starts a game and clears the opening wave so tests place their own rocks.
fn start_empty(game: &mut Game<MemoryStore>) {
    game.update(DT, &press(|i| i.confirm = true));
    assert_eq!(game.state(), GameState::Playing);
    game.objects_mut().reset_objects();
}

fn place_still_asteroid(game: &mut Game<MemoryStore>, position: Vector2D, size: AsteroidSize) {
    let mut rng = StdRng::seed_from_u64(5);
    game.objects_mut().spawn_asteroid(position, size, 1.0, &mut rng);
    for asteroid in game.objects_mut().asteroids_mut().iter_mut() {
        if asteroid.is_active() && asteroid.position == position {
            asteroid.velocity = Vector2D::ZERO;
        }
    }
}

#[test]
fn starting_a_game_spawns_the_opening_wave() {
    let mut game = new_game(GameConfig::default(), HighscoreTable::default());
    assert_eq!(game.state(), GameState::MainMenu);

    game.update(DT, &press(|i| i.confirm = true));

    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.objects().asteroids().active_count(), 4);
    assert_eq!(game.player().lives(), 3);
    assert_eq!(game.score().current(), 0);
}

#[test]
fn a_shot_destroys_a_small_asteroid_and_scores() {
    let mut game = new_game(GameConfig::default(), HighscoreTable::default());
    start_empty(&mut game);
    place_still_asteroid(&mut game, Vector2D::new(800.0, 400.0), AsteroidSize::Small);

    game.update(DT, &press(|i| i.fire = true));
    assert_eq!(game.objects().projectiles().active_count(), 1);
    idle(&mut game, 40);

    assert_eq!(game.score().current(), 100);
    assert_eq!(game.objects().projectiles().active_count(), 0);
    // Clearing the field brings the next wave: initial size plus level.
    assert_eq!(game.objects().asteroids().active_count(), 5);
}

#[test]
fn losing_the_last_life_ends_the_game_and_saves() {
    let mut config = GameConfig::default();
    config.player.starting_lives = 1;
    let mut game = new_game(config, HighscoreTable::default());
    start_empty(&mut game);
    let center = game.player().position;
    place_still_asteroid(&mut game, center, AsteroidSize::Small);

    idle(&mut game, 1);

    assert_eq!(game.player().lives(), 0);
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.store().load_u32(HIGHSCORE_KEY).unwrap(), Some(0));

    game.update(DT, &press(|i| i.restart = true));
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.player().lives(), 1);
}

#[test]
fn a_qualifying_score_goes_through_name_entry() {
    let mut config = GameConfig::default();
    config.player.starting_lives = 1;
    let mut game = new_game(config, HighscoreTable::in_memory(Vec::new()));
    start_empty(&mut game);
    let center = game.player().position;
    place_still_asteroid(&mut game, center, AsteroidSize::Small);
    idle(&mut game, 1);
    assert_eq!(game.state(), GameState::NameEntry);

    // Keys still held from play do not type into the name.
    game.update(DT, &press(|i| i.text = vec!['w', 'w']));
    idle(&mut game, 10);
    assert_eq!(game.states().name_entry().name(), "");

    game.update(DT, &press(|i| i.text = vec!['a', 'c', 'e']));
    game.update(DT, &press(|i| i.confirm = true));

    assert_eq!(game.state(), GameState::Highscores);
    let entries = game.highscores().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "ACE__");
    assert_eq!(entries[0].score, 0);
}

#[test]
fn a_collected_shield_absorbs_one_hit() {
    let mut game = new_game(GameConfig::default(), HighscoreTable::default());
    start_empty(&mut game);
    let center = game.player().position;
    let mut rng = StdRng::seed_from_u64(1);
    game.objects_mut().spawn_powerup(center, Some(PowerUpKind::Shield), &mut rng);

    idle(&mut game, 1);
    assert_eq!(game.inventory().held(), Some(PowerUpKind::Shield));

    game.update(DT, &press(|i| i.use_item = true));
    assert!(game.player().is_shield_active());
    assert_eq!(game.inventory().held(), None);

    place_still_asteroid(&mut game, center, AsteroidSize::Small);
    idle(&mut game, 1);

    assert_eq!(game.player().lives(), 3);
    assert!(!game.player().is_shield_active());
    assert!(game.last_report().shield_absorbed);
}

#[test]
fn the_world_freezes_outside_play() {
    let mut game = new_game(GameConfig::default(), HighscoreTable::default());
    game.update(DT, &press(|i| i.confirm = true));
    idle(&mut game, 5);

    game.update(DT, &press(|i| i.menu = true));
    assert_eq!(game.state(), GameState::MainMenu);
    let before: Vec<Vector2D> = game.objects().asteroids().active().map(|a| a.position).collect();
    idle(&mut game, 30);
    let after: Vec<Vector2D> = game.objects().asteroids().active().map(|a| a.position).collect();
    assert_eq!(before, after);
}

#[test]
fn quitting_from_the_menu_stops_the_loop() {
    let mut game = new_game(GameConfig::default(), HighscoreTable::default());
    for _ in 0..4 {
        game.update(DT, &press(|i| i.down = true));
    }
    assert!(game.is_running());
    game.update(DT, &press(|i| i.confirm = true));
    assert!(!game.is_running());
}

#[test]
fn stored_high_score_is_loaded_at_startup() {
    let mut store = MemoryStore::default();
    store.save_u32(HIGHSCORE_KEY, 4321).unwrap();
    let mut game = Game::new(
        GameConfig::default(),
        store,
        HighscoreTable::default(),
        StdRng::seed_from_u64(2),
    );
    assert_eq!(game.score().high(), 4321);
    game.shutdown();
    assert_eq!(game.store().load_u32(HIGHSCORE_KEY).unwrap(), Some(4321));
}

#[test]
fn one_large_asteroid_trickles_in_after_the_interval() {
    let mut config = GameConfig::default();
    config.rules.asteroid_trickle_interval = 0.5;
    let mut game = new_game(config, HighscoreTable::default());
    start_empty(&mut game);
    let keeper = Vector2D::new(100.0, 100.0);
    place_still_asteroid(&mut game, keeper, AsteroidSize::Small);

    idle(&mut game, 25);
    assert_eq!(game.objects().asteroids().active_count(), 1);

    idle(&mut game, 15);
    let arena = game.objects().arena();
    let newcomers: Vec<_> = game
        .objects()
        .asteroids()
        .active()
        .filter(|a| a.position != keeper)
        .collect();
    assert_eq!(newcomers.len(), 1);
    let rock = newcomers[0];
    assert_eq!(rock.size, AsteroidSize::Large);
    // Spawned 50 px outside an edge and only drifted for a few frames.
    let p = rock.position;
    assert!(p.x < 0.0 || p.x > arena.width || p.y < 0.0 || p.y > arena.height, "{p:?}");
    assert!(game.asteroid_timer() < 0.5);
}

#[test]
fn an_unusable_arena_falls_back_instead_of_panicking() {
    let mut config = GameConfig::default();
    config.arena.width = 0.0;
    let mut game = new_game(config, HighscoreTable::default());

    game.update(DT, &press(|i| i.confirm = true));
    idle(&mut game, 5);

    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.objects().arena().width, 1200.0);
    assert_eq!(game.objects().asteroids().active_count(), 4);
}

#[test]
fn quit_stops_the_loop_mid_game() {
    let mut game = new_game(GameConfig::default(), HighscoreTable::default());
    game.update(DT, &press(|i| i.confirm = true));
    assert_eq!(game.state(), GameState::Playing);

    game.update(DT, &press(|i| i.quit = true));
    assert!(!game.is_running());
}
