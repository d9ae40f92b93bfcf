//! Terminal Asteroids: a ship, pooled asteroids, projectiles and power-ups,
//! a screen flow with persistent high scores, and a crossterm front-end.

pub mod collision;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod inventory;
pub mod objects;
pub mod pool;
pub mod powerups;
pub mod rendering;
pub mod score;
pub mod ship;
pub mod state;
pub mod terminal_io;
pub mod types;

pub use config::GameConfig;
pub use error::GameError;
pub use game::Game;
