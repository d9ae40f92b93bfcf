use crate::entities::AsteroidSize;
use crate::game::Game;
use crate::highscores::HighscoreEntry;
use crate::score::KeyValueStore;
use crate::state::{GameState, MenuEntry};
use crate::types::{Arena, Vector2D};
use crossterm::{cursor::MoveTo, execute};
use log::info;
use std::io::{self, Write};

const TITLE_ART: [&str; 5] = [
    r"    _    ____ _____ _____ ____   ___ ___ ____  ",
    r"   / \  / ___|_   _| ____|  _ \ / _ \_ _|  _ \ ",
    r"  / _ \ \___ \ | | |  _| | |_) | | | | || | | |",
    r" / ___ \ ___) || | | |___|  _ <| |_| | || |_| |",
    r"/_/   \_\____/ |_| |_____|_| \_\\___/___|____/ ",
];

const CONTROLS_TEXT: [&str; 9] = [
    "Up / W      : Thrust",
    "Left / A    : Rotate left",
    "Right / D   : Rotate right",
    "Space       : Fire",
    "E           : Use held item",
    "Tab         : Back to menu",
    "R           : Restart after game over",
    "Esc         : Back / quit from the menu",
    "Ctrl-C      : Quit at any time",
];

const CREDITS_TEXT: [&str; 4] = [
    "ASTEROID ARCADE",
    "",
    "Programming, art and sound: the arcade crew",
    "Thanks for playing!",
];

/// Outline glyphs, indexed by an asteroid's palette colour.
const PALETTE_GLYPHS: [char; 6] = ['#', '%', '&', '$', '+', '='];

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row(y).contains(needle))
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.row(y));
        }
        info!("---------------------");
    }
}

// --- OutputTarget: the real terminal or a ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }

    pub fn screen_buffer(&self) -> Option<&ScreenBuffer> {
        match self {
            OutputTarget::ScreenBuffer(sb) => Some(sb),
            OutputTarget::Stdout(_) => None,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                sb.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: one frame of character cells ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clear();
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn get_char(&self, x: u16, y: u16) -> Option<char> {
        self.grid.get(y as usize)?.get(x as usize).copied()
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    pub fn put_centered(&mut self, y: u16, text: &str) {
        let len = text.chars().count() as u16;
        self.put_str(self.width.saturating_sub(len) / 2, y, text);
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    /// Row 0 belongs to the HUD; the arena is scaled onto the rows below it.
    pub fn to_cell(&self, position: Vector2D, arena: Arena) -> Option<(u16, u16)> {
        if self.width == 0 || self.height < 2 {
            return None;
        }
        let field_height = (self.height - 1) as f64;
        let x = (position.x / arena.width * self.width as f64).floor();
        let y = (position.y / arena.height * field_height).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f64 || y >= field_height {
            return None;
        }
        Some((x as u16, y as u16 + 1))
    }

    pub fn plot(&mut self, position: Vector2D, arena: Arena, c: char) {
        if let Some((x, y)) = self.to_cell(position, arena) {
            self.set_char(x, y, c);
        }
    }

    pub fn render(&self, out: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            out.execute_move_to(MoveTo(0, y))?;
            write!(out, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        out.flush()
    }

    pub fn clear_screen_manual(&self, out: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            out.execute_move_to(MoveTo(0, y))?;
            write!(out, "{}", " ".repeat(self.width as usize))?;
        }
        out.execute_move_to(MoveTo(0, 0))?;
        out.flush()
    }
}

/// Arrow for a heading in degrees, 0 pointing right and y growing downwards.
pub fn heading_char(degrees: f64) -> char {
    const ARROWS: [char; 8] = ['>', '\\', 'v', '/', '<', '\\', '^', '/'];
    let octant = ((degrees.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    ARROWS[octant]
}

/// Draws whichever screen the game is on.
pub fn draw<S: KeyValueStore>(grid: &mut GameGrid, game: &Game<S>) {
    grid.clear();
    match game.state() {
        GameState::MainMenu => draw_main_menu(grid, game),
        GameState::Playing => {
            draw_playfield(grid, game);
            draw_hud(grid, game);
        }
        GameState::Controls => {
            draw_text_screen(grid, "CONTROLS", &CONTROLS_TEXT, "ENTER or ESC to go back")
        }
        GameState::GameOver => draw_game_over(grid, game),
        GameState::NameEntry => draw_name_entry(grid, game),
        GameState::Highscores => draw_highscores(grid, game.highscores().entries()),
        GameState::Credits => {
            draw_text_screen(grid, "CREDITS", &CREDITS_TEXT, "Any key to go back")
        }
    }
}

fn draw_playfield<S: KeyValueStore>(grid: &mut GameGrid, game: &Game<S>) {
    let objects = game.objects();
    let arena = objects.arena();

    for asteroid in objects.asteroids().active() {
        let outline = PALETTE_GLYPHS[asteroid.color_index as usize % PALETTE_GLYPHS.len()];
        for step in 0..8 {
            let direction = Vector2D::from_degrees(asteroid.rotation + step as f64 * 45.0);
            grid.plot(asteroid.position.add(direction.scale(asteroid.radius())), arena, outline);
        }
        let body = match asteroid.size {
            AsteroidSize::Large => '@',
            AsteroidSize::Medium => 'O',
            AsteroidSize::Small => 'o',
        };
        grid.plot(asteroid.position, arena, body);
    }

    for projectile in objects.projectiles().active() {
        let c = match projectile.lifetime {
            t if t > 1.0 => '*',
            t if t > 0.5 => '+',
            _ => '.',
        };
        grid.plot(projectile.position, arena, c);
    }

    for powerup in objects.powerups().active() {
        // Blinks during the last three seconds.
        if powerup.lifetime < 3.0 && (powerup.animation_timer * 6.0) as i64 % 2 == 1 {
            continue;
        }
        if let Some((x, y)) = grid.to_cell(powerup.position, arena) {
            grid.set_char(x.saturating_sub(1), y, '[');
            grid.set_char(x, y, powerup.kind.label().chars().next().unwrap_or('?'));
            grid.set_char(x.saturating_add(1), y, ']');
        }
    }

    let player = game.player();
    if player.is_invulnerable() && (player.invulnerability_time() * 8.0) as i64 % 2 == 1 {
        return;
    }
    if player.is_shield_active() {
        let radius = player.hit_radius() * 1.8;
        let phase = player.shield_animation_time() * 90.0;
        for step in 0..8 {
            let direction = Vector2D::from_degrees(phase + step as f64 * 45.0);
            grid.plot(player.position.add(direction.scale(radius)), arena, ':');
        }
    }
    if player.is_thrusting() {
        let tail = Vector2D::from_degrees(player.rotation).scale(-player.hit_radius() * 1.5);
        grid.plot(player.position.add(tail), arena, '~');
    }
    let [nose, left, right] = player.vertices();
    grid.plot(left, arena, '.');
    grid.plot(right, arena, '.');
    grid.plot(player.position, arena, 'A');
    grid.plot(nose, arena, heading_char(player.rotation));
}

fn draw_hud<S: KeyValueStore>(grid: &mut GameGrid, game: &Game<S>) {
    let score = game.score();
    let player = game.player();
    let inventory = game.inventory();
    let mut hud = format!(
        "SCORE {}  HI {}  LVL {}  LIVES {}  ITEM {}",
        score.current(),
        score.high(),
        score.level(),
        player.lives(),
        inventory.held().map_or("-", |kind| kind.label()),
    );
    if inventory.has_rapid_fire() {
        hud.push_str(&format!("  RAPID {}", inventory.rapid_shots_left()));
    }
    if player.is_shield_active() {
        hud.push_str(&format!("  SHIELD {:.1}s", player.shield_time_remaining()));
    }
    if player.is_invulnerable() {
        hud.push_str(&format!("  SAFE {:.1}s", player.invulnerability_time()));
    }
    grid.put_str(0, 0, &hud);
}

fn draw_main_menu<S: KeyValueStore>(grid: &mut GameGrid, game: &Game<S>) {
    let block = TITLE_ART.len() as u16 + MenuEntry::ALL.len() as u16 + 4;
    let top = grid.height.saturating_sub(block) / 2;
    for (i, line) in TITLE_ART.iter().enumerate() {
        grid.put_centered(top + i as u16, line);
    }

    let selected = game.states().selected_entry();
    let menu_top = top + TITLE_ART.len() as u16 + 2;
    for (i, entry) in MenuEntry::ALL.iter().enumerate() {
        let line = if *entry == selected {
            format!("> {} <", entry.label())
        } else {
            entry.label().to_string()
        };
        grid.put_centered(menu_top + i as u16, &line);
    }
    grid.put_centered(
        grid.height.saturating_sub(1),
        &format!("HIGH SCORE {}", game.score().high()),
    );
}

fn draw_text_screen(grid: &mut GameGrid, title: &str, lines: &[&str], footer: &str) {
    let top = grid.height.saturating_sub(lines.len() as u16 + 4) / 2;
    grid.put_centered(top, title);
    for (i, line) in lines.iter().enumerate() {
        grid.put_centered(top + 2 + i as u16, line);
    }
    grid.put_centered(grid.height.saturating_sub(2), footer);
}

fn draw_game_over<S: KeyValueStore>(grid: &mut GameGrid, game: &Game<S>) {
    let middle = grid.height / 2;
    grid.put_centered(middle.saturating_sub(2), "GAME OVER");
    grid.put_centered(middle, &format!("FINAL SCORE {}", game.score().current()));
    grid.put_centered(middle + 1, &format!("HIGH SCORE {}", game.score().high()));
    grid.put_centered(middle + 3, "R restart   ENTER menu   ESC quit");
}

fn draw_name_entry<S: KeyValueStore>(grid: &mut GameGrid, game: &Game<S>) {
    let entry = game.states().name_entry();
    let middle = grid.height / 2;
    grid.put_centered(middle.saturating_sub(3), "NEW HIGHSCORE!");
    grid.put_centered(middle.saturating_sub(1), &format!("SCORE {}", entry.score()));
    grid.put_centered(middle + 1, &entry.padded());
    grid.put_centered(middle + 3, "ENTER confirm   ESC stay anonymous");
}

fn draw_highscores(grid: &mut GameGrid, entries: &[HighscoreEntry]) {
    let top = grid.height.saturating_sub(entries.len() as u16 + 4) / 2;
    grid.put_centered(top, "HIGHSCORES");
    for (rank, entry) in entries.iter().enumerate() {
        let line = format!("{:>2}. {:<5} {:>7}", rank + 1, entry.name, entry.score);
        grid.put_centered(top + 2 + rank as u16, &line);
    }
    grid.put_centered(grid.height.saturating_sub(2), "ENTER or ESC to go back");
}
