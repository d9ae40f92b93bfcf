//! Screen flow: which screen is showing and how input moves between them.
//! Gameplay input is not handled here, only navigation.

use crate::constants::{HIGHSCORE_NAME_LEN, MENU_ENTRIES, STATE_TRANSITION_SECONDS};
use crate::input::FrameInput;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    Controls,
    GameOver,
    NameEntry,
    Highscores,
    Credits,
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::MainMenu => "Main Menu",
            GameState::Playing => "In Game",
            GameState::Controls => "Controls",
            GameState::GameOver => "Game Over",
            GameState::NameEntry => "Name Entry",
            GameState::Highscores => "Highscores",
            GameState::Credits => "Credits",
        }
    }

    pub fn is_playing(&self) -> bool {
        *self == GameState::Playing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    StartGame,
    Controls,
    Highscores,
    Credits,
    Quit,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; MENU_ENTRIES] = [
        MenuEntry::StartGame,
        MenuEntry::Controls,
        MenuEntry::Highscores,
        MenuEntry::Credits,
        MenuEntry::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::StartGame => "START GAME",
            MenuEntry::Controls => "CONTROLS",
            MenuEntry::Highscores => "HIGHSCORES",
            MenuEntry::Credits => "CREDITS",
            MenuEntry::Quit => "QUIT",
        }
    }
}

/// What the owner of the state manager has to do after navigation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    StartGame,
    Quit,
    SubmitName { name: String, score: u32 },
}

/// Up to five characters from `A-Z`, `0-9` and `_`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    name: String,
    score: u32,
}

impl NameEntry {
    pub const ANONYMOUS: &'static str = "ANON_";

    pub fn new(score: u32) -> Self {
        NameEntry {
            name: String::new(),
            score,
        }
    }

    /// Letters are upper-cased and `-` types `_`; anything else is ignored.
    pub fn push(&mut self, c: char) -> bool {
        if self.name.chars().count() >= HIGHSCORE_NAME_LEN {
            return false;
        }
        let c = match c {
            'a'..='z' => c.to_ascii_uppercase(),
            'A'..='Z' | '0'..='9' | '_' => c,
            '-' => '_',
            _ => return false,
        };
        self.name.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }

    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
    }

    /// The entered name padded with `_` to full length.
    pub fn padded(&self) -> String {
        format!("{:_<width$}", self.name, width = HIGHSCORE_NAME_LEN)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[derive(Debug, Clone, Default)]
pub struct StateManager {
    current: GameState,
    previous: GameState,
    changed: bool,
    transition_time: f64,
    menu_selection: usize,
    name_entry: NameEntry,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_state(&mut self, state: GameState) {
        if state == self.current {
            return;
        }
        info!("State {} -> {}", self.current.name(), state.name());
        self.previous = self.current;
        self.current = state;
        self.changed = true;
        self.transition_time = 0.0;
    }

    pub fn begin_name_entry(&mut self, score: u32) {
        self.name_entry = NameEntry::new(score);
        self.set_state(GameState::NameEntry);
    }

    /// The changed flag stays up for a short transition window.
    pub fn update(&mut self, dt: f64) {
        if self.changed {
            self.transition_time += dt;
            if self.transition_time > STATE_TRANSITION_SECONDS {
                self.changed = false;
            }
        }
    }

    pub fn handle_input(&mut self, input: &FrameInput) -> Action {
        if input.quit {
            return Action::Quit;
        }
        match self.current {
            GameState::MainMenu => self.main_menu_input(input),
            GameState::Playing => {
                if input.menu {
                    self.set_state(GameState::MainMenu);
                }
                Action::None
            }
            GameState::GameOver => {
                if input.restart {
                    Action::StartGame
                } else if input.back {
                    Action::Quit
                } else {
                    if input.confirm {
                        self.set_state(GameState::MainMenu);
                    }
                    Action::None
                }
            }
            GameState::Controls | GameState::Highscores => {
                if input.confirm || input.back {
                    self.set_state(GameState::MainMenu);
                }
                Action::None
            }
            GameState::Credits => {
                if input.confirm || input.back || input.fire || input.backspace {
                    self.set_state(GameState::MainMenu);
                }
                Action::None
            }
            GameState::NameEntry => self.name_entry_input(input),
        }
    }

    fn main_menu_input(&mut self, input: &FrameInput) -> Action {
        if input.up {
            self.menu_selection = (self.menu_selection + MENU_ENTRIES - 1) % MENU_ENTRIES;
        } else if input.down {
            self.menu_selection = (self.menu_selection + 1) % MENU_ENTRIES;
        }

        if input.back {
            return Action::Quit;
        }
        if !input.confirm {
            return Action::None;
        }
        match self.selected_entry() {
            MenuEntry::StartGame => Action::StartGame,
            MenuEntry::Controls => {
                self.set_state(GameState::Controls);
                Action::None
            }
            MenuEntry::Highscores => {
                self.set_state(GameState::Highscores);
                Action::None
            }
            MenuEntry::Credits => {
                self.set_state(GameState::Credits);
                Action::None
            }
            MenuEntry::Quit => Action::Quit,
        }
    }

    /// Keys still held from play (or their repeats) would type into the
    /// name, so input is ignored until the transition window closes.
    fn name_entry_input(&mut self, input: &FrameInput) -> Action {
        if self.changed {
            return Action::None;
        }
        for &c in &input.text {
            self.name_entry.push(c);
        }
        if input.backspace {
            self.name_entry.backspace();
        }

        let name = if input.confirm && self.name_entry.is_complete() {
            self.name_entry.padded()
        } else if input.back {
            NameEntry::ANONYMOUS.to_string()
        } else {
            return Action::None;
        };
        self.name_entry.name = name.clone();
        self.set_state(GameState::Highscores);
        Action::SubmitName {
            name,
            score: self.name_entry.score,
        }
    }

    pub fn current(&self) -> GameState {
        self.current
    }

    pub fn previous(&self) -> GameState {
        self.previous
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    pub fn menu_selection(&self) -> usize {
        self.menu_selection
    }

    pub fn selected_entry(&self) -> MenuEntry {
        MenuEntry::ALL[self.menu_selection % MENU_ENTRIES]
    }

    pub fn name_entry(&self) -> &NameEntry {
        &self.name_entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(f: impl FnOnce(&mut FrameInput)) -> FrameInput {
        let mut input = FrameInput::default();
        f(&mut input);
        input
    }

    #[test]
    fn menu_selection_wraps_both_ways() {
        let mut states = StateManager::new();
        states.handle_input(&press(|i| i.up = true));
        assert_eq!(states.selected_entry(), MenuEntry::Quit);
        states.handle_input(&press(|i| i.down = true));
        assert_eq!(states.selected_entry(), MenuEntry::StartGame);
    }

    #[test]
    fn menu_confirm_dispatches() {
        let mut states = StateManager::new();
        assert_eq!(states.handle_input(&press(|i| i.confirm = true)), Action::StartGame);

        states.handle_input(&press(|i| i.down = true));
        states.handle_input(&press(|i| i.confirm = true));
        assert_eq!(states.current(), GameState::Controls);
        assert_eq!(states.previous(), GameState::MainMenu);

        states.handle_input(&press(|i| i.back = true));
        assert_eq!(states.current(), GameState::MainMenu);
        assert_eq!(states.handle_input(&press(|i| i.back = true)), Action::Quit);
    }

    #[test]
    fn changed_flag_clears_after_transition_window() {
        let mut states = StateManager::new();
        states.set_state(GameState::Credits);
        assert!(states.has_changed());
        states.update(0.05);
        assert!(states.has_changed());
        states.update(0.06);
        assert!(!states.has_changed());
    }

    #[test]
    fn setting_same_state_is_not_a_change() {
        let mut states = StateManager::new();
        states.set_state(GameState::MainMenu);
        assert!(!states.has_changed());
    }

    #[test]
    fn game_over_options() {
        let mut states = StateManager::new();
        states.set_state(GameState::GameOver);
        assert_eq!(states.handle_input(&press(|i| i.restart = true)), Action::StartGame);
        assert_eq!(states.handle_input(&press(|i| i.back = true)), Action::Quit);
        states.handle_input(&press(|i| i.confirm = true));
        assert_eq!(states.current(), GameState::MainMenu);
    }

    #[test]
    fn credits_close_on_space() {
        let mut states = StateManager::new();
        states.set_state(GameState::Credits);
        states.handle_input(&press(|i| i.fire = true));
        assert_eq!(states.current(), GameState::MainMenu);
    }

    #[test]
    fn name_entry_filters_and_caps_input() {
        let mut entry = NameEntry::new(10);
        for c in "ab-!9xyz".chars() {
            entry.push(c);
        }
        assert_eq!(entry.name(), "AB_9X");
        entry.backspace();
        assert_eq!(entry.padded(), "AB_9_");
    }

    #[test]
    fn confirm_needs_a_character() {
        let mut states = StateManager::new();
        states.begin_name_entry(4200);
        states.update(0.2);
        assert_eq!(states.handle_input(&press(|i| i.confirm = true)), Action::None);
        assert_eq!(states.current(), GameState::NameEntry);

        let action = states.handle_input(&press(|i| {
            i.text = vec!['j', 'o'];
            i.confirm = true;
        }));
        assert_eq!(
            action,
            Action::SubmitName {
                name: "JO___".into(),
                score: 4200
            }
        );
        assert_eq!(states.current(), GameState::Highscores);
    }

    #[test]
    fn escape_submits_anonymous() {
        let mut states = StateManager::new();
        states.begin_name_entry(900);
        states.update(0.2);
        let action = states.handle_input(&press(|i| {
            i.text = vec!['Q'];
            i.back = true;
        }));
        assert_eq!(
            action,
            Action::SubmitName {
                name: NameEntry::ANONYMOUS.into(),
                score: 900
            }
        );
    }

    #[test]
    fn name_entry_ignores_keys_during_transition() {
        let mut states = StateManager::new();
        states.begin_name_entry(300);
        let held = press(|i| {
            i.text = vec!['w', 'w'];
            i.confirm = true;
        });
        assert_eq!(states.handle_input(&held), Action::None);
        assert_eq!(states.name_entry().name(), "");

        states.update(0.2);
        states.handle_input(&press(|i| i.text = vec!['z']));
        assert_eq!(states.name_entry().name(), "Z");
    }

    #[test]
    fn quit_works_from_every_screen() {
        for state in [GameState::Playing, GameState::NameEntry, GameState::Credits] {
            let mut states = StateManager::new();
            states.set_state(state);
            assert_eq!(states.handle_input(&press(|i| i.quit = true)), Action::Quit);
        }
    }

    #[test]
    fn tab_leaves_the_game() {
        let mut states = StateManager::new();
        states.set_state(GameState::Playing);
        states.handle_input(&press(|i| i.menu = true));
        assert_eq!(states.current(), GameState::MainMenu);
    }
}
