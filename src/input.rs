/// Keys a frame cares about, already decoded from the platform's events.
/// `thrust`/`rotate_*`/`fire` are held-state; the rest are one-shot presses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
    pub use_item: bool,
    pub up: bool,
    pub down: bool,
    pub confirm: bool,
    pub back: bool,
    pub menu: bool,
    pub restart: bool,
    pub backspace: bool,
    pub quit: bool,
    pub text: Vec<char>,
}

impl FrameInput {
    pub fn is_idle(&self) -> bool {
        *self == FrameInput::default()
    }

    /// Folds another snapshot into this one, keeping every pressed key.
    pub fn merge(&mut self, other: FrameInput) {
        self.thrust |= other.thrust;
        self.rotate_left |= other.rotate_left;
        self.rotate_right |= other.rotate_right;
        self.fire |= other.fire;
        self.use_item |= other.use_item;
        self.up |= other.up;
        self.down |= other.down;
        self.confirm |= other.confirm;
        self.back |= other.back;
        self.menu |= other.menu;
        self.restart |= other.restart;
        self.backspace |= other.backspace;
        self.quit |= other.quit;
        self.text.extend(other.text);
    }
}
