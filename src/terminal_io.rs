use crate::input::FrameInput;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// Decodes one key press. Printable characters also land in `text` so the
/// name entry screen sees what was typed.
pub fn translate_key(key: &KeyEvent) -> FrameInput {
    let mut input = FrameInput::default();
    if key.kind == KeyEventKind::Release {
        return input;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => input.quit = true,
        KeyCode::Up => {
            input.thrust = true;
            input.up = true;
        }
        KeyCode::Down => input.down = true,
        KeyCode::Left => input.rotate_left = true,
        KeyCode::Right => input.rotate_right = true,
        KeyCode::Enter => input.confirm = true,
        KeyCode::Esc => input.back = true,
        KeyCode::Tab => input.menu = true,
        KeyCode::Backspace => input.backspace = true,
        KeyCode::Char(c) => {
            match c.to_ascii_lowercase() {
                'w' => {
                    input.thrust = true;
                    input.up = true;
                }
                's' => input.down = true,
                'a' => input.rotate_left = true,
                'd' => input.rotate_right = true,
                'e' => input.use_item = true,
                'r' => input.restart = true,
                ' ' => input.fire = true,
                _ => {}
            }
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                input.text.push(c);
            }
        }
        _ => {}
    }
    input
}

pub fn translate_event(event: &Event) -> FrameInput {
    match event {
        Event::Key(key) => translate_key(key),
        _ => FrameInput::default(),
    }
}

/// Everything that arrived during one frame.
#[derive(Debug, Default)]
pub struct FramePoll {
    pub input: FrameInput,
    pub resized: Option<(u16, u16)>,
}

impl FramePoll {
    fn absorb(&mut self, event: Event) {
        match event {
            Event::Resize(width, height) => self.resized = Some((width, height)),
            other => self.input.merge(translate_event(&other)),
        }
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    /// Starts a game, flies and shoots for a while, then backs out to the
    /// menu and quits.
    pub fn demo() -> Self {
        let key = |code: KeyCode| Event::Key(code.into());
        let mut events: HashMap<u64, Vec<Event>> = HashMap::new();
        events.insert(1, vec![key(KeyCode::Enter)]);
        for frame in 2..300 {
            let mut pressed = Vec::new();
            if frame % 4 == 0 {
                pressed.push(key(KeyCode::Char(' ')));
            }
            if frame % 30 < 10 {
                pressed.push(key(KeyCode::Up));
            } else if frame % 30 < 15 {
                pressed.push(key(KeyCode::Right));
            }
            if frame == 150 {
                pressed.push(key(KeyCode::Char('e')));
            }
            events.insert(frame, pressed);
        }
        events.insert(300, vec![key(KeyCode::Tab)]);
        events.insert(301, vec![key(KeyCode::Esc)]);
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> FramePoll {
        let mut poll = FramePoll::default();
        for event in self.events.remove(&frame_count).unwrap_or_default() {
            poll.absorb(event);
        }
        poll
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

/// Where a frame's input comes from.
pub enum InputSource {
    Terminal,
    Simulated(SimulatedInput),
}

impl InputSource {
    /// Drains whatever is pending without blocking.
    pub fn poll(&mut self, frame_count: u64) -> io::Result<FramePoll> {
        match self {
            InputSource::Simulated(sim) => Ok(sim.poll(frame_count)),
            InputSource::Terminal => {
                let mut poll = FramePoll::default();
                while event::poll(Duration::ZERO)? {
                    poll.absorb(event::read()?);
                }
                Ok(poll)
            }
        }
    }
}
