use std::collections::HashSet;

use dropcards_core::game_trait::Direction;

/// Keys that move the deck forward outside a gating phase.
pub const ADVANCE_KEYS: [&str; 3] = ["ArrowRight", "Space", "Enter"];

pub fn is_advance_key(code: &str) -> bool {
    ADVANCE_KEYS.contains(&code)
}

/// One user action from the presentation shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerInput {
    /// Keyboard press, `KeyboardEvent.code` naming.
    Key(String),
    /// Tap or click on the card surface.
    Pointer,
    /// Tap on a numbered cell of a grid game.
    Cell(usize),
    /// On-screen directional pad.
    Pad(Direction),
    /// Submitted text field.
    Text(String),
    /// On-screen skip button.
    Skip,
    /// On-screen retry button.
    Retry,
}

/// Buffers shell events between ticks and suppresses key auto-repeat.
pub struct InputState {
    /// Keys currently held down.
    pub keys_down: HashSet<String>,
    /// Actions queued since the last drain.
    pending: Vec<ViewerInput>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            pending: Vec::new(),
        }
    }

    /// Register a key down event. Repeats while held are dropped.
    pub fn on_key_down(&mut self, code: String) {
        if self.keys_down.insert(code.clone()) {
            self.pending.push(ViewerInput::Key(code));
        }
    }

    pub fn on_key_up(&mut self, code: &str) {
        self.keys_down.remove(code);
    }

    pub fn on_pointer(&mut self) {
        self.pending.push(ViewerInput::Pointer);
    }

    pub fn on_cell(&mut self, index: usize) {
        self.pending.push(ViewerInput::Cell(index));
    }

    pub fn on_pad(&mut self, dir: Direction) {
        self.pending.push(ViewerInput::Pad(dir));
    }

    pub fn on_text_submit(&mut self, text: String) {
        self.pending.push(ViewerInput::Text(text));
    }

    pub fn on_skip(&mut self) {
        self.pending.push(ViewerInput::Skip);
    }

    pub fn on_retry(&mut self) {
        self.pending.push(ViewerInput::Retry);
    }

    /// Take every queued action, oldest first.
    pub fn drain(&mut self) -> Vec<ViewerInput> {
        std::mem::take(&mut self.pending)
    }

    /// Forget held keys, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.pending.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
