//! In-run pause overlay.
//!
//! Selection is an index into a fixed option list; navigation is plain
//! modular arithmetic and the index -> action mapping is a separate table.

/// Labels shown in the pause overlay, top to bottom
pub const PAUSE_OPTIONS: [&str; 4] = [
    "REPRENDRE",
    "RECOMMENCER",
    "COMMANDES",
    "RETOUR AU MENU PRINCIPAL",
];

/// What the selected option asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Resume,
    Restart,
    Commands,
    MainMenu,
}

/// Action for each option, same order as `PAUSE_OPTIONS`
const PAUSE_ACTIONS: [PauseAction; 4] = [
    PauseAction::Resume,
    PauseAction::Restart,
    PauseAction::Commands,
    PauseAction::MainMenu,
];

#[derive(Debug, Clone, Default)]
pub struct PauseMenu {
    selected_index: usize,
}

impl PauseMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &'static [&'static str] {
        &PAUSE_OPTIONS
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_label(&self) -> &'static str {
        PAUSE_OPTIONS[self.selected_index]
    }

    pub fn navigate_up(&mut self) {
        let len = PAUSE_OPTIONS.len();
        self.selected_index = (self.selected_index + len - 1) % len;
    }

    pub fn navigate_down(&mut self) {
        self.selected_index = (self.selected_index + 1) % PAUSE_OPTIONS.len();
    }

    pub fn selected_action(&self) -> PauseAction {
        PAUSE_ACTIONS[self.selected_index]
    }

    pub fn reset(&mut self) {
        self.selected_index = 0;
    }
}
