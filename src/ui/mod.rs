//! Menu state that the presentation layer polls.
//!
//! No drawing happens here; a renderer reads these types and the engine
//! mutates them from input.

mod pause_menu;

pub use pause_menu::{PauseAction, PauseMenu, PAUSE_OPTIONS};

/// Key bindings listed on the "COMMANDES" screen
pub const CONTROLS: [(&str, &str); 6] = [
    ("Flèches / ZQSD", "Se déplacer"),
    ("Espace", "Poser une bombe"),
    ("Échap", "Pause"),
    ("Entrée", "Valider"),
    ("Retour arrière", "Retour"),
    ("Haut / Bas", "Naviguer dans les menus"),
];

/// Which overlay is shown on top of a running level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Pause,
    Controls,
}
