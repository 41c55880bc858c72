pub mod keybinds;
pub mod play;
pub mod sequences;
pub mod stats;
