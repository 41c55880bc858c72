pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod keybinds;
pub mod resolver;
pub mod sequences;
pub mod session;
pub mod stats;
pub mod store;
pub mod terminal;
pub mod token;
// cmd and reports belong to the binary (main.rs).
