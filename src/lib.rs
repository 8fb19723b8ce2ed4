pub mod collision;
pub mod debug;
pub mod game;
pub mod input;
pub mod maze;
pub mod player;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod scene;
pub mod settings;
pub mod ui;
