pub mod setup;
pub mod display;

pub use setup::setup;
pub use display::{log_window_resize, sync_vsync_settings};
