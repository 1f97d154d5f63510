pub mod config;
pub mod event;
pub mod logging;
pub mod transcript;
pub mod util;
