pub mod app;
pub mod config;
pub mod error;
pub mod exchange;
pub mod intake;
pub mod logging;
pub mod utils;
