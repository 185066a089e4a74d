pub mod args;
pub mod commands;
mod config;
pub mod display;
pub mod engine;
mod error;
pub mod model;
pub mod palette;
pub mod store;
mod tracker;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use tracker::{Dashboard, ReloadToken, RequestSequencer, Tracker, ViewQuery};
