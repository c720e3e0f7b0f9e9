pub mod coder;
pub mod config;
pub mod discover;
pub mod error;
pub mod group;
pub mod preview;
pub mod score;
pub mod table;

pub use coder::{run, RunSummary};
pub use config::Config;
pub use error::CoderError;
