//! CLI command implementations.

mod ask;
mod config;
mod serve;
mod transcribe;

pub use ask::run_ask;
pub use config::run_config;
pub use serve::run_serve;
pub use transcribe::run_transcribe;
