pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::{init_logging, run};
