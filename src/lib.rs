pub mod config;
pub mod error;
pub mod llm;
pub mod narrator;
pub mod prompt;
pub mod server;

pub use error::{Error, Result};
