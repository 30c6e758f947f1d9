pub mod chunk;
pub mod config;
pub mod error;

pub use chunk::*;
pub use config::{ChunkingConfig, Config};
pub use error::*;
