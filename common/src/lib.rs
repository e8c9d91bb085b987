pub mod config;
pub mod env;
pub mod fs;

pub use config::*;
pub use env::*;
pub use fs::*;
