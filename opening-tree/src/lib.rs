pub mod coordinate;
pub mod error;
pub mod line_fetcher;
pub mod move_sequence;
pub mod options;
pub mod orchestrator;
pub mod ply_cache;
pub mod provider;
pub mod significance;
pub mod snapshot;

pub use coordinate::*;
pub use error::*;
pub use line_fetcher::*;
pub use move_sequence::*;
pub use options::*;
pub use orchestrator::*;
pub use ply_cache::*;
pub use provider::*;
pub use significance::*;
pub use snapshot::*;
