mod explorer_provider;
mod http;
mod options;
mod recorded;
mod suggested_move;

pub use explorer_provider::*;
pub use http::*;
pub use options::*;
pub use recorded::*;
pub use suggested_move::*;
