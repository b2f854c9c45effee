// Backend Application Layer

pub mod commands;
pub mod dtos;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod sequence;
pub mod state;

pub use error::AppError;
pub use metrics::Metrics;
pub use sequence::SequenceIssuer;
pub use state::AppState;
