// Domain entities

pub mod config;
pub mod match_candidate;
pub mod owner;
pub mod report;
pub mod sequence_counter;

pub use config::*;
pub use match_candidate::*;
pub use owner::*;
pub use report::*;
pub use sequence_counter::*;
