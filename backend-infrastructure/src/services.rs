pub mod matcher_service;

pub use matcher_service::*;
