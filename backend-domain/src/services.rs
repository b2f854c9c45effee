// Pure domain services

pub mod lifecycle;

pub use lifecycle::*;
