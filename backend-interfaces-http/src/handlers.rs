pub mod match_handlers;
pub mod ops_handlers;
pub mod query_handlers;
pub mod report_handlers;
