// Domain value objects
pub mod identifiers;
pub mod ref_code;
pub mod report_kind;

pub use identifiers::*;
pub use ref_code::*;
pub use report_kind::*;
