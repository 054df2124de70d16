pub mod completeness;
pub mod error;
pub mod map;
pub mod scatter;
