//! Backend request builder: row filters and PostgREST query parameters.

mod builder;
pub mod filter;
pub use builder::*;
pub use filter::*;
