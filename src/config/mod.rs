//! Gateway settings and the resource catalog: raw types, loading, validation, resolved model.

pub mod types;
pub mod loader;
pub mod validator;
pub mod resolved;

pub use types::*;
pub use loader::*;
pub use validator::*;
pub use resolved::*;
