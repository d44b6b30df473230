//! CrudService: one generic gateway parameterized by resource schema.

mod crud;
mod validation;
pub use crud::{CrudService, PLACEHOLDER_ID};
pub use validation::RequestValidator;
