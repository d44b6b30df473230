//! Campus gateway: schema-driven REST façade over a PostgREST backend.

pub mod backend;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use backend::{Backend, BackendResponse, PostgrestClient};
pub use config::{builtin_resources, load_resources, resolve, GatewayConfig, ResolvedModel, ResolvedResource};
pub use error::{AppError, ConfigError};
pub use query::BackendRequest;
pub use routes::{app, common_routes, entity_routes};
pub use service::CrudService;
pub use state::AppState;
