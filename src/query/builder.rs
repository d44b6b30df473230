//! Builds select, insert, update and delete requests for one backend table.

use crate::query::Filter;
use reqwest::Method;
use serde_json::{Map, Value};

/// Primary key column on every backend table.
pub const ID_COLUMN: &str = "id";

/// Path under the backend base URL where tables are exposed.
pub const REST_PREFIX: &str = "/rest/v1";

/// One outbound call: method, table, query parameters, optional JSON payload.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendRequest {
    pub method: Method,
    pub table: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl BackendRequest {
    fn new(method: Method, table: &str) -> Self {
        BackendRequest {
            method,
            table: table.to_string(),
            params: Vec::new(),
            body: None,
        }
    }

    fn filter(mut self, filter: &Filter) -> Self {
        self.params.push(filter.to_param());
        self
    }

    /// `GET ?select=*`, optionally filtered and limited.
    pub fn select(table: &str, filters: &[Filter], limit: Option<u32>) -> Self {
        let mut req = filters
            .iter()
            .fold(Self::new(Method::GET, table), |req, f| req.filter(f));
        req.params.push(("select".into(), "*".into()));
        if let Some(n) = limit {
            req.params.push(("limit".into(), n.to_string()));
        }
        req
    }

    /// `GET ?id=eq.{id}&select=*`.
    pub fn select_by_id(table: &str, id: &Value) -> Self {
        Self::select(table, &[Filter::eq(ID_COLUMN, id)], None)
    }

    /// `POST` with the row as body.
    pub fn insert(table: &str, row: Map<String, Value>) -> Self {
        let mut req = Self::new(Method::POST, table);
        req.body = Some(Value::Object(row));
        req
    }

    /// `PATCH ?id=eq.{id}` with the changed fields as body.
    pub fn update(table: &str, id: &Value, changes: Map<String, Value>) -> Self {
        let mut req = Self::new(Method::PATCH, table).filter(&Filter::eq(ID_COLUMN, id));
        req.body = Some(Value::Object(changes));
        req
    }

    /// `DELETE ?id=eq.{id}`.
    pub fn delete(table: &str, id: &Value) -> Self {
        Self::new(Method::DELETE, table).filter(&Filter::eq(ID_COLUMN, id))
    }

    /// Path relative to the backend base URL.
    pub fn path(&self) -> String {
        format!("{}/{}", REST_PREFIX, self.table)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
