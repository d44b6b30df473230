//! Resolved resource model: catalog validated and flattened for runtime use.

use crate::config::IdType;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct OptionalField {
    pub name: String,
    pub default: Option<Value>,
}

/// Schema descriptor for one resource collection.
#[derive(Clone, Debug)]
pub struct ResolvedResource {
    pub path_segment: String,
    pub table: String,
    pub label: String,
    pub id_type: IdType,
    pub required: Vec<String>,
    pub optional: Vec<OptionalField>,
}

impl ResolvedResource {
    /// Whether `name` is a writable field of this resource.
    pub fn is_known_field(&self, name: &str) -> bool {
        self.required.iter().any(|f| f == name) || self.optional.iter().any(|f| f.name == name)
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedModel {
    pub resources: Vec<ResolvedResource>,
    pub resource_by_path: HashMap<String, ResolvedResource>,
}

impl ResolvedModel {
    pub fn resource_by_path(&self, path: &str) -> Option<&ResolvedResource> {
        self.resource_by_path.get(path)
    }

    /// Resource used by health and connectivity probes: the first in the catalog.
    pub fn probe_resource(&self) -> Option<&ResolvedResource> {
        self.resources.first()
    }

    pub fn tables(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.table.as_str()).collect()
    }
}
