//! Catalog validation: unique paths, well-formed field sets.

use crate::config::ResourceConfig;
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(resources: &[ResourceConfig]) -> Result<(), ConfigError> {
    if resources.is_empty() {
        return Err(ConfigError::Validation("at least one resource required".into()));
    }

    let mut path_segments = HashSet::new();
    for r in resources {
        if r.path_segment.is_empty() || r.path_segment.contains('/') {
            return Err(ConfigError::Validation(format!(
                "invalid path segment '{}'",
                r.path_segment
            )));
        }
        if !path_segments.insert(r.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(r.path_segment.clone()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for f in &r.required {
            if f == "id" || !seen.insert(f.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "resource '{}': invalid or repeated required field '{}'",
                    r.path_segment, f
                )));
            }
        }
        for f in &r.optional {
            if r.required.contains(&f.name) {
                return Err(ConfigError::OverlappingField {
                    resource: r.path_segment.clone(),
                    field: f.name.clone(),
                });
            }
            if f.name == "id" || !seen.insert(f.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "resource '{}': invalid or repeated optional field '{}'",
                    r.path_segment, f.name
                )));
            }
        }
    }

    Ok(())
}
