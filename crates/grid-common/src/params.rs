//! Named-parameter lookup for grid configuration.
//!
//! Grid metadata lives in an opaque host store (a GRIB handle, a NetCDF
//! attribute table, a test fixture). This module abstracts it behind a
//! typed lookup trait; failing lookups are fatal to the grid session,
//! there is no defaulting.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{GridError, GridResult};

/// A scalar parameter value as stored by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Long(i64),
    Double(f64),
    Flag(bool),
}

/// Typed lookup of named scalar parameters.
pub trait ParameterSource {
    /// Look up an integer parameter (grid dimensions, counts).
    fn get_long(&self, name: &str) -> GridResult<i64>;

    /// Look up a floating-point parameter (angles, distances, axes).
    fn get_double(&self, name: &str) -> GridResult<f64>;

    /// Look up a floating-point parameter that may legitimately be absent.
    ///
    /// Absence maps to `None`; a present value of the wrong type is still
    /// an error.
    fn get_optional_double(&self, name: &str) -> GridResult<Option<f64>>;

    /// Look up a boolean parameter (scan flags, datum selection).
    fn get_flag(&self, name: &str) -> GridResult<bool>;
}

/// In-memory parameter source backed by a name/value map.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    entries: HashMap<String, ParameterValue>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object into a parameter map.
    ///
    /// Integers become `Long`, other numbers `Double`, booleans `Flag`.
    pub fn from_json(json: &str) -> GridResult<Self> {
        let entries: HashMap<String, ParameterValue> = serde_json::from_str(json)
            .map_err(|e| GridError::ParameterTypeMismatch {
                name: format!("<json: {e}>"),
                expected: "scalar object",
            })?;
        Ok(Self { entries })
    }

    pub fn set_long(&mut self, name: &str, value: i64) -> &mut Self {
        self.entries
            .insert(name.to_string(), ParameterValue::Long(value));
        self
    }

    pub fn set_double(&mut self, name: &str, value: f64) -> &mut Self {
        self.entries
            .insert(name.to_string(), ParameterValue::Double(value));
        self
    }

    pub fn set_flag(&mut self, name: &str, value: bool) -> &mut Self {
        self.entries
            .insert(name.to_string(), ParameterValue::Flag(value));
        self
    }

    fn lookup(&self, name: &str) -> GridResult<ParameterValue> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| GridError::ParameterNotFound(name.to_string()))
    }
}

impl ParameterSource for MapSource {
    fn get_long(&self, name: &str) -> GridResult<i64> {
        match self.lookup(name)? {
            ParameterValue::Long(v) => Ok(v),
            _ => Err(GridError::ParameterTypeMismatch {
                name: name.to_string(),
                expected: "long",
            }),
        }
    }

    fn get_double(&self, name: &str) -> GridResult<f64> {
        match self.lookup(name)? {
            ParameterValue::Double(v) => Ok(v),
            // GRIB metadata frequently stores whole-degree angles as longs.
            ParameterValue::Long(v) => Ok(v as f64),
            _ => Err(GridError::ParameterTypeMismatch {
                name: name.to_string(),
                expected: "double",
            }),
        }
    }

    fn get_optional_double(&self, name: &str) -> GridResult<Option<f64>> {
        match self.get_double(name) {
            Ok(v) => Ok(Some(v)),
            Err(GridError::ParameterNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn get_flag(&self, name: &str) -> GridResult<bool> {
        match self.lookup(name)? {
            ParameterValue::Flag(v) => Ok(v),
            ParameterValue::Long(v) => Ok(v != 0),
            _ => Err(GridError::ParameterTypeMismatch {
                name: name.to_string(),
                expected: "flag",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_is_fatal() {
        let source = MapSource::new();
        let err = source.get_double("radius").unwrap_err();
        assert!(matches!(err, GridError::ParameterNotFound(_)));
    }

    #[test]
    fn test_type_mismatch() {
        let mut source = MapSource::new();
        source.set_flag("Ni", true);
        let err = source.get_long("Ni").unwrap_err();
        assert!(matches!(err, GridError::ParameterTypeMismatch { .. }));
    }

    #[test]
    fn test_long_widens_to_double() {
        let mut source = MapSource::new();
        source.set_long("LaDInDegrees", 60);
        assert_eq!(source.get_double("LaDInDegrees").unwrap(), 60.0);
    }

    #[test]
    fn test_optional_double() {
        let mut source = MapSource::new();
        source.set_double("latitudeOfLastGridPointInDegrees", 42.5);
        assert_eq!(
            source
                .get_optional_double("latitudeOfLastGridPointInDegrees")
                .unwrap(),
            Some(42.5)
        );
        assert_eq!(
            source.get_optional_double("longitudeOfLastGridPointInDegrees").unwrap(),
            None
        );
    }

    #[test]
    fn test_from_json() {
        let source = MapSource::from_json(
            r#"{"Ni": 5, "radius": 6371229.0, "jScansPositively": true}"#,
        )
        .unwrap();
        assert_eq!(source.get_long("Ni").unwrap(), 5);
        assert_eq!(source.get_double("radius").unwrap(), 6371229.0);
        assert!(source.get_flag("jScansPositively").unwrap());
    }
}
