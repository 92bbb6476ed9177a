//! Scalar parameters and the sources they are loaded from.
//!
//! Parameters are named configuration values (a port, a timeout, a DSN) that
//! the autowirer injects into constructor arguments of built-in type. The
//! lookup key is the constructor parameter's own name.

use std::collections::HashMap;
use std::env;
#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// A scalar configuration value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(untagged))]
pub enum Parameter {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Parameter>),
}

/// The built-in types a constructor parameter can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    List,
    /// Accepts any parameter value
    Any,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "boolean",
            ScalarKind::List => "list",
            ScalarKind::Any => "any",
        }
    }
}

impl Parameter {
    /// The kind of value held.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Parameter::Boolean(_) => ScalarKind::Boolean,
            Parameter::Integer(_) => ScalarKind::Integer,
            Parameter::Float(_) => ScalarKind::Float,
            Parameter::String(_) => ScalarKind::String,
            Parameter::List(_) => ScalarKind::List,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Parameter::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Parameter::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Parameter::Float(f) => Some(*f),
            Parameter::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Parameter::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Parameter]> {
        match self {
            Parameter::List(items) => Some(items),
            _ => None,
        }
    }

    /// Parses raw text the way environment variables are read:
    /// integer, then float, then boolean, falling back to a string.
    pub fn parse(raw: &str) -> Self {
        if let Ok(int_val) = raw.parse::<i64>() {
            Parameter::Integer(int_val)
        } else if let Ok(float_val) = raw.parse::<f64>() {
            Parameter::Float(float_val)
        } else if let Ok(bool_val) = raw.parse::<bool>() {
            Parameter::Boolean(bool_val)
        } else {
            Parameter::String(raw.to_string())
        }
    }
}

impl From<bool> for Parameter {
    fn from(value: bool) -> Self {
        Parameter::Boolean(value)
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Parameter::String(value.to_string())
    }
}

impl From<String> for Parameter {
    fn from(value: String) -> Self {
        Parameter::String(value)
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Float(value)
    }
}

impl From<f32> for Parameter {
    fn from(value: f32) -> Self {
        Parameter::Float(value as f64)
    }
}

macro_rules! integer_parameter {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Parameter {
                fn from(value: $int) -> Self {
                    Parameter::Integer(value as i64)
                }
            }
        )*
    };
}

integer_parameter!(i8, i16, i32, i64, u8, u16, u32);

impl<T: Into<Parameter>> From<Vec<T>> for Parameter {
    fn from(values: Vec<T>) -> Self {
        Parameter::List(values.into_iter().map(Into::into).collect())
    }
}

/// Trait for parameter sources
pub trait ParameterSource: Send + Sync + std::fmt::Debug {
    /// Get a parameter by key
    fn get(&self, key: &str) -> Option<Parameter>;

    /// List all available keys
    fn keys(&self) -> Vec<String>;
}

/// Environment variable parameter source
///
/// Keys are matched case-insensitively: `timeout` reads `TIMEOUT`, or
/// `APP_TIMEOUT` when the source carries the prefix `app`.
#[derive(Debug, Default)]
pub struct EnvironmentSource {
    /// Prefix to filter environment variables
    prefix: Option<String>,
}

impl EnvironmentSource {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn env_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix.to_uppercase(), key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

impl ParameterSource for EnvironmentSource {
    fn get(&self, key: &str) -> Option<Parameter> {
        env::var(self.env_key(key)).ok().map(|value| Parameter::parse(&value))
    }

    fn keys(&self) -> Vec<String> {
        let prefix = self
            .prefix
            .as_ref()
            .map(|prefix| format!("{}_", prefix.to_uppercase()));

        // Non-UTF-8 entries cannot name a parameter
        env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter_map(|key| match &prefix {
                Some(prefix) => key
                    .strip_prefix(prefix.as_str())
                    .map(str::to_lowercase),
                None => Some(key.to_lowercase()),
            })
            .collect()
    }
}

/// In-memory parameter source
#[derive(Debug, Default, Clone)]
pub struct MapSource {
    values: HashMap<String, Parameter>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Parameter>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl FromIterator<(String, Parameter)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (String, Parameter)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl ParameterSource for MapSource {
    fn get(&self, key: &str) -> Option<Parameter> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// JSON document parameter source
///
/// The document must be an object whose values are scalars or arrays of
/// scalars; nested objects are rejected.
#[cfg(feature = "config")]
#[derive(Debug, Clone)]
pub struct JsonSource {
    values: HashMap<String, Parameter>,
}

#[cfg(feature = "config")]
impl JsonSource {
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        let values: HashMap<String, Parameter> = serde_json::from_str(document)?;
        Ok(Self { values })
    }
}

#[cfg(feature = "config")]
impl ParameterSource for JsonSource {
    fn get(&self, key: &str) -> Option<Parameter> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_source() {
        env::set_var("WIRE_TEST_KEY", "test_value");
        env::set_var("WIRE_TEST_INT", "42");
        env::set_var("WIRE_TEST_BOOL", "true");

        let source = EnvironmentSource::new();

        assert_eq!(source.get("wire_test_key"), Some(Parameter::String("test_value".to_string())));
        assert_eq!(source.get("wire_test_int"), Some(Parameter::Integer(42)));
        assert_eq!(source.get("wire_test_bool"), Some(Parameter::Boolean(true)));

        env::remove_var("WIRE_TEST_KEY");
        env::remove_var("WIRE_TEST_INT");
        env::remove_var("WIRE_TEST_BOOL");
    }

    #[test]
    #[serial]
    fn test_environment_source_with_prefix() {
        env::set_var("MYAPP_DATABASE_URL", "postgres://localhost");
        env::set_var("MYAPP_TIMEOUT", "2.5");

        let source = EnvironmentSource::with_prefix("myapp");

        assert_eq!(
            source.get("database_url"),
            Some(Parameter::String("postgres://localhost".to_string()))
        );
        assert_eq!(source.get("timeout"), Some(Parameter::Float(2.5)));

        let keys = source.keys();
        assert!(keys.contains(&"database_url".to_string()));
        assert!(keys.contains(&"timeout".to_string()));

        env::remove_var("MYAPP_DATABASE_URL");
        env::remove_var("MYAPP_TIMEOUT");
    }

    #[test]
    #[serial]
    #[cfg(unix)]
    fn test_environment_source_skips_non_utf8_entries() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        env::set_var("WIRELATIN_BAD", OsStr::from_bytes(&[0x66, 0xff, 0x6f]));
        env::set_var("WIRELATIN_GOOD", "ok");

        let source = EnvironmentSource::with_prefix("wirelatin");
        let keys = source.keys();
        assert_eq!(keys, vec!["good".to_string()]);
        assert_eq!(source.get("bad"), None);

        let container = crate::Container::new();
        assert_eq!(container.load_parameters(&source), 1);
        assert_eq!(container.get_parameter("good"), Some(Parameter::String("ok".to_string())));

        env::remove_var("WIRELATIN_BAD");
        env::remove_var("WIRELATIN_GOOD");
    }

    #[test]
    fn test_parse_order() {
        assert_eq!(Parameter::parse("30"), Parameter::Integer(30));
        assert_eq!(Parameter::parse("0.5"), Parameter::Float(0.5));
        assert_eq!(Parameter::parse("false"), Parameter::Boolean(false));
        assert_eq!(Parameter::parse("localhost"), Parameter::String("localhost".to_string()));
    }

    #[test]
    fn test_map_source() {
        let source = MapSource::new().with("host", "localhost").with("port", 8080u16);

        assert_eq!(source.get("host"), Some(Parameter::String("localhost".to_string())));
        assert_eq!(source.get("port"), Some(Parameter::Integer(8080)));
        assert_eq!(source.get("missing"), None);

        let mut keys = source.keys();
        keys.sort();
        assert_eq!(keys, vec!["host".to_string(), "port".to_string()]);
    }

    #[test]
    fn test_integer_widens_to_float() {
        assert_eq!(Parameter::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Parameter::Float(3.0).as_i64(), None);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_json_source() {
        let source = JsonSource::from_json(
            r#"{ "timeout": 30, "debug": true, "hosts": ["a", "b"], "name": "svc" }"#,
        )
        .unwrap();

        assert_eq!(source.get("timeout"), Some(Parameter::Integer(30)));
        assert_eq!(source.get("debug"), Some(Parameter::Boolean(true)));
        assert_eq!(
            source.get("hosts"),
            Some(Parameter::List(vec![
                Parameter::String("a".to_string()),
                Parameter::String("b".to_string()),
            ]))
        );
        assert_eq!(source.get("name"), Some(Parameter::String("svc".to_string())));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_json_source_rejects_nested_objects() {
        assert!(JsonSource::from_json(r#"{ "db": { "host": "x" } }"#).is_err());
    }
}
