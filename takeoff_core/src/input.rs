//! # Input Loading
//!
//! Reads [`FenceInput`] records from disk and coerces loosely typed values.
//!
//! Input usually comes straight from form fields, so a number may arrive as
//! `1800`, `1800.0`, `"1800"`, `""` or `null`. The deserializers here accept
//! all of them: anything that is not a finite number becomes 0. The engine
//! then turns meaningless zeros into a `None` result.
//!
//! Flags and choices are coerced the same way. `enabled` accepts `true`,
//! `"true"`, `"yes"`, `"on"` or any non-zero number; anything else is off.
//! Fence type and tiers ignore case and fall back to their defaults (panel,
//! pro, full) when the value is missing or unknown.
//!
//! ## Supported Formats
//!
//! - `.json` - parsed with `serde_json`
//! - `.toml` - parsed with `toml`
//!
//! ## Example
//!
//! ```rust,no_run
//! use takeoff_core::input::load_input;
//! use takeoff_core::calculations::compute_fence_bom;
//! use std::path::Path;
//!
//! let input = load_input(Path::new("garden.toml"))?;
//! let bom = compute_fence_bom(&input);
//! # Ok::<(), takeoff_core::errors::TakeoffError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::calculations::FenceInput;
use crate::errors::{TakeoffError, TakeoffResult};

/// Input file formats understood by [`load_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> TakeoffResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(InputFormat::Json),
            "toml" => Ok(InputFormat::Toml),
            _ => Err(TakeoffError::invalid_input(
                "path",
                path.display().to_string(),
                "Expected a .json or .toml input file",
            )),
        }
    }
}

/// Load a fence input record from a `.json` or `.toml` file.
pub fn load_input(path: &Path) -> TakeoffResult<FenceInput> {
    let format = InputFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|e| {
        TakeoffError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    debug!("Loading {:?} input from {}", format, path.display());

    match format {
        InputFormat::Json => FenceInput::from_json_str(&text),
        InputFormat::Toml => FenceInput::from_toml_str(&text),
    }
}

/// Coerce any scalar into a finite number, falling back to 0.
fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Deserialize a numeric field leniently (see module docs).
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

/// Deserialize a whole-number field leniently, truncating fractions and
/// clamping negatives to 0.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let n = coerce_number(&value).trunc();
    Ok(n.clamp(0.0, u32::MAX as f64) as u32)
}

/// Deserialize an on/off flag leniently (see module docs).
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        ),
        _ => false,
    })
}

/// Deserialize a unit-only enum leniently, falling back to its default.
pub fn lenient_enum<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = match Value::deserialize(deserializer)? {
        Value::String(s) => Value::String(s.trim().to_ascii_lowercase()),
        other => other,
    };
    Ok(serde_json::from_value(value.clone()).unwrap_or_else(|_| {
        if !value.is_null() {
            warn!("Unrecognised choice {}, using the default", value);
        }
        T::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::fence::FenceType;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(1800)), 1800.0);
        assert_eq!(coerce_number(&json!(12.5)), 12.5);
        assert_eq!(coerce_number(&json!(" 600 ")), 600.0);
        assert_eq!(coerce_number(&json!("")), 0.0);
        assert_eq!(coerce_number(&json!("tall")), 0.0);
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!(true)), 0.0);
        assert_eq!(coerce_number(&json!("inf")), 0.0);
        assert_eq!(coerce_number(&json!("NaN")), 0.0);
    }

    #[derive(Deserialize)]
    struct Rails {
        #[serde(deserialize_with = "lenient_u32")]
        count: u32,
    }

    #[test]
    fn test_lenient_u32() {
        let r: Rails = serde_json::from_str(r#"{"count": 2.9}"#).unwrap();
        assert_eq!(r.count, 2);
        let r: Rails = serde_json::from_str(r#"{"count": -3}"#).unwrap();
        assert_eq!(r.count, 0);
        let r: Rails = serde_json::from_str(r#"{"count": "3"}"#).unwrap();
        assert_eq!(r.count, 3);
    }

    #[derive(Deserialize)]
    struct Flag {
        #[serde(default, deserialize_with = "lenient_bool")]
        on: bool,
    }

    #[test]
    fn test_lenient_bool() {
        let on = |json: &str| serde_json::from_str::<Flag>(json).unwrap().on;
        assert!(on(r#"{"on": true}"#));
        assert!(on(r#"{"on": "true"}"#));
        assert!(on(r#"{"on": " Yes "}"#));
        assert!(on(r#"{"on": 1}"#));
        assert!(!on(r#"{"on": "false"}"#));
        assert!(!on(r#"{"on": 0}"#));
        assert!(!on(r#"{"on": null}"#));
        assert!(!on(r#"{}"#));
    }

    #[derive(Deserialize)]
    struct Choice {
        #[serde(default, deserialize_with = "lenient_enum")]
        fence_type: FenceType,
    }

    #[test]
    fn test_lenient_enum() {
        let pick = |json: &str| serde_json::from_str::<Choice>(json).unwrap().fence_type;
        assert_eq!(pick(r#"{"fence_type": "hit-miss"}"#), FenceType::HitMiss);
        assert_eq!(pick(r#"{"fence_type": "Featheredge"}"#), FenceType::Featheredge);
        assert_eq!(pick(r#"{"fence_type": "picket"}"#), FenceType::Panel);
        assert_eq!(pick(r#"{"fence_type": 3}"#), FenceType::Panel);
        assert_eq!(pick(r#"{}"#), FenceType::Panel);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.json")).unwrap(), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.TOML")).unwrap(), InputFormat::Toml);
        let err = InputFormat::from_path(Path::new("a.csv")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(InputFormat::from_path(Path::new("fence")).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = PathBuf::from("definitely-not-here-takeoff-test.json");
        let err = load_input(&path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join(format!("takeoff-input-{}.json", std::process::id()));
        let json = serde_json::to_string(&FenceInput::example()).unwrap();
        fs::write(&path, json).unwrap();

        let loaded = load_input(&path).unwrap();
        assert_eq!(loaded, FenceInput::example());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_malformed_file() {
        let path = std::env::temp_dir().join(format!("takeoff-bad-{}.toml", std::process::id()));
        fs::write(&path, "fence_type = [").unwrap();

        let err = load_input(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        fs::remove_file(&path).unwrap();
    }
}
