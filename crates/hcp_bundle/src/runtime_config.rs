//! Extraction of the runtime configuration embedded in a bundle's index page.
//!
//! The build tool writes the configuration into the entry document as a single
//! assignment:
//!
//! ```text
//! __meteor_runtime_config__ = JSON.parse(decodeURIComponent("%7B%22appId%22%3A%22xyz%22%7D"))
//! ```
//!
//! The quoted payload is percent-decoded first and then parsed as a JSON object.

use percent_encoding::percent_decode_str;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

/// Key of the application identifier inside the runtime configuration.
pub const APP_ID_KEY: &str = "appId";
/// Key of the root URL inside the runtime configuration.
pub const ROOT_URL_KEY: &str = "ROOT_URL";

static RUNTIME_CONFIG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"__meteor_runtime_config__ = JSON\.parse\(decodeURIComponent\("([^"]*)"\)\)"#)
        .expect("runtime config pattern is valid")
});

/// Reasons the runtime configuration could not be extracted from a document.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Could not find runtime config in index file")]
    PatternNotFound,

    #[error("Could not decode runtime config: {0}")]
    Decode(String),

    #[error("Could not parse runtime config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Runtime config is not a JSON object")]
    NotAnObject,
}

/// The JSON object a bundle's index page hands to the client at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig(Map<String, Value>);

impl RuntimeConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value for `key` if it is present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn app_id(&self) -> Option<&str> {
        self.get_str(APP_ID_KEY)
    }

    pub fn root_url(&self) -> Option<&str> {
        self.get_str(ROOT_URL_KEY)
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Find the runtime configuration assignment in `document` and decode it.
pub fn extract_runtime_config(document: &str) -> Result<RuntimeConfig, ExtractError> {
    let payload = RUNTIME_CONFIG_PATTERN
        .captures(document)
        .and_then(|captures| captures.get(1))
        .ok_or(ExtractError::PatternNotFound)?
        .as_str();

    let decoded = decode_uri_component(payload)?;
    match serde_json::from_str(&decoded)? {
        Value::Object(map) => Ok(RuntimeConfig(map)),
        _ => Err(ExtractError::NotAnObject),
    }
}

/// Percent-decode `encoded`, rejecting escapes that are not followed by two
/// hex digits and byte sequences that are not UTF-8.
fn decode_uri_component(encoded: &str) -> Result<String, ExtractError> {
    let bytes = encoded.as_bytes();
    for (index, _) in encoded.match_indices('%') {
        let escape = bytes.get(index + 1..index + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(ExtractError::Decode(format!(
                "malformed escape at offset {index}"
            )));
        }
    }

    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ExtractError::Decode(e.to_string()))
}
