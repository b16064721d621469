//! Serializable behavioural settings.
//!
//! Settings carry only the scalar flags of a
//! [`Configuration`](crate::config::Configuration); factories are always
//! supplied in code.
//!
//! ```
//! use fixgen_registry::FixgenSettings;
//!
//! let settings = FixgenSettings::from_json_str(r#"{ "prefer_absent": true, "seed": 42 }"#).unwrap();
//!
//! assert!(settings.prefer_absent);
//! assert!(settings.use_default_arguments);
//! assert_eq!(settings.collection_size, 5);
//! assert_eq!(settings.seed, Some(42));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::FixgenResult;

/// Default number of elements for multi-element containers.
pub const DEFAULT_COLLECTION_SIZE: usize = 5;

/// Behavioural flags for a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixgenSettings {
	/// Honour default constructor arguments instead of generating them.
	pub use_default_arguments: bool,
	/// Prefer absent values wherever a type is nullable.
	pub prefer_absent: bool,
	/// Number of elements to put in generated containers.
	pub collection_size: usize,
	/// Seed for a deterministic random source; entropy when unset.
	pub seed: Option<u64>,
}

impl Default for FixgenSettings {
	fn default() -> Self {
		Self {
			use_default_arguments: true,
			prefer_absent: false,
			collection_size: DEFAULT_COLLECTION_SIZE,
			seed: None,
		}
	}
}

impl FixgenSettings {
	/// Parses settings from JSON; missing fields take their defaults.
	pub fn from_json_str(json: &str) -> FixgenResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Serializes settings to pretty-printed JSON.
	pub fn to_json_string(&self) -> FixgenResult<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}
