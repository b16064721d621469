//! Error types for the registry.
//!
//! Every failure here is a configuration error raised synchronously while a
//! [`Registry`](crate::registry::Registry) or
//! [`Configuration`](crate::config::Configuration) is being built. Looking up a
//! type that has no factory is not an error; it yields `None`.

use thiserror::Error;

use crate::descriptor::TypeDescriptor;
use crate::factory::Capability;

/// Errors that can occur while building a registry or configuration.
#[derive(Debug, Error)]
pub enum FixgenError {
	/// A factory declares a descriptor whose nullability disagrees with the
	/// capability variant it was registered as.
	#[error("Capability mismatch: {capability} factory declares descriptor `{descriptor}`")]
	CapabilityMismatch {
		/// Descriptor advertised by the factory.
		descriptor: TypeDescriptor,
		/// Capability variant the factory actually implements.
		capability: Capability,
	},

	/// A factory declares a descriptor for a different type than it produces.
	#[error("Output type mismatch: factory for `{descriptor}` produces `{produced}`")]
	OutputTypeMismatch {
		/// Descriptor advertised by the factory.
		descriptor: TypeDescriptor,
		/// Name of the type the factory produces.
		produced: &'static str,
	},

	/// Two factories ended up indexed under the same descriptor.
	#[error("Duplicate descriptor in registry: {0}")]
	DuplicateDescriptor(TypeDescriptor),

	/// JSON deserialization error while loading settings.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),
}

/// Result type alias for registry operations.
pub type FixgenResult<T> = Result<T, FixgenError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_capability_mismatch_message() {
		let error = FixgenError::CapabilityMismatch {
			descriptor: TypeDescriptor::of::<i32>(),
			capability: Capability::Nullable,
		};
		assert_eq!(
			error.to_string(),
			"Capability mismatch: nullable factory declares descriptor `i32`"
		);
	}

	#[rstest]
	fn test_duplicate_descriptor_message() {
		let error = FixgenError::DuplicateDescriptor(TypeDescriptor::nullable::<String>());
		assert_eq!(
			error.to_string(),
			"Duplicate descriptor in registry: alloc::string::String?"
		);
	}

	#[rstest]
	fn test_json_error_from() {
		let json_error: serde_json::Error =
			serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
		let error: FixgenError = json_error.into();
		assert!(matches!(error, FixgenError::JsonError(_)));
	}
}
