//! Convenience re-exports for common usage.
//!
//! ```
//! use fixgen_registry::prelude::*;
//!
//! let config = Configuration::new();
//! assert!(config.resolve(&TypeDescriptor::of::<bool>()).is_some());
//! ```

// Error types
pub use crate::error::{FixgenError, FixgenResult};

// Registry types
pub use crate::config::{Configuration, ConfigurationBuilder};
pub use crate::descriptor::TypeDescriptor;
pub use crate::registry::{FactorySet, Registry};
pub use crate::settings::FixgenSettings;

// Factory types
pub use crate::factory::{
	Capability, Generated, InstanceFactory, NonNullableFactory, NullableFactory, NullableMode,
	NullableWrapper,
};

// Factory functions
pub use crate::factory::{from_fn, nullable_from_fn, wrap};

// Randomness
pub use crate::random::{RandomSource, SharedRandom};
