//! # Fixgen
//!
//! Random-but-valid values for test fixtures, resolved through a typed
//! factory registry.
//!
//! Fixgen maps a type descriptor (a Rust type plus a nullability bit) to a
//! factory producing values of that type. A default catalogue covers the
//! primitive numeric types, `bool`, `char`, `String` and the common `chrono`
//! date/time types; custom factories extend or override it.
//!
//! This crate is a facade over [`fixgen_registry`]; the modules below mirror
//! its layout.
//!
//! ## Quick Example
//!
//! ```rust
//! use fixgen::prelude::*;
//!
//! let config = Configuration::builder()
//!     .seed(2024)
//!     .factory(from_fn(|random| random.next_i32_in(1..65_536) as u32))
//!     .build()?;
//!
//! let port: u32 = config.create().unwrap();
//! assert!((1..65_536).contains(&port));
//!
//! // Nullable counterparts are derived automatically.
//! assert!(config.create_nullable::<u32>().is_some());
//! # Ok::<(), FixgenError>(())
//! ```

/// Descriptor keys.
pub mod descriptor {
	pub use fixgen_registry::descriptor::*;
}

/// Factory traits, adapters and the default catalogue.
pub mod factory {
	pub use fixgen_registry::factory::*;
}

/// Registry construction and resolution.
pub mod registry {
	pub use fixgen_registry::registry::*;
}

/// Configurations and their builder.
pub mod config {
	pub use fixgen_registry::config::*;
	pub use fixgen_registry::settings::*;
}

/// Random sources.
pub mod random {
	pub use fixgen_registry::random::*;
}

/// Convenience re-exports for common usage.
pub mod prelude {
	pub use fixgen_registry::prelude::*;
}

pub use fixgen_registry::{
	Capability, Configuration, ConfigurationBuilder, FactorySet, FixgenError, FixgenResult,
	FixgenSettings, Generated, InstanceFactory, NonNullableFactory, NullableFactory,
	NullableMode, RandomSource, Registry, SharedRandom, TypeDescriptor,
};
