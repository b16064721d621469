//! Factory registry for random test-fixture generation.
//!
//! This crate maps a [`TypeDescriptor`] (a type plus a nullability bit) to an
//! [`InstanceFactory`] that produces random but valid values of that type:
//!
//! - **Descriptors**: type identity keys, distinct for `T` and nullable `T`
//! - **Factories**: non-nullable and nullable capability variants
//! - **Nullable wrapping**: derive a nullable factory from a non-nullable one
//! - **Default catalogue**: integers, floats, booleans, characters, strings
//!   and `chrono` date/time types
//! - **Registry**: validates, deduplicates and completes a factory set
//! - **Configuration**: a frozen registry plus behavioural flags and a
//!   random source
//!
//! # Quick Start
//!
//! ```
//! use fixgen_registry::prelude::*;
//!
//! let config = Configuration::builder().seed(7).build()?;
//!
//! let name: String = config.create().unwrap();
//! assert_eq!(name.len(), 10);
//!
//! let maybe_port: Option<Option<i32>> = config.create_nullable();
//! assert!(maybe_port.is_some());
//! # Ok::<(), FixgenError>(())
//! ```
//!
//! ## Custom factories
//!
//! ```
//! use fixgen_registry::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct UserId(u64);
//!
//! struct UserIdFactory;
//!
//! impl NonNullableFactory<UserId> for UserIdFactory {
//! 	fn create_instance(&self, random: &mut RandomSource) -> UserId {
//! 		UserId(random.next_i64().unsigned_abs())
//! 	}
//! }
//!
//! let base = Configuration::new();
//! let config = base.add([InstanceFactory::non_nullable(UserIdFactory)])?;
//!
//! // A nullable counterpart is synthesized automatically.
//! assert!(config.resolve(&TypeDescriptor::nullable::<UserId>()).is_some());
//! assert_eq!(config.registry().len(), base.registry().len() + 2);
//! # Ok::<(), FixgenError>(())
//! ```
//!
//! # Architecture
//!
//! - [`TypeDescriptor`](descriptor::TypeDescriptor) - Registry key
//! - [`RandomSource`](random::RandomSource) - Explicit random source
//! - [`NonNullableFactory`](factory::NonNullableFactory) /
//!   [`NullableFactory`](factory::NullableFactory) - Factory traits
//! - [`NullableWrapper`](factory::NullableWrapper) - Nullable-wrapping adapter
//! - [`Registry`](registry::Registry) - Validated descriptor index
//! - [`Configuration`](config::Configuration) - Immutable session bundle
//! - [`FixgenSettings`](settings::FixgenSettings) - Serializable flags

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod prelude;
pub mod random;
pub mod registry;
pub mod settings;

// Re-export commonly used types at crate root
pub use config::{Configuration, ConfigurationBuilder};
pub use descriptor::TypeDescriptor;
pub use error::{FixgenError, FixgenResult};
pub use factory::{
	Capability, Generated, InstanceFactory, NonNullableFactory, NullableFactory, NullableMode,
};
pub use random::{RandomSource, SharedRandom};
pub use registry::{FactorySet, Registry};
pub use settings::FixgenSettings;
