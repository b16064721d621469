//! Shared test helpers for fixgen-registry integration tests.
//!
//! Provides small domain types with hand-written factories, standing in for
//! the user-defined factories a test suite would register.

#![allow(dead_code)]

use fixgen_registry::prelude::*;
use rstest::fixture;

/// A type that no default factory covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sku(pub String);

/// Non-nullable factory for [`Sku`].
pub struct SkuFactory;

impl NonNullableFactory<Sku> for SkuFactory {
	fn create_instance(&self, random: &mut RandomSource) -> Sku {
		Sku(format!("SKU-{:06}", random.next_i32_in(0..1_000_000)))
	}
}

/// Nullable factory for [`Sku`] that never produces a value.
pub struct NoSkuFactory;

impl NullableFactory<Sku> for NoSkuFactory {
	fn create_instance(&self, _random: &mut RandomSource) -> Option<Sku> {
		None
	}
}

/// Number of entries in a registry built from the default set.
pub fn default_entry_count() -> usize {
	fixgen_registry::factory::DEFAULT_LEAF_TYPES * 2
}

/// Seeded configuration over the default set.
#[fixture]
pub fn seeded_config() -> Configuration {
	Configuration::builder()
		.seed(0x5eed)
		.build()
		.expect("default configuration builds")
}
