//! The built-in factory catalogue.

use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;

use super::nullable::{NullableMode, NullableWrapper};
use super::primitives::{
	BoolFactory, CharFactory, F32Factory, F64Factory, I8Factory, I16Factory, I32Factory,
	I64Factory, StringFactory,
};
use super::time::{
	InstantFactory, LegacyDateFactory, LocalDateFactory, LocalDateTimeFactory, LocalTimeFactory,
	OffsetDateTimeFactory, OffsetTime, OffsetTimeFactory, ZonedDateTimeFactory,
};
use super::{InstanceFactory, NonNullableFactory};
use crate::registry::FactorySet;

/// Number of leaf types covered by the default catalogue.
///
/// Each contributes one non-nullable and one nullable factory.
pub const DEFAULT_LEAF_TYPES: usize = 17;

static DEFAULT_FACTORIES: Lazy<FactorySet> = Lazy::new(|| {
	let mut factories = Vec::with_capacity(DEFAULT_LEAF_TYPES * 2);

	push_pair::<i32, _>(&mut factories, I32Factory);
	push_pair::<bool, _>(&mut factories, BoolFactory);
	push_pair::<f32, _>(&mut factories, F32Factory);
	push_pair::<f64, _>(&mut factories, F64Factory);
	push_pair::<i64, _>(&mut factories, I64Factory);
	push_pair::<i16, _>(&mut factories, I16Factory);
	push_pair::<i8, _>(&mut factories, I8Factory);
	push_pair::<String, _>(&mut factories, StringFactory);
	push_pair::<char, _>(&mut factories, CharFactory);

	push_pair::<DateTime<Utc>, _>(&mut factories, InstantFactory);
	push_pair::<SystemTime, _>(&mut factories, LegacyDateFactory::default());
	push_pair::<NaiveDate, _>(&mut factories, LocalDateFactory::default());
	push_pair::<NaiveTime, _>(&mut factories, LocalTimeFactory::default());
	push_pair::<NaiveDateTime, _>(&mut factories, LocalDateTimeFactory::default());
	push_pair::<DateTime<Tz>, _>(&mut factories, ZonedDateTimeFactory::default());
	push_pair::<DateTime<FixedOffset>, _>(&mut factories, OffsetDateTimeFactory::default());
	push_pair::<OffsetTime, _>(&mut factories, OffsetTimeFactory::default());

	FactorySet::from(factories)
});

fn push_pair<T, F>(factories: &mut Vec<InstanceFactory>, factory: F)
where
	T: Send + 'static,
	F: NonNullableFactory<T> + 'static,
{
	let shared: Arc<dyn NonNullableFactory<T>> = Arc::new(factory);
	factories.push(InstanceFactory::from_non_nullable_arc(Arc::clone(&shared)));
	factories.push(InstanceFactory::nullable(NullableWrapper::new(
		shared,
		NullableMode::Random,
	)));
}

/// The shared default factory set.
///
/// Every call returns a handle to the same underlying set, which lets the
/// registry recognise it by identity and skip validation.
pub fn default_factories() -> FactorySet {
	DEFAULT_FACTORIES.clone()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::TypeDescriptor;
	use crate::factory::Capability;
	use rstest::rstest;
	use std::collections::HashSet;

	#[rstest]
	fn test_catalogue_size() {
		assert_eq!(default_factories().len(), DEFAULT_LEAF_TYPES * 2);
	}

	#[rstest]
	fn test_catalogue_descriptors_are_unique() {
		let descriptors: HashSet<TypeDescriptor> =
			default_factories().iter().map(|f| f.descriptor()).collect();

		assert_eq!(descriptors.len(), DEFAULT_LEAF_TYPES * 2);
	}

	#[rstest]
	fn test_catalogue_is_consistent() {
		for factory in default_factories().iter() {
			assert_eq!(
				factory.descriptor().is_nullable(),
				factory.capability() == Capability::Nullable
			);
			assert_eq!(factory.descriptor().base(), factory.produces());
		}
	}

	#[rstest]
	fn test_handles_share_identity() {
		assert!(default_factories().is_defaults());
		assert!(default_factories().ptr_eq(&default_factories()));
	}
}
