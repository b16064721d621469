//! Registry construction and resolution.
//!
//! [`Registry::build`] turns an ordered list of factories into an immutable
//! map from [`TypeDescriptor`] to [`InstanceFactory`]:
//!
//! 1. Every factory's advertised nullability must match its capability
//!    variant, and its descriptor must name the type it produces.
//! 2. Factories are split into non-nullable and nullable buckets and
//!    deduplicated by base type; the last one listed wins.
//! 3. A non-nullable factory without a nullable counterpart gets one
//!    synthesized in [`NullableMode::Random`].
//! 4. The completed set is indexed by full descriptor.
//!
//! The shared default set is already complete and consistent, so it is
//! indexed directly.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;
use crate::error::{FixgenError, FixgenResult};
use crate::factory::{InstanceFactory, NullableMode, default_factories};

/// Ordered, immutable list of factories fed to [`Registry::build`].
#[derive(Clone)]
pub struct FactorySet(Arc<[InstanceFactory]>);

impl FactorySet {
	/// The shared default factory set.
	pub fn defaults() -> Self {
		default_factories()
	}

	/// Whether this is the shared default set itself, not merely an equal list.
	pub fn is_defaults(&self) -> bool {
		self.ptr_eq(&default_factories())
	}

	/// Returns true if both handles refer to the same underlying list.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	/// A new set holding this set's factories followed by `more`.
	pub fn extended<I>(&self, more: I) -> Self
	where
		I: IntoIterator<Item = InstanceFactory>,
	{
		self.iter().cloned().chain(more).collect()
	}

	/// Iterates in registration order.
	pub fn iter(&self) -> std::slice::Iter<'_, InstanceFactory> {
		self.0.iter()
	}

	/// Number of factories, duplicates included.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the set holds no factories.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<InstanceFactory>> for FactorySet {
	fn from(factories: Vec<InstanceFactory>) -> Self {
		Self(factories.into())
	}
}

impl FromIterator<InstanceFactory> for FactorySet {
	fn from_iter<I: IntoIterator<Item = InstanceFactory>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<'a> IntoIterator for &'a FactorySet {
	type Item = &'a InstanceFactory;
	type IntoIter = std::slice::Iter<'a, InstanceFactory>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Debug for FactorySet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

/// Immutable mapping from descriptor to factory.
#[derive(Clone)]
pub struct Registry {
	entries: HashMap<TypeDescriptor, InstanceFactory>,
	factories: FactorySet,
}

impl Registry {
	/// Registry over the default factory set.
	pub fn defaults() -> Self {
		Self::index_trusted(default_factories())
	}

	/// Validates, completes and indexes `factories`.
	///
	/// # Errors
	///
	/// - [`FixgenError::CapabilityMismatch`] if a factory's descriptor
	///   disagrees with its capability variant.
	/// - [`FixgenError::OutputTypeMismatch`] if a factory's descriptor names a
	///   type other than the one it produces.
	/// - [`FixgenError::DuplicateDescriptor`] if two factories end up under the
	///   same descriptor.
	///
	/// # Examples
	///
	/// ```
	/// use fixgen_registry::factory::from_fn;
	/// use fixgen_registry::{FactorySet, Registry, TypeDescriptor};
	///
	/// let set = FactorySet::from(vec![from_fn(|random| random.next_i32() as u64)]);
	/// let registry = Registry::build(&set).unwrap();
	///
	/// assert_eq!(registry.len(), 2);
	/// assert!(registry.contains(&TypeDescriptor::nullable::<u64>()));
	/// ```
	pub fn build(factories: &FactorySet) -> FixgenResult<Self> {
		if factories.is_defaults() {
			tracing::debug!(
				"Indexing default factory set ({} factories) without validation",
				factories.len()
			);
			return Ok(Self::index_trusted(factories.clone()));
		}

		let mut non_nullable = Vec::new();
		let mut nullable = Vec::new();
		for factory in factories {
			validate(factory)?;
			if factory.descriptor().is_nullable() {
				nullable.push(factory.clone());
			} else {
				non_nullable.push(factory.clone());
			}
		}

		let non_nullable = dedupe_by_base(non_nullable);
		let nullable = dedupe_by_base(nullable);

		let covered: HashSet<TypeDescriptor> = nullable
			.iter()
			.map(|factory| factory.descriptor().base())
			.collect();
		let synthesized: Vec<InstanceFactory> = non_nullable
			.iter()
			.filter(|factory| !covered.contains(&factory.descriptor().base()))
			.filter_map(|factory| {
				tracing::trace!(
					"Synthesizing nullable factory for {}",
					factory.descriptor()
				);
				factory.wrap_nullable(NullableMode::Random)
			})
			.collect();

		let completed: FactorySet = non_nullable
			.into_iter()
			.chain(nullable)
			.chain(synthesized)
			.collect();

		let mut entries = HashMap::with_capacity(completed.len());
		for factory in &completed {
			match entries.entry(factory.descriptor()) {
				Entry::Occupied(occupied) => {
					return Err(FixgenError::DuplicateDescriptor(*occupied.key()));
				}
				Entry::Vacant(vacant) => {
					vacant.insert(factory.clone());
				}
			}
		}

		tracing::debug!(
			"Built registry with {} entries from {} factories",
			entries.len(),
			factories.len()
		);

		Ok(Self {
			entries,
			factories: completed,
		})
	}

	fn index_trusted(factories: FactorySet) -> Self {
		let entries = factories
			.iter()
			.map(|factory| (factory.descriptor(), factory.clone()))
			.collect();
		Self { entries, factories }
	}

	/// Factory registered for exactly `descriptor`, if any.
	pub fn resolve(&self, descriptor: &TypeDescriptor) -> Option<&InstanceFactory> {
		self.entries.get(descriptor)
	}

	/// Whether a factory is registered for exactly `descriptor`.
	pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
		self.entries.contains_key(descriptor)
	}

	/// Number of registered descriptors.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// All registered descriptors, in no particular order.
	pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
		self.entries.keys()
	}

	/// The completed factory set backing this registry.
	///
	/// Feeding it back into [`Registry::build`] reproduces the same entries.
	pub fn factories(&self) -> &FactorySet {
		&self.factories
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("len", &self.entries.len())
			.field("defaults", &self.factories.is_defaults())
			.finish()
	}
}

fn validate(factory: &InstanceFactory) -> FixgenResult<()> {
	let descriptor = factory.descriptor();
	if descriptor.is_nullable() != factory.capability().is_nullable() {
		return Err(FixgenError::CapabilityMismatch {
			descriptor,
			capability: factory.capability(),
		});
	}
	let produced = factory.produces();
	if descriptor.base() != produced {
		return Err(FixgenError::OutputTypeMismatch {
			descriptor,
			produced: produced.type_name(),
		});
	}
	Ok(())
}

/// Keeps one factory per base type, the last listed, at the position of the first.
fn dedupe_by_base(bucket: Vec<InstanceFactory>) -> Vec<InstanceFactory> {
	let mut positions: HashMap<TypeDescriptor, usize> = HashMap::with_capacity(bucket.len());
	let mut kept: Vec<InstanceFactory> = Vec::with_capacity(bucket.len());
	for factory in bucket {
		let base = factory.descriptor().base();
		match positions.entry(base) {
			Entry::Occupied(position) => {
				tracing::trace!("Overriding factory for {}", factory.descriptor());
				kept[*position.get()] = factory;
			}
			Entry::Vacant(position) => {
				position.insert(kept.len());
				kept.push(factory);
			}
		}
	}
	kept
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::factory::{
		Capability, DEFAULT_LEAF_TYPES, NonNullableFactory, NullableFactory, from_fn,
		nullable_from_fn,
	};
	use crate::random::RandomSource;
	use rstest::rstest;

	struct Liar;

	impl NonNullableFactory<u16> for Liar {
		fn descriptor(&self) -> TypeDescriptor {
			TypeDescriptor::nullable::<u16>()
		}

		fn create_instance(&self, _random: &mut RandomSource) -> u16 {
			0
		}
	}

	struct NullableLiar;

	impl NullableFactory<u16> for NullableLiar {
		fn descriptor(&self) -> TypeDescriptor {
			TypeDescriptor::of::<u16>()
		}

		fn create_instance(&self, _random: &mut RandomSource) -> Option<u16> {
			None
		}
	}

	struct WrongType;

	impl NonNullableFactory<u16> for WrongType {
		fn descriptor(&self) -> TypeDescriptor {
			TypeDescriptor::of::<u32>()
		}

		fn create_instance(&self, _random: &mut RandomSource) -> u16 {
			0
		}
	}

	#[rstest]
	fn test_defaults_take_fast_path() {
		let registry = Registry::build(&FactorySet::defaults()).unwrap();

		assert_eq!(registry.len(), DEFAULT_LEAF_TYPES * 2);
		assert!(registry.factories().is_defaults());
	}

	#[rstest]
	fn test_copy_of_defaults_takes_general_path() {
		let copy: FactorySet = FactorySet::defaults().iter().cloned().collect();
		assert!(!copy.is_defaults());

		let registry = Registry::build(&copy).unwrap();

		assert_eq!(registry.len(), DEFAULT_LEAF_TYPES * 2);
		assert!(!registry.factories().is_defaults());
	}

	#[rstest]
	fn test_single_custom_factory_gets_nullable_wrapper() {
		let custom = from_fn(|random| random.next_i32() as u32);
		let registry = Registry::build(&FactorySet::from(vec![custom.clone()])).unwrap();

		assert_eq!(registry.len(), 2);
		assert!(
			registry
				.resolve(&TypeDescriptor::of::<u32>())
				.unwrap()
				.ptr_eq(&custom)
		);
		let synthesized = registry
			.resolve(&TypeDescriptor::nullable::<u32>())
			.unwrap();
		assert_eq!(synthesized.capability(), Capability::Nullable);
	}

	#[rstest]
	fn test_user_nullable_factory_is_kept() {
		let plain = from_fn(|_random| 1_u32);
		let nullable = nullable_from_fn(|_random| None::<u32>);
		let registry =
			Registry::build(&FactorySet::from(vec![nullable.clone(), plain.clone()])).unwrap();

		assert_eq!(registry.len(), 2);
		assert!(
			registry
				.resolve(&TypeDescriptor::of::<u32>())
				.unwrap()
				.ptr_eq(&plain)
		);
		assert!(
			registry
				.resolve(&TypeDescriptor::nullable::<u32>())
				.unwrap()
				.ptr_eq(&nullable)
		);
	}

	#[rstest]
	fn test_nullable_only_registration() {
		let nullable = nullable_from_fn(|_random| Some(3_u32));
		let registry = Registry::build(&FactorySet::from(vec![nullable])).unwrap();

		assert_eq!(registry.len(), 1);
		assert!(!registry.contains(&TypeDescriptor::of::<u32>()));
	}

	#[rstest]
	fn test_last_listed_factory_wins() {
		let first = from_fn(|_random| 1_u32);
		let second = from_fn(|_random| 2_u32);
		let registry =
			Registry::build(&FactorySet::from(vec![first, second.clone()])).unwrap();

		assert_eq!(registry.len(), 2);
		assert!(
			registry
				.resolve(&TypeDescriptor::of::<u32>())
				.unwrap()
				.ptr_eq(&second)
		);
	}

	#[rstest]
	fn test_synthesized_wrapper_follows_override() {
		let second = from_fn(|_random| 2_u32);
		let registry =
			Registry::build(&FactorySet::from(vec![from_fn(|_random| 1_u32), second])).unwrap();
		let wrapper = registry
			.resolve(&TypeDescriptor::nullable::<u32>())
			.unwrap()
			.as_nullable::<u32>()
			.unwrap();
		let mut random = RandomSource::seeded(8);

		let values: Vec<Option<u32>> = (0..100)
			.map(|_| wrapper.create_instance(&mut random))
			.collect();
		assert!(values.iter().flatten().all(|&value| value == 2));
	}

	#[rstest]
	#[case::non_nullable_claims_nullable(InstanceFactory::non_nullable(Liar), Capability::NonNullable)]
	#[case::nullable_claims_non_nullable(InstanceFactory::nullable(NullableLiar), Capability::Nullable)]
	fn test_capability_mismatch_fails(
		#[case] factory: InstanceFactory,
		#[case] expected: Capability,
	) {
		let result = Registry::build(&FactorySet::from(vec![factory]));

		match result {
			Err(FixgenError::CapabilityMismatch { capability, .. }) => {
				assert_eq!(capability, expected)
			}
			other => panic!("expected capability mismatch, got {other:?}"),
		}
	}

	#[rstest]
	fn test_output_type_mismatch_fails() {
		let result = Registry::build(&FactorySet::from(vec![InstanceFactory::non_nullable(
			WrongType,
		)]));

		assert!(matches!(
			result,
			Err(FixgenError::OutputTypeMismatch { produced: "u16", .. })
		));
	}

	#[rstest]
	fn test_rebuild_from_completed_set_is_stable() {
		let registry =
			Registry::build(&FactorySet::from(vec![from_fn(|_random| 'x')])).unwrap();
		let rebuilt = Registry::build(registry.factories()).unwrap();

		assert_eq!(rebuilt.len(), registry.len());
		for descriptor in registry.descriptors() {
			assert!(
				rebuilt
					.resolve(descriptor)
					.unwrap()
					.ptr_eq(registry.resolve(descriptor).unwrap())
			);
		}
	}

	#[rstest]
	fn test_empty_set_builds_empty_registry() {
		let registry = Registry::build(&FactorySet::from(Vec::new())).unwrap();

		assert!(registry.is_empty());
		assert!(registry.resolve(&TypeDescriptor::of::<i32>()).is_none());
	}
}
