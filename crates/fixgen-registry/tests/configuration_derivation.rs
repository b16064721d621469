//! Derivation and reproducibility of configurations.

mod helpers;

use fixgen_registry::prelude::*;
use helpers::{Sku, SkuFactory, default_entry_count, seeded_config};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
fn test_add_new_type_grows_registry_by_two(seeded_config: Configuration) {
	let derived = seeded_config
		.add([InstanceFactory::non_nullable(SkuFactory)])
		.unwrap();

	assert_eq!(derived.registry().len(), default_entry_count() + 2);
	assert_eq!(seeded_config.registry().len(), default_entry_count());
	assert!(seeded_config.resolve(&TypeDescriptor::of::<Sku>()).is_none());
	assert!(derived.create::<Sku>().unwrap().0.starts_with("SKU-"));
}

#[rstest]
fn test_add_existing_type_overrides_without_growth(seeded_config: Configuration) {
	let derived = seeded_config
		.add([from_fn(|_random| String::from("fixed"))])
		.unwrap();

	assert_eq!(derived.registry().len(), default_entry_count());
	assert_eq!(derived.create::<String>().as_deref(), Some("fixed"));
	assert_ne!(seeded_config.create::<String>().as_deref(), Some("fixed"));
}

#[rstest]
fn test_non_nullable_override_keeps_existing_nullable(seeded_config: Configuration) {
	let derived = seeded_config.add([from_fn(|_random| 42_i32)]).unwrap();
	let nullable_i32 = TypeDescriptor::nullable::<i32>();

	assert_eq!(derived.create::<i32>(), Some(42));
	assert!(
		derived
			.resolve(&nullable_i32)
			.unwrap()
			.ptr_eq(seeded_config.resolve(&nullable_i32).unwrap())
	);
}

#[rstest]
fn test_overriding_both_variants_replaces_nullable(seeded_config: Configuration) {
	let fixed = from_fn(|_random| 42_i32);
	let fixed_nullable = wrap(&fixed, NullableMode::NeverAbsent).unwrap();
	let derived = seeded_config.add([fixed, fixed_nullable]).unwrap();

	assert_eq!(derived.registry().len(), default_entry_count());
	assert_eq!(derived.create_nullable::<i32>(), Some(Some(42)));
}

#[rstest]
fn test_override_leaves_other_types_untouched(seeded_config: Configuration) {
	let derived = seeded_config.add([from_fn(|_random| 7_i64)]).unwrap();
	let bool_descriptor = TypeDescriptor::of::<bool>();

	assert!(
		derived
			.resolve(&bool_descriptor)
			.unwrap()
			.ptr_eq(seeded_config.resolve(&bool_descriptor).unwrap())
	);
}

#[rstest]
fn test_add_keeps_base_flags() {
	let base = Configuration::builder()
		.seed(1)
		.prefer_absent(true)
		.collection_size(12)
		.build()
		.unwrap();
	let derived = base.add([InstanceFactory::non_nullable(SkuFactory)]).unwrap();

	assert!(base.prefer_absent());
	assert_eq!(base.collection_size(), 12);
	assert_eq!(derived.prefer_absent(), base.prefer_absent());
	assert_eq!(derived.collection_size(), base.collection_size());
	assert_eq!(
		derived.use_default_arguments(),
		base.use_default_arguments()
	);
}

#[rstest]
fn test_chained_derivation() {
	let base = Configuration::new();
	let first = base.add([InstanceFactory::non_nullable(SkuFactory)]).unwrap();
	let second = first.add([from_fn(|_random| 0_u8)]).unwrap();

	assert_eq!(base.registry().len(), default_entry_count());
	assert_eq!(first.registry().len(), default_entry_count() + 2);
	assert_eq!(second.registry().len(), default_entry_count() + 4);
}

#[rstest]
fn test_shared_random_source_across_configurations() {
	let random = RandomSource::seeded(5).into_shared();
	let first = Configuration::builder()
		.random(random.clone())
		.build()
		.unwrap();
	let second = Configuration::builder()
		.random(random.clone())
		.build()
		.unwrap();
	let mut reference = RandomSource::seeded(5);

	assert_eq!(first.create::<i32>(), Some(reference.next_i32()));
	assert_eq!(second.create::<i32>(), Some(reference.next_i32()));
}

#[rstest]
fn test_settings_from_json_drive_configuration() {
	let settings =
		FixgenSettings::from_json_str(r#"{ "use_default_arguments": false, "seed": 11 }"#)
			.unwrap();
	let config = Configuration::builder().settings(&settings).build().unwrap();
	let mut reference = RandomSource::seeded(11);

	assert!(!config.use_default_arguments());
	assert_eq!(config.create::<i64>(), Some(reference.next_i64()));
}

fn draw_sequence(config: &Configuration) -> Vec<String> {
	(0..8)
		.map(|_| {
			format!(
				"{:?}|{:?}|{:?}|{:?}",
				config.create::<String>(),
				config.create_nullable::<i32>(),
				config.create::<chrono::NaiveDateTime>(),
				config.create::<chrono::DateTime<chrono_tz::Tz>>(),
			)
		})
		.collect()
}

proptest! {
	#[test]
	fn identically_seeded_configurations_agree(seed in any::<u64>()) {
		let first = Configuration::builder().seed(seed).build().unwrap();
		let second = Configuration::builder().seed(seed).build().unwrap();

		prop_assert_eq!(draw_sequence(&first), draw_sequence(&second));
	}

	#[test]
	fn derived_configuration_size_counts_new_descriptors(extra in 0_usize..3) {
		let base = Configuration::new();
		let additions: Vec<InstanceFactory> = [
			from_fn(|_random| 1_u8),
			from_fn(|_random| 1_u16),
			from_fn(|_random| 1_u32),
		]
		.into_iter()
		.take(extra)
		.collect();

		let derived = base.add(additions).unwrap();

		prop_assert_eq!(derived.registry().len(), default_entry_count() + 2 * extra);
		prop_assert_eq!(base.registry().len(), default_entry_count());
	}
}
