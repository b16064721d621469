//! Immutable configurations bundling a registry, a random source and flags.
//!
//! # Example
//!
//! ```
//! use fixgen_registry::factory::from_fn;
//! use fixgen_registry::{Configuration, TypeDescriptor};
//!
//! let base = Configuration::builder().seed(42).build().unwrap();
//! let derived = base.add([from_fn(|_random| 8080_u16)]).unwrap();
//!
//! assert_eq!(derived.registry().len(), base.registry().len() + 2);
//! assert_eq!(derived.create::<u16>(), Some(8080));
//! assert!(base.resolve(&TypeDescriptor::of::<u16>()).is_none());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;
use crate::error::FixgenResult;
use crate::factory::{Generated, InstanceFactory};
use crate::random::{RandomSource, SharedRandom};
use crate::registry::{FactorySet, Registry};
use crate::settings::FixgenSettings;

/// Registry plus behavioural flags for one instantiation session.
///
/// A configuration never changes after construction. [`add`](Self::add)
/// returns a new configuration and leaves the receiver untouched; both keep
/// sharing the same random source.
#[derive(Clone)]
pub struct Configuration {
	registry: Arc<Registry>,
	random: SharedRandom,
	use_default_arguments: bool,
	prefer_absent: bool,
	collection_size: usize,
}

impl Configuration {
	/// Configuration over the default factory set with default flags and an
	/// entropy-seeded random source.
	pub fn new() -> Self {
		let settings = FixgenSettings::default();
		Self {
			registry: Arc::new(Registry::defaults()),
			random: RandomSource::from_entropy().into_shared(),
			use_default_arguments: settings.use_default_arguments,
			prefer_absent: settings.prefer_absent,
			collection_size: settings.collection_size,
		}
	}

	/// Starts a [`ConfigurationBuilder`].
	pub fn builder() -> ConfigurationBuilder {
		ConfigurationBuilder::new()
	}

	/// Derives a configuration whose factories are this one's followed by
	/// `factories`.
	///
	/// Factories for already registered types override them; every other
	/// entry and every flag carries over.
	///
	/// Overrides are per descriptor. Adding only a non-nullable factory for a
	/// type that already has a nullable one leaves that nullable factory in
	/// place, still delegating to the previous non-nullable factory. Add a
	/// nullable factory as well, for example via
	/// [`wrap`](crate::factory::wrap), to override both.
	///
	/// # Errors
	///
	/// Fails if the combined set does not pass [`Registry::build`].
	pub fn add<I>(&self, factories: I) -> FixgenResult<Self>
	where
		I: IntoIterator<Item = InstanceFactory>,
	{
		let combined = self.registry.factories().extended(factories);
		let registry = Registry::build(&combined)?;
		tracing::debug!(
			"Derived configuration: {} -> {} registry entries",
			self.registry.len(),
			registry.len()
		);
		Ok(Self {
			registry: Arc::new(registry),
			random: Arc::clone(&self.random),
			..*self
		})
	}

	/// Factory registered for exactly `descriptor`, if any.
	pub fn resolve(&self, descriptor: &TypeDescriptor) -> Option<&InstanceFactory> {
		self.registry.resolve(descriptor)
	}

	/// The frozen registry.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Whether default constructor arguments should be honoured.
	pub fn use_default_arguments(&self) -> bool {
		self.use_default_arguments
	}

	/// Whether absent values should be preferred for nullable types.
	pub fn prefer_absent(&self) -> bool {
		self.prefer_absent
	}

	/// Number of elements for multi-element containers.
	pub fn collection_size(&self) -> usize {
		self.collection_size
	}

	/// The random source shared by every factory call of this configuration.
	pub fn random(&self) -> &SharedRandom {
		&self.random
	}

	/// Invokes the factory registered for `descriptor`.
	pub fn generate(&self, descriptor: &TypeDescriptor) -> Option<Generated> {
		let factory = self.resolve(descriptor)?;
		Some(factory.generate(&mut self.random.lock()))
	}

	/// Produces a `T` from the non-nullable factory registered for it.
	pub fn create<T: 'static>(&self) -> Option<T> {
		let factory = self
			.resolve(&TypeDescriptor::of::<T>())?
			.as_non_nullable::<T>()?;
		Some(factory.create_instance(&mut self.random.lock()))
	}

	/// Produces an optional `T` from the nullable factory registered for it.
	///
	/// The outer `Option` is `None` when no nullable factory is registered.
	pub fn create_nullable<T: 'static>(&self) -> Option<Option<T>> {
		let factory = self
			.resolve(&TypeDescriptor::nullable::<T>())?
			.as_nullable::<T>()?;
		Some(factory.create_instance(&mut self.random.lock()))
	}
}

impl Default for Configuration {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Configuration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Configuration")
			.field("registry", &self.registry)
			.field("use_default_arguments", &self.use_default_arguments)
			.field("prefer_absent", &self.prefer_absent)
			.field("collection_size", &self.collection_size)
			.finish_non_exhaustive()
	}
}

/// Builder for [`Configuration`].
#[derive(Debug)]
pub struct ConfigurationBuilder {
	factories: Vec<InstanceFactory>,
	replace_defaults: bool,
	random: Option<SharedRandom>,
	seed: Option<u64>,
	use_default_arguments: bool,
	prefer_absent: bool,
	collection_size: usize,
}

impl ConfigurationBuilder {
	/// Builder with default flags and the default factory set.
	pub fn new() -> Self {
		let settings = FixgenSettings::default();
		Self {
			factories: Vec::new(),
			replace_defaults: false,
			random: None,
			seed: settings.seed,
			use_default_arguments: settings.use_default_arguments,
			prefer_absent: settings.prefer_absent,
			collection_size: settings.collection_size,
		}
	}

	/// Appends one factory after the default set.
	pub fn factory(mut self, factory: InstanceFactory) -> Self {
		self.factories.push(factory);
		self
	}

	/// Appends factories after the default set.
	pub fn factories<I>(mut self, factories: I) -> Self
	where
		I: IntoIterator<Item = InstanceFactory>,
	{
		self.factories.extend(factories);
		self
	}

	/// Uses `factories` instead of the default set.
	pub fn replace_factories<I>(mut self, factories: I) -> Self
	where
		I: IntoIterator<Item = InstanceFactory>,
	{
		self.factories = factories.into_iter().collect();
		self.replace_defaults = true;
		self
	}

	/// Shares an existing random source. Takes precedence over [`seed`](Self::seed).
	pub fn random(mut self, random: SharedRandom) -> Self {
		self.random = Some(random);
		self
	}

	/// Seeds a fresh deterministic random source.
	pub fn seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Sets whether default constructor arguments are honoured.
	pub fn use_default_arguments(mut self, enabled: bool) -> Self {
		self.use_default_arguments = enabled;
		self
	}

	/// Sets whether absent values are preferred.
	pub fn prefer_absent(mut self, enabled: bool) -> Self {
		self.prefer_absent = enabled;
		self
	}

	/// Sets the container fill count.
	pub fn collection_size(mut self, size: usize) -> Self {
		self.collection_size = size;
		self
	}

	/// Applies every field of `settings`.
	pub fn settings(mut self, settings: &FixgenSettings) -> Self {
		self.use_default_arguments = settings.use_default_arguments;
		self.prefer_absent = settings.prefer_absent;
		self.collection_size = settings.collection_size;
		if let Some(seed) = settings.seed {
			self.seed = Some(seed);
		}
		self
	}

	/// Builds the registry and freezes it into a configuration.
	///
	/// # Errors
	///
	/// Fails if the factory set does not pass [`Registry::build`].
	pub fn build(self) -> FixgenResult<Configuration> {
		let set = if self.replace_defaults {
			FactorySet::from(self.factories)
		} else if self.factories.is_empty() {
			FactorySet::defaults()
		} else {
			FactorySet::defaults().extended(self.factories)
		};
		let registry = Registry::build(&set)?;

		if self.collection_size == 0 {
			tracing::warn!("Collection size is 0; generated containers will be empty");
		}

		let random = match (self.random, self.seed) {
			(Some(random), _) => random,
			(None, Some(seed)) => RandomSource::seeded(seed).into_shared(),
			(None, None) => RandomSource::from_entropy().into_shared(),
		};

		Ok(Configuration {
			registry: Arc::new(registry),
			random,
			use_default_arguments: self.use_default_arguments,
			prefer_absent: self.prefer_absent,
			collection_size: self.collection_size,
		})
	}
}

impl Default for ConfigurationBuilder {
	fn default() -> Self {
		Self::new()
	}
}
