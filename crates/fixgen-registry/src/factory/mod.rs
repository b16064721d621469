//! Instance factories.
//!
//! A factory produces values of one type from a [`RandomSource`]. There are
//! two capability variants:
//!
//! - [`NonNullableFactory`] always produces a value.
//! - [`NullableFactory`] may produce `None`.
//!
//! Registries store factories type-erased as [`InstanceFactory`], which
//! remembers the capability variant the factory was registered with. The
//! registry checks that variant against the descriptor the factory advertises.
//!
//! # Example
//!
//! ```
//! use fixgen_registry::factory::{InstanceFactory, NonNullableFactory};
//! use fixgen_registry::{RandomSource, TypeDescriptor};
//!
//! struct PortFactory;
//!
//! impl NonNullableFactory<u16> for PortFactory {
//! 	fn create_instance(&self, random: &mut RandomSource) -> u16 {
//! 		1024 + (random.next_i32_in(0..64_511) as u16)
//! 	}
//! }
//!
//! let factory = InstanceFactory::non_nullable(PortFactory);
//! assert_eq!(factory.descriptor(), TypeDescriptor::of::<u16>());
//! ```

pub mod defaults;
pub mod nullable;
pub mod primitives;
pub mod time;

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;
use crate::random::RandomSource;

pub use defaults::{DEFAULT_LEAF_TYPES, default_factories};
pub use nullable::{NullableMode, NullableWrapper, wrap};
pub use primitives::{
	BoolFactory, CharFactory, F32Factory, F64Factory, I8Factory, I16Factory, I32Factory,
	I64Factory, StringFactory,
};
pub use time::{
	InstantFactory, LegacyDateFactory, LocalDateFactory, LocalDateTimeFactory, LocalTimeFactory,
	OffsetDateTimeFactory, OffsetTime, OffsetTimeFactory, ZonedDateTimeFactory,
};

/// Factory that always produces a value.
///
/// Panicking inside `create_instance` is a defect in the factory; the panic
/// propagates to the caller unchanged.
pub trait NonNullableFactory<T: 'static>: Send + Sync {
	/// Descriptor this factory serves.
	fn descriptor(&self) -> TypeDescriptor {
		TypeDescriptor::of::<T>()
	}

	/// Produces a value, consuming randomness only from `random`.
	fn create_instance(&self, random: &mut RandomSource) -> T;
}

/// Factory that may produce an absent value.
pub trait NullableFactory<T: 'static>: Send + Sync {
	/// Descriptor this factory serves.
	fn descriptor(&self) -> TypeDescriptor {
		TypeDescriptor::nullable::<T>()
	}

	/// Produces a value or `None`, consuming randomness only from `random`.
	fn create_instance(&self, random: &mut RandomSource) -> Option<T>;
}

/// Capability variant an [`InstanceFactory`] was registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
	/// Always produces a value.
	NonNullable,
	/// May produce an absent value.
	Nullable,
}

impl Capability {
	/// Whether descriptors served by this capability must be nullable.
	pub fn is_nullable(self) -> bool {
		matches!(self, Self::Nullable)
	}
}

impl fmt::Display for Capability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NonNullable => f.write_str("non-nullable"),
			Self::Nullable => f.write_str("nullable"),
		}
	}
}

/// Output of a type-erased factory invocation.
pub enum Generated {
	/// A concrete value.
	Value(Box<dyn Any + Send>),
	/// The absent marker.
	Absent,
}

impl Generated {
	/// Returns true for [`Generated::Absent`].
	pub fn is_absent(&self) -> bool {
		matches!(self, Self::Absent)
	}

	/// Downcasts a concrete value.
	///
	/// Returns `Some(None)` for an absent value and `None` when the value is
	/// not a `T`.
	pub fn downcast<T: 'static>(self) -> Option<Option<T>> {
		match self {
			Self::Value(value) => value.downcast::<T>().ok().map(|value| Some(*value)),
			Self::Absent => Some(None),
		}
	}
}

impl fmt::Debug for Generated {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(_) => f.write_str("Generated::Value(..)"),
			Self::Absent => f.write_str("Generated::Absent"),
		}
	}
}

/// Type-erased factory wrapper.
trait ErasedFactory: Send + Sync {
	fn descriptor(&self) -> TypeDescriptor;

	/// Non-nullable descriptor of the type actually produced.
	fn produces(&self) -> TypeDescriptor;

	fn generate(&self, random: &mut RandomSource) -> Generated;

	fn wrap_nullable(&self, mode: NullableMode) -> Option<InstanceFactory>;

	fn as_any(&self) -> &dyn Any;
}

struct NonNullableEntry<T: 'static> {
	factory: Arc<dyn NonNullableFactory<T>>,
}

impl<T: Send + 'static> ErasedFactory for NonNullableEntry<T> {
	fn descriptor(&self) -> TypeDescriptor {
		self.factory.descriptor()
	}

	fn produces(&self) -> TypeDescriptor {
		TypeDescriptor::of::<T>()
	}

	fn generate(&self, random: &mut RandomSource) -> Generated {
		Generated::Value(Box::new(self.factory.create_instance(random)))
	}

	fn wrap_nullable(&self, mode: NullableMode) -> Option<InstanceFactory> {
		Some(InstanceFactory::nullable(NullableWrapper::new(
			Arc::clone(&self.factory),
			mode,
		)))
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

struct NullableEntry<T: 'static> {
	factory: Arc<dyn NullableFactory<T>>,
}

impl<T: Send + 'static> ErasedFactory for NullableEntry<T> {
	fn descriptor(&self) -> TypeDescriptor {
		self.factory.descriptor()
	}

	fn produces(&self) -> TypeDescriptor {
		TypeDescriptor::of::<T>()
	}

	fn generate(&self, random: &mut RandomSource) -> Generated {
		match self.factory.create_instance(random) {
			Some(value) => Generated::Value(Box::new(value)),
			None => Generated::Absent,
		}
	}

	fn wrap_nullable(&self, _mode: NullableMode) -> Option<InstanceFactory> {
		None
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// A registered factory of either capability variant.
///
/// Cloning is cheap and preserves identity: clones compare equal under
/// [`ptr_eq`](Self::ptr_eq).
#[derive(Clone)]
pub struct InstanceFactory {
	capability: Capability,
	inner: Arc<dyn ErasedFactory>,
}

impl InstanceFactory {
	/// Registers a factory under the non-nullable capability.
	pub fn non_nullable<T, F>(factory: F) -> Self
	where
		T: Send + 'static,
		F: NonNullableFactory<T> + 'static,
	{
		Self::from_non_nullable_arc(Arc::new(factory))
	}

	/// Registers an already shared non-nullable factory.
	pub fn from_non_nullable_arc<T: Send + 'static>(
		factory: Arc<dyn NonNullableFactory<T>>,
	) -> Self {
		Self {
			capability: Capability::NonNullable,
			inner: Arc::new(NonNullableEntry { factory }),
		}
	}

	/// Registers a factory under the nullable capability.
	pub fn nullable<T, F>(factory: F) -> Self
	where
		T: Send + 'static,
		F: NullableFactory<T> + 'static,
	{
		Self::from_nullable_arc(Arc::new(factory))
	}

	/// Registers an already shared nullable factory.
	pub fn from_nullable_arc<T: Send + 'static>(factory: Arc<dyn NullableFactory<T>>) -> Self {
		Self {
			capability: Capability::Nullable,
			inner: Arc::new(NullableEntry { factory }),
		}
	}

	/// Descriptor advertised by the underlying factory.
	pub fn descriptor(&self) -> TypeDescriptor {
		self.inner.descriptor()
	}

	/// Capability variant this factory was registered with.
	pub fn capability(&self) -> Capability {
		self.capability
	}

	/// Non-nullable descriptor of the type the factory actually produces.
	pub fn produces(&self) -> TypeDescriptor {
		self.inner.produces()
	}

	/// Invokes the factory without knowing its output type.
	pub fn generate(&self, random: &mut RandomSource) -> Generated {
		self.inner.generate(random)
	}

	/// Typed view of a non-nullable factory producing `T`.
	pub fn as_non_nullable<T: 'static>(&self) -> Option<Arc<dyn NonNullableFactory<T>>> {
		self.inner
			.as_any()
			.downcast_ref::<NonNullableEntry<T>>()
			.map(|entry| Arc::clone(&entry.factory))
	}

	/// Typed view of a nullable factory producing `T`.
	pub fn as_nullable<T: 'static>(&self) -> Option<Arc<dyn NullableFactory<T>>> {
		self.inner
			.as_any()
			.downcast_ref::<NullableEntry<T>>()
			.map(|entry| Arc::clone(&entry.factory))
	}

	/// Returns true if both handles refer to the same registered factory.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	pub(crate) fn wrap_nullable(&self, mode: NullableMode) -> Option<Self> {
		self.inner.wrap_nullable(mode)
	}
}

impl fmt::Debug for InstanceFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InstanceFactory")
			.field("descriptor", &self.descriptor())
			.field("capability", &self.capability)
			.finish()
	}
}

/// Non-nullable factory backed by a closure.
pub struct FnFactory<F, T> {
	f: F,
	_output: PhantomData<fn() -> T>,
}

impl<F, T> NonNullableFactory<T> for FnFactory<F, T>
where
	T: 'static,
	F: Fn(&mut RandomSource) -> T + Send + Sync,
{
	fn create_instance(&self, random: &mut RandomSource) -> T {
		(self.f)(random)
	}
}

/// Nullable factory backed by a closure.
pub struct NullableFnFactory<F, T> {
	f: F,
	_output: PhantomData<fn() -> T>,
}

impl<F, T> NullableFactory<T> for NullableFnFactory<F, T>
where
	T: 'static,
	F: Fn(&mut RandomSource) -> Option<T> + Send + Sync,
{
	fn create_instance(&self, random: &mut RandomSource) -> Option<T> {
		(self.f)(random)
	}
}

/// Registers a closure as a non-nullable factory.
///
/// # Example
///
/// ```
/// use fixgen_registry::factory::from_fn;
/// use fixgen_registry::TypeDescriptor;
///
/// let factory = from_fn(|random| random.next_i32().unsigned_abs());
/// assert_eq!(factory.descriptor(), TypeDescriptor::of::<u32>());
/// ```
pub fn from_fn<T, F>(f: F) -> InstanceFactory
where
	T: Send + 'static,
	F: Fn(&mut RandomSource) -> T + Send + Sync + 'static,
{
	InstanceFactory::non_nullable::<T, _>(FnFactory {
		f,
		_output: PhantomData,
	})
}

/// Registers a closure as a nullable factory.
pub fn nullable_from_fn<T, F>(f: F) -> InstanceFactory
where
	T: Send + 'static,
	F: Fn(&mut RandomSource) -> Option<T> + Send + Sync + 'static,
{
	InstanceFactory::nullable::<T, _>(NullableFnFactory {
		f,
		_output: PhantomData,
	})
}
