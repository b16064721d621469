//! Deriving nullable factories from non-nullable ones.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{InstanceFactory, NonNullableFactory, NullableFactory};
use crate::descriptor::TypeDescriptor;
use crate::random::RandomSource;

/// Policy deciding when a wrapped factory yields an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullableMode {
	/// One boolean draw per call: `true` delegates, `false` yields `None`.
	#[default]
	Random,
	/// Always `None`; the random source is left untouched.
	AlwaysAbsent,
	/// Always delegates.
	NeverAbsent,
}

/// Nullable factory delegating to a non-nullable one.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fixgen_registry::factory::{
/// 	I32Factory, NonNullableFactory, NullableFactory, NullableMode, NullableWrapper,
/// };
/// use fixgen_registry::{RandomSource, TypeDescriptor};
///
/// let inner: Arc<dyn NonNullableFactory<i32>> = Arc::new(I32Factory);
/// let wrapper = NullableWrapper::new(inner, NullableMode::AlwaysAbsent);
/// let mut random = RandomSource::seeded(1);
///
/// assert_eq!(wrapper.descriptor(), TypeDescriptor::nullable::<i32>());
/// assert_eq!(wrapper.create_instance(&mut random), None);
/// ```
pub struct NullableWrapper<T: 'static> {
	inner: Arc<dyn NonNullableFactory<T>>,
	mode: NullableMode,
}

impl<T: 'static> NullableWrapper<T> {
	/// Wraps `inner` under `mode`.
	pub fn new(inner: Arc<dyn NonNullableFactory<T>>, mode: NullableMode) -> Self {
		Self { inner, mode }
	}

	/// The absence policy of this wrapper.
	pub fn mode(&self) -> NullableMode {
		self.mode
	}
}

impl<T: 'static> NullableFactory<T> for NullableWrapper<T> {
	fn descriptor(&self) -> TypeDescriptor {
		self.inner.descriptor().to_nullable()
	}

	fn create_instance(&self, random: &mut RandomSource) -> Option<T> {
		match self.mode {
			NullableMode::Random => {
				if random.next_bool() {
					Some(self.inner.create_instance(random))
				} else {
					None
				}
			}
			NullableMode::AlwaysAbsent => None,
			NullableMode::NeverAbsent => Some(self.inner.create_instance(random)),
		}
	}
}

/// Derives a nullable factory from a registered non-nullable one.
///
/// Returns `None` if `factory` is already nullable.
pub fn wrap(factory: &InstanceFactory, mode: NullableMode) -> Option<InstanceFactory> {
	factory.wrap_nullable(mode)
}
