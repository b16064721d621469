//! Type descriptors: registry keys made of a type identity and a nullability bit.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a value type plus whether absent values are permitted.
///
/// `TypeDescriptor::of::<T>()` and `TypeDescriptor::nullable::<T>()` share a
/// base type but are distinct keys. [`to_nullable`](Self::to_nullable) and
/// [`to_non_nullable`](Self::to_non_nullable) flip the nullability bit while
/// holding the base type fixed; the registry uses this relation to pair
/// non-nullable and nullable factories.
///
/// # Examples
///
/// ```
/// use fixgen_registry::TypeDescriptor;
///
/// let plain = TypeDescriptor::of::<i64>();
/// let nullable = plain.to_nullable();
///
/// assert_ne!(plain, nullable);
/// assert_eq!(nullable, TypeDescriptor::nullable::<i64>());
/// assert_eq!(nullable.to_non_nullable(), plain);
/// assert_eq!(nullable.to_string(), "i64?");
/// ```
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
	type_id: TypeId,
	type_name: &'static str,
	nullable: bool,
}

impl TypeDescriptor {
	/// Non-nullable descriptor for `T`.
	pub fn of<T: 'static>() -> Self {
		Self {
			type_id: TypeId::of::<T>(),
			type_name: std::any::type_name::<T>(),
			nullable: false,
		}
	}

	/// Nullable descriptor for `T`.
	pub fn nullable<T: 'static>() -> Self {
		Self::of::<T>().to_nullable()
	}

	/// The nullable counterpart of this descriptor.
	pub fn to_nullable(self) -> Self {
		Self {
			nullable: true,
			..self
		}
	}

	/// The non-nullable counterpart of this descriptor.
	pub fn to_non_nullable(self) -> Self {
		Self {
			nullable: false,
			..self
		}
	}

	/// Base type of this descriptor, with nullability stripped.
	pub fn base(self) -> Self {
		self.to_non_nullable()
	}

	/// Whether this descriptor admits absent values.
	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	/// Runtime identity of the base type.
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Name of the base type, for diagnostics only.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}
}

// `type_name` is not guaranteed unique or stable, so it takes no part in identity.
impl PartialEq for TypeDescriptor {
	fn eq(&self, other: &Self) -> bool {
		self.type_id == other.type_id && self.nullable == other.nullable
	}
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.type_id.hash(state);
		self.nullable.hash(state);
	}
}

impl fmt::Debug for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDescriptor")
			.field("type_name", &self.type_name)
			.field("nullable", &self.nullable)
			.finish()
	}
}

impl fmt::Display for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.nullable {
			write!(f, "{}?", self.type_name)
		} else {
			f.write_str(self.type_name)
		}
	}
}
