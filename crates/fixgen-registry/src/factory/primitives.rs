//! Leaf factories for numeric, boolean, character and string types.

use super::NonNullableFactory;
use crate::random::RandomSource;

/// Length of every generated string.
pub const STRING_LENGTH: usize = 10;

/// Symbols drawn by [`StringFactory`].
pub const ALPHANUMERIC: &[u8; 62] =
	b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Largest multiple of the alphabet size that fits in a byte; bytes at or
// above it are redrawn so that `byte % 62` stays uniform.
const ACCEPT_BELOW: u8 = (256 / ALPHANUMERIC.len() * ALPHANUMERIC.len()) as u8;

macro_rules! native_factory {
	($(#[$meta:meta])* $name:ident, $ty:ty, $draw:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, Default)]
		pub struct $name;

		impl NonNullableFactory<$ty> for $name {
			fn create_instance(&self, random: &mut RandomSource) -> $ty {
				random.$draw()
			}
		}
	};
}

native_factory!(
	/// Full-range `i32`.
	I32Factory, i32, next_i32
);
native_factory!(
	/// Fair boolean.
	BoolFactory, bool, next_bool
);
native_factory!(
	/// `f32` in `[0, 1)`.
	F32Factory, f32, next_f32
);
native_factory!(
	/// `f64` in `[0, 1)`.
	F64Factory, f64, next_f64
);
native_factory!(
	/// Full-range `i64`.
	I64Factory, i64, next_i64
);
native_factory!(
	/// Full-range `i16`.
	I16Factory, i16, next_i16
);
native_factory!(
	/// Full-range `i8`.
	I8Factory, i8, next_i8
);
native_factory!(
	/// Any Unicode scalar value.
	CharFactory, char, next_char
);

/// Ten-character alphanumeric strings.
///
/// Raw random bytes are mapped onto the 62-symbol alphabet with a modulo;
/// bytes that would bias the distribution are redrawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFactory;

impl NonNullableFactory<String> for StringFactory {
	fn create_instance(&self, random: &mut RandomSource) -> String {
		let mut out = String::with_capacity(STRING_LENGTH);
		let mut bytes = [0_u8; STRING_LENGTH];

		while out.len() < STRING_LENGTH {
			let wanted = STRING_LENGTH - out.len();
			random.fill_bytes(&mut bytes[..wanted]);
			for &byte in bytes[..wanted].iter().filter(|&&byte| byte < ACCEPT_BELOW) {
				out.push(char::from(ALPHANUMERIC[usize::from(byte) % ALPHANUMERIC.len()]));
			}
		}

		out
	}
}
