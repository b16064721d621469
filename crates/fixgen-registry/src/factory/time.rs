//! Calendar and time factories.
//!
//! The factories form a one-way delegation chain, so every derived type reuses
//! the randomness of the layer below it instead of drawing its own:
//!
//! ```text
//! InstantFactory ─┬─> LegacyDateFactory
//!                 └─> LocalDateTimeFactory ─┬─> LocalDateFactory
//!                                           ├─> LocalTimeFactory
//!                                           ├─> ZonedDateTimeFactory
//!                                           └─> OffsetDateTimeFactory ─> OffsetTimeFactory
//! ```

use std::fmt;
use std::time::{Duration, SystemTime};

use chrono::{
	DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
	TimeZone, Utc,
};
use chrono_tz::{TZ_VARIANTS, Tz};

use super::NonNullableFactory;
use crate::random::RandomSource;

/// Exclusive upper bound for generated instants: `2100-01-01T00:00:00Z`.
pub const INSTANT_UPPER_BOUND_MILLIS: i64 = 4_102_444_800_000;

/// Largest legal UTC offset, in seconds (18 hours).
pub const MAX_OFFSET_SECONDS: i32 = 18 * 60 * 60;

/// A wall-clock time with a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
	time: NaiveTime,
	offset: FixedOffset,
}

impl OffsetTime {
	/// Creates an offset time.
	pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
		Self { time, offset }
	}

	/// The local time.
	pub fn time(&self) -> NaiveTime {
		self.time
	}

	/// The offset from UTC.
	pub fn offset(&self) -> FixedOffset {
		self.offset
	}
}

impl fmt::Display for OffsetTime {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.time, self.offset)
	}
}

fn random_zone(random: &mut RandomSource) -> Tz {
	TZ_VARIANTS[random.next_index(TZ_VARIANTS.len())]
}

fn random_offset(random: &mut RandomSource) -> FixedOffset {
	let seconds = random.next_i32_in(-MAX_OFFSET_SECONDS..MAX_OFFSET_SECONDS + 1);
	// Always within FixedOffset's accepted range of under 24 hours.
	FixedOffset::east_opt(seconds).unwrap_or(Utc.fix())
}

/// Instants between the Unix epoch and the start of 2100, millisecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantFactory;

impl NonNullableFactory<DateTime<Utc>> for InstantFactory {
	fn create_instance(&self, random: &mut RandomSource) -> DateTime<Utc> {
		let millis = random.next_i64_below(INSTANT_UPPER_BOUND_MILLIS);
		// The default `DateTime<Utc>` is the Unix epoch.
		DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
	}
}

/// `SystemTime` values taken from [`InstantFactory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDateFactory {
	instants: InstantFactory,
}

impl NonNullableFactory<SystemTime> for LegacyDateFactory {
	fn create_instance(&self, random: &mut RandomSource) -> SystemTime {
		let instant = self.instants.create_instance(random);
		SystemTime::UNIX_EPOCH + Duration::from_millis(instant.timestamp_millis().unsigned_abs())
	}
}

/// Local date-times: a random instant viewed from a random time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDateTimeFactory {
	instants: InstantFactory,
}

impl NonNullableFactory<NaiveDateTime> for LocalDateTimeFactory {
	fn create_instance(&self, random: &mut RandomSource) -> NaiveDateTime {
		let instant = self.instants.create_instance(random);
		let zone = random_zone(random);
		instant.with_timezone(&zone).naive_local()
	}
}

/// Date part of [`LocalDateTimeFactory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDateFactory {
	date_times: LocalDateTimeFactory,
}

impl NonNullableFactory<NaiveDate> for LocalDateFactory {
	fn create_instance(&self, random: &mut RandomSource) -> NaiveDate {
		self.date_times.create_instance(random).date()
	}
}

/// Time part of [`LocalDateTimeFactory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimeFactory {
	date_times: LocalDateTimeFactory,
}

impl NonNullableFactory<NaiveTime> for LocalTimeFactory {
	fn create_instance(&self, random: &mut RandomSource) -> NaiveTime {
		self.date_times.create_instance(random).time()
	}
}

/// Local date-times placed in a random time zone.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant. Local
/// times skipped by a DST gap are read as UTC and converted into the zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZonedDateTimeFactory {
	date_times: LocalDateTimeFactory,
}

impl NonNullableFactory<DateTime<Tz>> for ZonedDateTimeFactory {
	fn create_instance(&self, random: &mut RandomSource) -> DateTime<Tz> {
		let local = self.date_times.create_instance(random);
		let zone = random_zone(random);
		match zone.from_local_datetime(&local) {
			LocalResult::Single(zoned) => zoned,
			LocalResult::Ambiguous(earliest, _) => earliest,
			LocalResult::None => zone.from_utc_datetime(&local),
		}
	}
}

/// Local date-times with a random offset in `[-18:00, +18:00]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetDateTimeFactory {
	date_times: LocalDateTimeFactory,
}

impl NonNullableFactory<DateTime<FixedOffset>> for OffsetDateTimeFactory {
	fn create_instance(&self, random: &mut RandomSource) -> DateTime<FixedOffset> {
		let local = self.date_times.create_instance(random);
		let offset = random_offset(random);
		let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
		DateTime::from_naive_utc_and_offset(utc, offset)
	}
}

/// Time and offset of [`OffsetDateTimeFactory`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetTimeFactory {
	date_times: OffsetDateTimeFactory,
}

impl NonNullableFactory<OffsetTime> for OffsetTimeFactory {
	fn create_instance(&self, random: &mut RandomSource) -> OffsetTime {
		let date_time = self.date_times.create_instance(random);
		OffsetTime::new(date_time.time(), *date_time.offset())
	}
}
