//! Hybrid timestamp codec.
//!
//! A hybrid timestamp packs a 46-bit physical clock (milliseconds since the
//! Unix epoch) above an 18-bit logical counter that orders events inside the
//! same millisecond. The layout is shared with the server's timestamp oracle
//! and must not change.
//!
//! # Example
//!
//! ```rust
//! use milvus_sdk_core::timestamp::{hybridts_to_unixtime, mkts_from_unixtime};
//!
//! let ts = mkts_from_unixtime(1_700_000_000.25, 0.0, None).unwrap();
//! assert!((hybridts_to_unixtime(ts) - 1_700_000_000.25).abs() < 1e-9);
//! ```

use std::fmt;

use chrono::{DateTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of low-order bits holding the logical counter.
pub const LOGICAL_BITS: u32 = 18;

/// Mask selecting the logical counter.
pub const LOGICAL_BITS_MASK: u64 = (1 << LOGICAL_BITS) - 1;

/// Number of high-order bits holding the physical clock.
pub const PHYSICAL_BITS: u32 = u64::BITS - LOGICAL_BITS;

/// Largest physical value representable in a hybrid timestamp.
pub const MAX_PHYSICAL: u64 = (1 << PHYSICAL_BITS) - 1;

/// A 64-bit hybrid logical/physical timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HybridTimestamp(u64);

impl HybridTimestamp {
    /// Packs a physical millisecond clock and a logical counter.
    ///
    /// The logical counter is masked to 18 bits and the physical clock to
    /// 46 bits.
    #[must_use]
    pub const fn new(physical: u64, logical: u64) -> Self {
        Self(((physical & MAX_PHYSICAL) << LOGICAL_BITS) | (logical & LOGICAL_BITS_MASK))
    }

    /// Wraps a raw timestamp received from the server.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw 64-bit value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn physical(self) -> u64 {
        self.0 >> LOGICAL_BITS
    }

    /// Intra-millisecond counter.
    #[must_use]
    pub const fn logical(self) -> u64 {
        self.0 & LOGICAL_BITS_MASK
    }

    /// Physical part as fractional Unix seconds.
    #[must_use]
    pub fn unix_seconds(self) -> f64 {
        self.physical() as f64 / 1000.0
    }

    /// Shifts the physical part by `millis`, keeping the logical counter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `millis` is not finite or the
    /// shifted clock leaves the 46-bit physical range.
    pub fn with_extra_millis(self, millis: f64) -> Result<Self> {
        mkts_from_hybridts(self.0, millis, None).map(Self)
    }
}

impl fmt::Display for HybridTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for HybridTimestamp {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<HybridTimestamp> for u64 {
    fn from(ts: HybridTimestamp) -> Self {
        ts.0
    }
}

/// Converts a hybrid timestamp into fractional Unix seconds.
///
/// Only the physical part is used; the logical counter is dropped.
#[must_use]
pub fn hybridts_to_unixtime(hybridts: u64) -> f64 {
    HybridTimestamp::from_raw(hybridts).unix_seconds()
}

/// Builds a new hybrid timestamp by moving the physical part of `hybridts`
/// forward (or backward) by `extra_millis` plus the sub-second part of
/// `delta`. The logical counter is carried over unchanged.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `extra_millis` is not finite or the
/// resulting physical clock is negative or wider than 46 bits.
pub fn mkts_from_hybridts(hybridts: u64, extra_millis: f64, delta: Option<TimeDelta>) -> Result<u64> {
    let millis = fold_delta(require_finite("milliseconds", extra_millis)?, delta);

    let ts = HybridTimestamp::from_raw(hybridts);
    let physical = checked_physical((ts.physical() as f64 + millis).trunc())?;

    let new_ts = (physical << LOGICAL_BITS) + ts.logical();
    tracing::debug!(hybridts, new_ts, millis, "shifted hybrid timestamp");
    Ok(new_ts)
}

/// Builds a hybrid timestamp from fractional Unix seconds.
///
/// `extra_millis` and the sub-second part of `delta` are added before the
/// total is floored to whole milliseconds. The logical counter is zero.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `epoch_seconds` or `extra_millis` is
/// not finite, or the millisecond count is negative or wider than 46 bits.
pub fn mkts_from_unixtime(epoch_seconds: f64, extra_millis: f64, delta: Option<TimeDelta>) -> Result<u64> {
    let epoch = require_finite("epoch", epoch_seconds)?;
    let millis = fold_delta(require_finite("milliseconds", extra_millis)?, delta);

    let total_seconds = epoch + millis / 1000.0;
    let physical = checked_physical((total_seconds * 1000.0).floor())?;

    let ts = physical << LOGICAL_BITS;
    tracing::debug!(epoch_seconds, ts, "built hybrid timestamp from unix time");
    Ok(ts)
}

/// Builds a hybrid timestamp from a calendar datetime in any time zone.
///
/// # Errors
///
/// Same as [`mkts_from_unixtime`].
pub fn mkts_from_datetime<Tz: TimeZone>(
    moment: &DateTime<Tz>,
    extra_millis: f64,
    delta: Option<TimeDelta>,
) -> Result<u64> {
    let epoch = moment.timestamp() as f64 + f64::from(moment.timestamp_subsec_micros()) / 1_000_000.0;
    mkts_from_unixtime(epoch, extra_millis, delta)
}

/// Parses an RFC 3339 datetime and builds a hybrid timestamp from it.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `moment` is not a calendar datetime,
/// otherwise the same errors as [`mkts_from_unixtime`].
pub fn mkts_from_datetime_str(moment: &str, extra_millis: f64, delta: Option<TimeDelta>) -> Result<u64> {
    let parsed = DateTime::parse_from_rfc3339(moment).map_err(|e| {
        Error::InvalidArgument(format!("parameter d_time '{moment}' is not a datetime: {e}"))
    })?;
    mkts_from_datetime(&parsed, extra_millis, delta)
}

fn require_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!(
            "parameter {name} should be a finite number, got {value}"
        )))
    }
}

/// Adds the sub-second remainder of `delta` in milliseconds.
///
/// Whole seconds of `delta` are ignored. The remainder is normalised to
/// `[0, 1s)` so negative deltas contribute a positive fraction.
fn fold_delta(millis: f64, delta: Option<TimeDelta>) -> f64 {
    match delta {
        Some(delta) => {
            let micros = delta.subsec_nanos().rem_euclid(1_000_000_000) / 1_000;
            millis + f64::from(micros) / 1000.0
        }
        None => millis,
    }
}

fn checked_physical(physical: f64) -> Result<u64> {
    if physical < 0.0 || physical > MAX_PHYSICAL as f64 {
        return Err(Error::InvalidArgument(format!(
            "physical time {physical} ms is outside [0, {MAX_PHYSICAL}]"
        )));
    }
    Ok(physical as u64)
}
