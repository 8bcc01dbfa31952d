//! Age clause - a time-relative range over seconds of document age

use std::fmt;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Timelike, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::keyed;

/// Shared source of "now" for age clauses
///
/// Injected so tests can pin the clock; production code uses
/// [`system_clock`]. The closure is `Send + Sync`, so a frozen filter tree
/// may be serialized from multiple threads.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// The real UTC clock
pub fn system_clock() -> Clock {
    Arc::new(|| Utc::now().naive_utc())
}

/// Age bounds in seconds, as supplied by the caller
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgeBounds {
    pub gte: Option<f64>,
    pub gt: Option<f64>,
    pub lte: Option<f64>,
    pub lt: Option<f64>,
}

impl AgeBounds {
    // Saying a document is at least 3600 seconds old is the same as saying
    // its timestamp is at most `now - 3600`, so age bounds map to the
    // opposite timestamp bounds.
    fn flipped(self) -> Self {
        Self {
            gte: self.lte,
            gt: self.lt,
            lte: self.gte,
            lt: self.gt,
        }
    }
}

/// Matches documents whose timestamp field falls within an age window
///
/// Bounds are given in seconds of age and converted to absolute timestamps
/// at serialization time, so two `to_query` calls separated in time yield
/// different values.
#[derive(Clone)]
pub struct Age {
    pub field: String,
    // Stored pre-flipped into timestamp-bound positions.
    bounds: AgeBounds,
    clock: Clock,
}

impl Age {
    /// Create an age clause with no bounds; add them with the builder
    /// methods below
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            bounds: AgeBounds::default(),
            clock: system_clock(),
        }
    }

    /// Create an age clause from caller-facing age bounds
    pub fn from_bounds(field: impl Into<String>, bounds: AgeBounds) -> Self {
        Self {
            field: field.into(),
            bounds: bounds.flipped(),
            clock: system_clock(),
        }
    }

    /// At least this many seconds old (upper timestamp bound)
    pub fn gte(mut self, seconds: f64) -> Self {
        self.bounds.lte = Some(seconds);
        self
    }

    /// Strictly more than this many seconds old
    pub fn gt(mut self, seconds: f64) -> Self {
        self.bounds.lt = Some(seconds);
        self
    }

    /// At most this many seconds old (lower timestamp bound)
    pub fn lte(mut self, seconds: f64) -> Self {
        self.bounds.gte = Some(seconds);
        self
    }

    /// Strictly less than this many seconds old
    pub fn lt(mut self, seconds: f64) -> Self {
        self.bounds.gt = Some(seconds);
        self
    }

    /// Substitute the time source used at serialization time
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub(crate) fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn to_query(&self) -> Value {
        let now = (self.clock)();
        let mut criteria = Map::new();
        let bounds = [
            ("gte", self.bounds.gte),
            ("gt", self.bounds.gt),
            ("lte", self.bounds.lte),
            ("lt", self.bounds.lt),
        ];
        for (comparator, seconds) in bounds {
            if let Some(seconds) = seconds {
                let age = Duration::milliseconds((seconds * 1000.0) as i64);
                let instant = now - age;
                criteria.insert(comparator.to_string(), Value::String(format_instant(instant)));
            }
        }
        keyed("range", keyed(&self.field, Value::Object(criteria)))
    }
}

// ISO-8601 with microseconds only when the fraction is non-zero, matching
// `datetime.isoformat()` output.
fn format_instant(instant: NaiveDateTime) -> String {
    let base = instant.format("%Y-%m-%dT%H:%M:%S").to_string();
    match instant.nanosecond() / 1_000 {
        0 => base,
        micros => format!("{base}.{micros:06}"),
    }
}

impl fmt::Debug for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Age")
            .field("field", &self.field)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}
