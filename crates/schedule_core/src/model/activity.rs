//! Activity domain model.
//!
//! # Responsibility
//! - Define the canonical weekly activity record and its persisted shape.
//! - Provide the fixed 7-day ordering used by every listing.
//!
//! # Invariants
//! - `id` is never reused, even after delete/restore cycles.
//! - `day` holds a canonical `Weekday` name for every record written by core.
//! - `time` is a zero-padded 24-hour `HH:MM` string.
//! - `created_at` is set once at creation and never rewritten.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Numeric activity identifier assigned from the shared counter.
pub type ActivityId = u64;

/// Sort position for day names outside the fixed week.
pub const UNKNOWN_DAY_RANK: usize = 7;

/// Day names written by the predecessor tool, Monday first.
const LEGACY_DAY_NAMES: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

/// Fixed day-of-week set, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical capitalized name used in storage and display.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Zero-based position in the week (Monday = 0).
    pub fn position(self) -> usize {
        self as usize
    }

    /// Case-insensitive lookup of a canonical day name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(value))
    }

    /// Like `parse`, but also maps the predecessor tool's day names.
    pub fn parse_stored(value: &str) -> Option<Self> {
        Self::parse(value).or_else(|| {
            let value = value.trim();
            LEGACY_DAY_NAMES
                .iter()
                .position(|name| name.eq_ignore_ascii_case(value))
                .map(|index| Self::ALL[index])
        })
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the listing rank of a stored day name.
///
/// Names outside the fixed week can only come from hand-edited or legacy
/// files; they rank after Sunday.
pub fn day_rank(day: &str) -> usize {
    Weekday::ALL
        .into_iter()
        .find(|candidate| candidate.as_str() == day)
        .map(Weekday::position)
        .unwrap_or(UNKNOWN_DAY_RANK)
}

/// One scheduled weekly activity.
///
/// Legacy data files use `hari`/`jam`/`kegiatan`/`durasi` keys; they are
/// accepted on load and rewritten with the current names on next save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    #[serde(alias = "hari", deserialize_with = "deserialize_day")]
    pub day: String,
    #[serde(alias = "jam")]
    pub time: String,
    #[serde(alias = "kegiatan")]
    pub title: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, alias = "durasi", skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    /// Present while the record lives in trash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl Activity {
    /// Creates a pending activity stamped with the current UTC time.
    ///
    /// Callers are expected to pass already validated field values.
    pub fn new(id: ActivityId, day: Weekday, time: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            day: day.as_str().to_string(),
            time: time.into(),
            title: title.into(),
            done: false,
            created_at: now_iso8601(),
            duration_hours: None,
            deleted_at: None,
        }
    }

    /// Sort key for the weekly listing: day position, then `HH:MM`.
    pub fn schedule_key(&self) -> (usize, &str) {
        (day_rank(&self.day), self.time.as_str())
    }

    /// Key for trash listings; records without a deletion stamp sort first.
    pub fn trash_key(&self) -> &str {
        self.deleted_at.as_deref().unwrap_or("")
    }
}

/// One persisted record collection with its id counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub next_id: ActivityId,
    #[serde(default)]
    pub items: Vec<Activity>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: Vec::new(),
        }
    }
}

impl Collection {
    pub fn position(&self, id: ActivityId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Highest id held by this collection, if any.
    pub fn max_id(&self) -> Option<ActivityId> {
        self.items.iter().map(|item| item.id).max()
    }
}

/// Current UTC time as an ISO-8601 string with microsecond precision.
///
/// Stamps share one offset, so string order is time order.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Canonicalizes known day names on load; anything else is kept verbatim.
fn deserialize_day<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(match Weekday::parse_stored(&raw) {
        Some(day) => day.as_str().to_string(),
        None => raw,
    })
}
