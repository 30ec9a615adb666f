//! In-memory activity store with soft-delete semantics.
//!
//! # Responsibility
//! - Hold the active and trash collections plus the shared id counter.
//! - Implement add/edit/delete/restore/status/duration/list use-cases.
//!
//! # Invariants
//! - An id lives in exactly one collection (active XOR trash).
//! - The counter never decreases and never hands out an id seen before.
//! - A rejected operation leaves both collections untouched.

use crate::model::activity::{now_iso8601, Activity, ActivityId, Collection, Weekday};
use crate::validation::{
    validate_day, validate_duration, validate_nonempty_text, validate_status, validate_time,
    ValidationError,
};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Which collection a lookup targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Active,
    Trash,
}

impl Area {
    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trash => "trash",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound { id: ActivityId, area: Area },
    /// The counter has reached the largest representable id.
    IdsExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { id, area: Area::Active } => write!(f, "activity not found: {id}"),
            Self::NotFound { id, area: Area::Trash } => {
                write!(f, "activity not found in trash: {id}")
            }
            Self::IdsExhausted => f.write_str("no activity ids left to assign"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } | Self::IdsExhausted => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Raw field input for `ActivityStore::edit`.
///
/// `None` or blank text keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityPatch {
    pub day: Option<String>,
    pub time: Option<String>,
    pub title: Option<String>,
    pub done: Option<String>,
}

impl ActivityPatch {
    pub fn is_empty(&self) -> bool {
        [&self.day, &self.time, &self.title, &self.done]
            .into_iter()
            .all(|field| provided(field).is_none())
    }
}

/// Result of an edit: the record after edit plus every field that was refused.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub activity: Activity,
    pub rejected: Vec<ValidationError>,
}

impl EditOutcome {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Active and trash collections, loaded from and saved to storage as a pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityStore {
    active: Collection,
    trash: Collection,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from two persisted collections.
    ///
    /// The counter is raised past every id either file has seen, so a stale
    /// or hand-edited counter can never cause id reuse. An id at the top of
    /// the range pins the counter there, and `add` then refuses new records.
    pub fn from_collections(active: Collection, trash: Collection) -> Self {
        let highest_seen = active.max_id().max(trash.max_id()).unwrap_or(0);
        let past_highest = highest_seen.checked_add(1).unwrap_or_else(|| {
            warn!(
                "event=store_load module=store status=degraded error_code=ids_exhausted max_id={}",
                highest_seen
            );
            ActivityId::MAX
        });
        let next_id = active
            .next_id
            .max(trash.next_id)
            .max(past_highest)
            .max(1);

        let mut store = Self { active, trash };
        store.set_next_id(next_id);
        store
    }

    /// Collections as they should be persisted; both carry the shared counter.
    pub fn collections(&self) -> (&Collection, &Collection) {
        (&self.active, &self.trash)
    }

    pub fn next_id(&self) -> ActivityId {
        self.active.next_id
    }

    pub fn active_len(&self) -> usize {
        self.active.items.len()
    }

    pub fn trash_len(&self) -> usize {
        self.trash.items.len()
    }

    /// Validates all three fields, then appends a new pending activity.
    pub fn add(&mut self, day: &str, time: &str, title: &str) -> StoreResult<Activity> {
        let day = validate_day(day)?;
        let time = validate_time(time)?;
        let title = validate_nonempty_text("title", title)?;

        let id = self.next_id();
        let following = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let activity = Activity::new(id, day, time, title);
        self.active.items.push(activity.clone());
        self.set_next_id(following);

        info!(
            "event=activity_add module=store status=ok id={} day={}",
            id, activity.day
        );
        Ok(activity)
    }

    /// Looks up an activity in the active collection only.
    pub fn find(&self, id: ActivityId) -> Option<&Activity> {
        self.active.items.iter().find(|item| item.id == id)
    }

    pub fn find_in_trash(&self, id: ActivityId) -> Option<&Activity> {
        self.trash.items.iter().find(|item| item.id == id)
    }

    /// Applies every provided field that validates; refused fields keep
    /// their old value and are reported in the outcome.
    pub fn edit(&mut self, id: ActivityId, patch: &ActivityPatch) -> StoreResult<EditOutcome> {
        let index = self.active_index(id)?;
        let item = &mut self.active.items[index];
        let mut rejected = Vec::new();

        if let Some(raw) = provided(&patch.day) {
            match validate_day(raw) {
                Ok(day) => item.day = day.as_str().to_string(),
                Err(err) => rejected.push(err),
            }
        }
        if let Some(raw) = provided(&patch.time) {
            match validate_time(raw) {
                Ok(time) => item.time = time,
                Err(err) => rejected.push(err),
            }
        }
        if let Some(raw) = provided(&patch.title) {
            match validate_nonempty_text("title", raw) {
                Ok(title) => item.title = title,
                Err(err) => rejected.push(err),
            }
        }
        if let Some(raw) = provided(&patch.done) {
            match validate_status(raw) {
                Ok(done) => item.done = done,
                Err(err) => rejected.push(err),
            }
        }

        info!(
            "event=activity_edit module=store status={} id={} rejected_fields={}",
            if rejected.is_empty() { "ok" } else { "partial" },
            id,
            rejected.len()
        );
        Ok(EditOutcome {
            activity: item.clone(),
            rejected,
        })
    }

    /// Moves an activity from active to trash and stamps `deleted_at`.
    pub fn delete(&mut self, id: ActivityId) -> StoreResult<Activity> {
        let index = self.active_index(id)?;
        let mut item = self.active.items.remove(index);
        item.deleted_at = Some(now_iso8601());
        self.trash.items.push(item.clone());

        info!("event=activity_delete module=store status=ok id={}", id);
        Ok(item)
    }

    /// Moves an activity back from trash, keeping every field as it was.
    pub fn restore(&mut self, id: ActivityId) -> StoreResult<Activity> {
        let index = self.trash.position(id).ok_or(StoreError::NotFound {
            id,
            area: Area::Trash,
        })?;
        let item = self.trash.items.remove(index);
        self.active.items.push(item.clone());

        info!("event=activity_restore module=store status=ok id={}", id);
        Ok(item)
    }

    pub fn mark_status(&mut self, id: ActivityId, token: &str) -> StoreResult<Activity> {
        let index = self.active_index(id)?;
        let done = validate_status(token)?;
        let item = &mut self.active.items[index];
        item.done = done;

        info!(
            "event=activity_status module=store status=ok id={} done={}",
            id, done
        );
        Ok(item.clone())
    }

    pub fn set_duration(&mut self, id: ActivityId, value: &str) -> StoreResult<Activity> {
        let index = self.active_index(id)?;
        let hours = validate_duration(value)?;
        let item = &mut self.active.items[index];
        item.duration_hours = Some(hours);

        info!("event=activity_duration module=store status=ok id={}", id);
        Ok(item.clone())
    }

    /// Active activities ordered by week position, then time.
    pub fn list_all(&self) -> Vec<&Activity> {
        let mut items: Vec<&Activity> = self.active.items.iter().collect();
        items.sort_by(|a, b| a.schedule_key().cmp(&b.schedule_key()));
        items
    }

    pub fn list_by_day(&self, day: &str) -> StoreResult<Vec<&Activity>> {
        let day = validate_day(day)?;
        let mut items: Vec<&Activity> = self
            .active
            .items
            .iter()
            .filter(|item| item.day == day.as_str())
            .collect();
        items.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(items)
    }

    /// Trash ordered by deletion time; unstamped records come first.
    pub fn list_trash(&self) -> Vec<&Activity> {
        let mut items: Vec<&Activity> = self.trash.items.iter().collect();
        items.sort_by(|a, b| a.trash_key().cmp(b.trash_key()));
        items
    }

    /// Days that currently hold at least one active activity.
    pub fn scheduled_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| self.active.items.iter().any(|item| item.day == day.as_str()))
            .collect()
    }

    fn active_index(&self, id: ActivityId) -> StoreResult<usize> {
        self.active.position(id).ok_or_else(|| {
            debug!(
                "event=activity_lookup module=store status=miss id={} area={}",
                id,
                Area::Active.as_str()
            );
            StoreError::NotFound {
                id,
                area: Area::Active,
            }
        })
    }

    fn set_next_id(&mut self, next_id: ActivityId) {
        self.active.next_id = next_id;
        self.trash.next_id = next_id;
    }
}

fn provided(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
