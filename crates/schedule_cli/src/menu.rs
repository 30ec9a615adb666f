//! Numbered text menu driving the schedule service.
//!
//! # Responsibility
//! - Prompt for raw field values and hand them to `schedule_core`.
//! - Report rejected input and keep the loop going.
//!
//! # Invariants
//! - Only storage and terminal I/O failures end the loop early.
//! - Exit (and end of input) saves state before returning.

use crate::render::{format_activity, write_lines, write_table};
use schedule_core::{
    validate_id, ActivityId, ActivityPatch, Area, ScheduleService, ScheduleStorage, ServiceError,
    ServiceResult, StoreError, Weekday,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

pub type MenuResult<T> = Result<T, MenuError>;

#[derive(Debug)]
pub enum MenuError {
    Io(io::Error),
    Service(ServiceError),
}

impl Display for MenuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MenuError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<io::Error> for MenuError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ServiceError> for MenuError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

const MENU: &str = "\
=== Weekly Schedule ===
1. Add activity
2. Edit activity
3. Delete activity (to trash)
4. List all activities
5. List activities by day
6. Mark done / not done
7. List trash
8. Restore from trash
9. Exit
10. Set duration";

pub struct Menu<R, W, S: ScheduleStorage> {
    input: R,
    output: W,
    service: ScheduleService<S>,
}

impl<R: BufRead, W: Write, S: ScheduleStorage> Menu<R, W, S> {
    pub fn new(input: R, output: W, service: ScheduleService<S>) -> Self {
        Self {
            input,
            output,
            service,
        }
    }

    /// Runs until Exit or end of input, then saves and returns the storage.
    pub fn run(mut self) -> MenuResult<S> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choose (1-10): ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.edit()?,
                "3" => self.delete()?,
                "4" => self.list_all()?,
                "5" => self.list_by_day()?,
                "6" => self.mark_status()?,
                "7" => self.list_trash()?,
                "8" => self.restore()?,
                "9" => break,
                "10" => self.set_duration()?,
                _ => {
                    writeln!(self.output, "Invalid choice, try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }

        let storage = self.service.close()?;
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(storage)
    }

    fn add(&mut self) -> MenuResult<Flow> {
        let Some(day) = self.prompt("Day (Monday-Sunday): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(time) = self.prompt("Time (HH:MM, 24-hour): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(title) = self.prompt("Title: ")? else {
            return Ok(Flow::Exit);
        };

        let result = self.service.add(&day, &time, &title);
        if let Some(activity) = self.recover(result)? {
            writeln!(self.output, "Added:")?;
            writeln!(self.output, "{}", format_activity(&activity))?;
        }
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> MenuResult<Flow> {
        let id = match self.prompt_id("Id of the activity to edit: ")? {
            Prompted::Value(id) => id,
            Prompted::Rejected => return Ok(Flow::Continue),
            Prompted::Closed => return Ok(Flow::Exit),
        };
        let Some(current) = self.service.find(id).cloned() else {
            self.report_missing(id, Area::Active)?;
            return Ok(Flow::Continue);
        };

        writeln!(self.output, "Leave a field blank to keep its value.")?;
        let mut patch = ActivityPatch::default();
        let fields = [
            (format!("Day [{}]: ", current.day), &mut patch.day),
            (format!("Time [{}]: ", current.time), &mut patch.time),
            (format!("Title [{}]: ", current.title), &mut patch.title),
            (
                format!("Done? (y/n) [{}]: ", if current.done { "y" } else { "n" }),
                &mut patch.done,
            ),
        ];
        for (label, slot) in fields {
            match self.prompt(&label)? {
                Some(value) => *slot = Some(value),
                None => return Ok(Flow::Exit),
            }
        }

        let result = self.service.edit(id, &patch);
        if let Some(outcome) = self.recover(result)? {
            for err in &outcome.rejected {
                writeln!(self.output, "Not changed: {err}")?;
            }
            writeln!(self.output, "After edit:")?;
            writeln!(self.output, "{}", format_activity(&outcome.activity))?;
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> MenuResult<Flow> {
        let id = match self.prompt_id("Id of the activity to delete: ")? {
            Prompted::Value(id) => id,
            Prompted::Rejected => return Ok(Flow::Continue),
            Prompted::Closed => return Ok(Flow::Exit),
        };

        let result = self.service.delete(id);
        if let Some(activity) = self.recover(result)? {
            writeln!(self.output, "Moved to trash:")?;
            writeln!(self.output, "{}", format_activity(&activity))?;
        }
        Ok(Flow::Continue)
    }

    fn list_all(&mut self) -> MenuResult<Flow> {
        let items = self.service.list_all();
        write_table(&mut self.output, &items, "No activities saved.")?;
        Ok(Flow::Continue)
    }

    fn list_by_day(&mut self) -> MenuResult<Flow> {
        let Some(day) = self.prompt("Day: ")? else {
            return Ok(Flow::Exit);
        };

        match self.service.list_by_day(&day) {
            Ok(items) => {
                write_table(&mut self.output, &items, "No activities on that day.")?;
                if items.is_empty() {
                    let days: Vec<&str> = self
                        .service
                        .store()
                        .scheduled_days()
                        .into_iter()
                        .map(Weekday::as_str)
                        .collect();
                    if !days.is_empty() {
                        writeln!(self.output, "Days with activities: {}", days.join(", "))?;
                    }
                }
            }
            Err(err) if err.is_recoverable() => writeln!(self.output, "Error: {err}")?,
            Err(err) => return Err(err.into()),
        }
        Ok(Flow::Continue)
    }

    fn mark_status(&mut self) -> MenuResult<Flow> {
        let id = match self.prompt_id("Id of the activity: ")? {
            Prompted::Value(id) => id,
            Prompted::Rejected => return Ok(Flow::Continue),
            Prompted::Closed => return Ok(Flow::Exit),
        };
        if self.service.find(id).is_none() {
            self.report_missing(id, Area::Active)?;
            return Ok(Flow::Continue);
        }
        let Some(token) = self.prompt("Mark as done? (y/n): ")? else {
            return Ok(Flow::Exit);
        };

        let result = self.service.mark_status(id, &token);
        if let Some(activity) = self.recover(result)? {
            writeln!(self.output, "Status updated:")?;
            writeln!(self.output, "{}", format_activity(&activity))?;
        }
        Ok(Flow::Continue)
    }

    fn list_trash(&mut self) -> MenuResult<Flow> {
        let items = self.service.list_trash();
        write_lines(&mut self.output, &items, "Trash is empty.")?;
        Ok(Flow::Continue)
    }

    fn restore(&mut self) -> MenuResult<Flow> {
        let id = match self.prompt_id("Id of the activity to restore: ")? {
            Prompted::Value(id) => id,
            Prompted::Rejected => return Ok(Flow::Continue),
            Prompted::Closed => return Ok(Flow::Exit),
        };

        let result = self.service.restore(id);
        if let Some(activity) = self.recover(result)? {
            writeln!(self.output, "Restored:")?;
            writeln!(self.output, "{}", format_activity(&activity))?;
        }
        Ok(Flow::Continue)
    }

    fn set_duration(&mut self) -> MenuResult<Flow> {
        let id = match self.prompt_id("Id of the activity: ")? {
            Prompted::Value(id) => id,
            Prompted::Rejected => return Ok(Flow::Continue),
            Prompted::Closed => return Ok(Flow::Exit),
        };
        if self.service.find(id).is_none() {
            self.report_missing(id, Area::Active)?;
            return Ok(Flow::Continue);
        }
        let Some(value) = self.prompt("Duration in hours: ")? else {
            return Ok(Flow::Exit);
        };

        let result = self.service.set_duration(id, &value);
        if let Some(activity) = self.recover(result)? {
            writeln!(self.output, "Duration set:")?;
            writeln!(self.output, "{}", format_activity(&activity))?;
        }
        Ok(Flow::Continue)
    }

    /// Prints a recoverable error and yields `None`; storage errors propagate.
    fn recover<T>(&mut self, result: ServiceResult<T>) -> MenuResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                writeln!(self.output, "Error: {err}")?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn report_missing(&mut self, id: ActivityId, area: Area) -> MenuResult<()> {
        writeln!(self.output, "Error: {}", StoreError::NotFound { id, area })?;
        Ok(())
    }

    fn prompt_id(&mut self, label: &str) -> MenuResult<Prompted<ActivityId>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(Prompted::Closed);
        };
        match validate_id(&raw) {
            Ok(id) => Ok(Prompted::Value(id)),
            Err(err) => {
                writeln!(self.output, "Error: {err}")?;
                Ok(Prompted::Rejected)
            }
        }
    }

    /// Reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> MenuResult<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

enum Prompted<T> {
    Value(T),
    Rejected,
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedule_core::{ActivityStore, MemoryStorage, StorageError, StorageResult};
    use std::io::Cursor;
    use std::path::PathBuf;

    fn run_script(script: &str) -> (String, MemoryStorage) {
        run_script_with(MemoryStorage::new(), script)
    }

    fn run_script_with(storage: MemoryStorage, script: &str) -> (String, MemoryStorage) {
        let service = ScheduleService::open(storage).unwrap();
        let mut output = Vec::new();
        let storage = Menu::new(Cursor::new(script.to_string()), &mut output, service)
            .run()
            .unwrap();
        (String::from_utf8(output).unwrap(), storage)
    }

    #[test]
    fn add_then_list_shows_time_order_within_day() {
        let (output, storage) = run_script(
            "1\nMonday\n09:00\nStandup\n1\nmonday\n8:00\nGym\n4\n9\n",
        );

        let gym = output.find("Gym").unwrap();
        let table_start = output.rfind("ID").unwrap();
        assert!(output[table_start..].find("Gym").unwrap() < output[table_start..].find("Standup").unwrap());
        assert!(gym < table_start);
        assert!(output.ends_with("Goodbye!\n"));

        let snapshot = storage.snapshot().unwrap();
        assert_eq!(snapshot.find(2).unwrap().time, "08:00");
        assert_eq!(storage.save_count(), 3);
    }

    #[test]
    fn invalid_input_is_reported_and_loop_continues() {
        let (output, storage) = run_script("1\nFunday\n09:00\nParty\n3\nabc\n42\n9\n");

        assert!(output.contains("Error: invalid day `Funday`"));
        assert!(output.contains("Error: invalid id `abc`"));
        assert!(output.contains("Invalid choice, try again."));
        assert_eq!(storage.snapshot().unwrap().active_len(), 0);
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn delete_list_trash_and_restore() {
        let (output, storage) = run_script("1\nTuesday\n10:00\nReview\n3\n1\n7\n8\n1\n7\n9\n");

        assert!(output.contains("Moved to trash:"));
        assert!(output.contains("[1] Tuesday 10:00 - Review (Status: Pending)"));
        assert!(output.contains("Restored:"));
        assert!(output.contains("Trash is empty."));
        let snapshot = storage.snapshot().unwrap();
        assert!(snapshot.find(1).is_some());
        assert_eq!(snapshot.trash_len(), 0);
    }

    #[test]
    fn edit_keeps_blank_fields_and_reports_rejected_ones() {
        let (output, storage) =
            run_script("1\nWednesday\n07:00\nSwim\n2\n1\nNoday\n7:30\n\ny\n9\n");

        assert!(output.contains("Day [Wednesday]: "));
        assert!(output.contains("Not changed: invalid day `Noday`"));
        let snapshot = storage.snapshot().unwrap();
        let swim = snapshot.find(1).unwrap();
        assert_eq!(swim.day, "Wednesday");
        assert_eq!(swim.time, "07:30");
        assert_eq!(swim.title, "Swim");
        assert!(swim.done);
    }

    #[test]
    fn status_and_duration_flows() {
        let (output, storage) =
            run_script("1\nFriday\n17:00\nRetro\n6\n1\nmaybe\n6\n1\ny\n10\n1\n-2\n10\n1\n1.5\n9\n");

        assert!(output.contains("Error: invalid answer `maybe`"));
        assert!(output.contains("Error: invalid duration `-2`"));
        assert!(output.contains("(Status: Done) (Duration: 1.5 h)"));
        let snapshot = storage.snapshot().unwrap();
        let retro = snapshot.find(1).unwrap();
        assert!(retro.done);
        assert_eq!(retro.duration_hours, Some(1.5));
    }

    #[test]
    fn missing_id_is_reported_before_asking_for_more() {
        let (output, _) = run_script("6\n5\n9\n");
        assert!(output.contains("Error: activity not found: 5"));
        assert!(!output.contains("Mark as done?"));
    }

    #[test]
    fn list_by_day_hints_at_scheduled_days() {
        let (output, _) = run_script("1\nSaturday\n11:00\nMarket\n5\nmonday\n5\nnope\n9\n");
        assert!(output.contains("No activities on that day."));
        assert!(output.contains("Days with activities: Saturday"));
        assert!(output.contains("Error: invalid day `nope`"));
    }

    struct ReadOnlyStorage;

    impl ScheduleStorage for ReadOnlyStorage {
        fn load(&self) -> StorageResult<ActivityStore> {
            Ok(ActivityStore::new())
        }

        fn save(&self, _store: &ActivityStore) -> StorageResult<()> {
            Err(StorageError::Io {
                path: PathBuf::from("data.json"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn storage_failure_ends_the_loop() {
        let service = ScheduleService::open(ReadOnlyStorage).unwrap();
        let mut output = Vec::new();
        let script = "1\nMonday\n09:00\nStandup\n4\n9\n";

        let err = Menu::new(Cursor::new(script), &mut output, service)
            .run()
            .err()
            .unwrap();

        match err {
            MenuError::Service(err) => assert!(!err.is_recoverable()),
            other => panic!("expected service error, got {other}"),
        }
        let output = String::from_utf8(output).unwrap();
        assert!(!output.contains("Goodbye!"));
        assert_eq!(output.matches("=== Weekly Schedule ===").count(), 1);
    }

    #[test]
    fn end_of_input_saves_like_exit() {
        let (output, storage) = run_script("1\nSunday\n20:00\nPlan week\n");
        assert!(output.ends_with("Goodbye!\n"));
        assert_eq!(storage.save_count(), 2);
        assert_eq!(storage.snapshot().unwrap().active_len(), 1);
    }
}
