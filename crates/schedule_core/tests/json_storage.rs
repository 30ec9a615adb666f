use schedule_core::{
    ActivityId, JsonFileStorage, ScheduleService, ScheduleStorage, ServiceError, StoreError,
};
use serde_json::Value;
use std::fs;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut service = ScheduleService::open(JsonFileStorage::new(dir.path())).unwrap();
    service.add("Monday", "09:00", "Standup").unwrap();
    service.add("Tuesday", "10:00", "Review").unwrap();
    service.set_duration(2, "0.75").unwrap();
    service.delete(1).unwrap();
    service.close().unwrap();

    let reopened = ScheduleService::open(JsonFileStorage::new(dir.path())).unwrap();
    assert_eq!(reopened.store().next_id(), 3);
    assert!(reopened.find(1).is_none());
    assert_eq!(reopened.list_trash()[0].id, 1);
    assert_eq!(reopened.find(2).unwrap().duration_hours, Some(0.75));
}

#[test]
fn each_collection_lands_in_its_own_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());

    let mut service = ScheduleService::open(&storage).unwrap();
    service.add("Friday", "16:00", "Demo").unwrap();
    service.add("Friday", "17:00", "Drinks").unwrap();
    service.delete(2).unwrap();

    let active = read_json(&storage.active_path());
    let trash = read_json(&storage.trash_path());

    assert_eq!(active["next_id"], 3);
    assert_eq!(active["items"].as_array().unwrap().len(), 1);
    assert_eq!(active["items"][0]["title"], "Demo");
    assert_eq!(trash["next_id"], 3);
    assert_eq!(trash["items"][0]["id"], 2);
    assert!(trash["items"][0]["deleted_at"].is_string());
}

#[test]
fn non_ascii_titles_are_stored_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());

    let mut service = ScheduleService::open(&storage).unwrap();
    service.add("Sunday", "08:00", "Café ☕ mit Jürgen").unwrap();

    let raw = fs::read_to_string(storage.active_path()).unwrap();
    assert!(raw.contains("Café ☕ mit Jürgen"));
}

#[test]
fn legacy_files_keep_counter_and_are_rewritten_with_current_names() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());
    fs::write(
        storage.active_path(),
        r#"{
  "next_id": 6,
  "items": [
    { "id": 5, "hari": "Senin", "jam": "07:00", "kegiatan": "Olahraga", "done": false,
      "created_at": "2024-01-01T07:00:00.123456" }
  ]
}"#,
    )
    .unwrap();

    let mut service = ScheduleService::open(&storage).unwrap();
    assert_eq!(service.list_all()[0].day, "Monday");
    let monday: Vec<u64> = service
        .list_by_day("Monday")
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(monday, [5]);
    let added = service.add("Monday", "06:00", "Stretch").unwrap();
    assert_eq!(added.id, 6);

    let ordered: Vec<u64> = service.list_all().iter().map(|a| a.id).collect();
    assert_eq!(ordered, [6, 5]);

    let active = read_json(&storage.active_path());
    assert_eq!(active["items"][0]["day"], "Monday");
    assert_eq!(active["items"][1]["day"], "Monday");
    assert!(active["items"][0].get("hari").is_none());
}

#[test]
fn trash_counter_prevents_reuse_when_active_file_is_lost() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());

    let mut service = ScheduleService::open(&storage).unwrap();
    service.add("Monday", "09:00", "One").unwrap();
    service.add("Monday", "10:00", "Two").unwrap();
    service.delete(1).unwrap();
    drop(service);

    fs::remove_file(storage.active_path()).unwrap();
    let store = storage.load().unwrap();
    assert_eq!(store.next_id(), 3);
    assert_eq!(store.active_len(), 0);
    assert_eq!(store.trash_len(), 1);
}

#[test]
fn largest_possible_id_loads_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());
    fs::write(
        storage.active_path(),
        format!(
            r#"{{ "next_id": 1, "items": [
  {{ "id": {}, "day": "Monday", "time": "09:00", "title": "Last", "done": false,
     "created_at": "2026-10-18T09:00:00.000000Z" }}
] }}"#,
            ActivityId::MAX
        ),
    )
    .unwrap();

    let mut service = ScheduleService::open(&storage).unwrap();
    assert_eq!(service.list_all().len(), 1);

    let err = service.add("Tuesday", "10:00", "Overflow").unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(err, ServiceError::Store(StoreError::IdsExhausted)));
    assert_eq!(service.list_all().len(), 1);
}
