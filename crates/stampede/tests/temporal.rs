//! Temporal coercion: timezone-aware datetimes are stripped to naive UTC
//! on the way in, so they round-trip and match as upsert keys.

mod common;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use stampede::{
    BulkModel, Connections, FieldDescriptor, FieldKind, InsertOptions, SqlValue, Table,
    UpsertOptions,
};

#[derive(Debug, Clone)]
struct Event {
    at: DateTime<FixedOffset>,
    note: String,
}

struct EventTable;

impl Table for EventTable {
    const NAME: &'static str = "event";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::auto_pk("id", "id"),
        FieldDescriptor::new("at", "at", FieldKind::DateTime),
        FieldDescriptor::new("note", "note", FieldKind::Text),
    ];
}

impl BulkModel for Event {
    type Table = EventTable;

    fn field_value(&self, field: &str) -> SqlValue {
        match field {
            "at" => stampede::ToSqlValue::to_sql_value(self.at),
            "note" => SqlValue::Text(self.note.clone()),
            _ => SqlValue::Null,
        }
    }
}

async fn event_connections() -> Connections {
    let conns = common::connections().await;
    sqlx::query(
        "CREATE TABLE event (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            at DATETIME NOT NULL,
            note TEXT NOT NULL
        )",
    )
    .execute(conns.get(None).unwrap())
    .await
    .unwrap();
    conns
}

#[tokio::test]
async fn aware_datetimes_are_stored_naive() {
    let conns = event_connections().await;
    let instant = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let mut events = vec![Event {
        at: instant.fixed_offset(),
        note: String::from("created"),
    }];

    stampede::insert_many(&conns, &mut events, InsertOptions::new())
        .await
        .unwrap();

    let stored: NaiveDateTime = sqlx::query_scalar("SELECT at FROM event")
        .fetch_one(conns.get(None).unwrap())
        .await
        .unwrap();
    assert_eq!(stored, instant.naive_utc());
}

#[tokio::test]
async fn same_instant_in_another_offset_matches_as_key() {
    let conns = event_connections().await;
    let utc = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    stampede::insert_many(
        &conns,
        &mut [Event {
            at: utc.fixed_offset(),
            note: String::from("created"),
        }],
        InsertOptions::new(),
    )
    .await
    .unwrap();

    // 13:30 at +01:00 is the same instant as 12:30 UTC.
    let offset = FixedOffset::east_opt(3600).unwrap();
    let same_instant = offset.with_ymd_and_hms(2024, 3, 1, 13, 30, 0).unwrap();
    let (inserted, updated) = stampede::insert_or_update_many(
        &conns,
        &mut [Event {
            at: same_instant,
            note: String::from("seen again"),
        }],
        UpsertOptions::new().keys(["at"]),
    )
    .await
    .unwrap();

    assert!(inserted.is_empty());
    assert_eq!(updated.len(), 1);

    let notes: Vec<String> = sqlx::query_scalar("SELECT note FROM event")
        .fetch_all(conns.get(None).unwrap())
        .await
        .unwrap();
    assert_eq!(notes, ["seen again"]);
}
