//! Integration tests for the document model layer: assign, stub, return, list.

mod common;

use chrono::{NaiveDate, Utc};
use qr_linker::errors::AppError;
use qr_linker::models::document::{self, AssignInput, DocumentStatus, ReturnInput};
use common::setup_test_db;

fn assign_input(recipient: &str) -> AssignInput {
    AssignInput {
        recipient: recipient.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_assign_creates_document() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    let before = Utc::now().naive_utc() - chrono::Duration::seconds(1);
    let doc = document::assign(&mut conn, "ABC123", &assign_input("Taro"))
        .await
        .expect("assign");
    let after = Utc::now().naive_utc() + chrono::Duration::seconds(1);

    assert_eq!(doc.qr_id, "ABC123");
    assert_eq!(doc.status, DocumentStatus::Assigned);
    assert_eq!(doc.recipient.as_deref(), Some("Taro"));
    let at = doc.distributed_at.expect("distributed_at defaults to now");
    assert!(at >= before && at <= after, "{at} not within [{before}, {after}]");

    let found = document::find_by_qr_id(&mut conn, "ABC123")
        .await
        .expect("query")
        .expect("not found");
    assert_eq!(found, doc);
}

#[tokio::test]
async fn test_assign_updates_in_place() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    let first = document::assign(
        &mut conn,
        "DOC-1",
        &AssignInput {
            recipient: "Taro".to_string(),
            title: Some("Manual".to_string()),
            notes: Some("first".to_string()),
            extra_values: [Some("Sales".to_string()), None, None, None, None],
            ..Default::default()
        },
    )
    .await
    .expect("assign");

    let due = NaiveDate::from_ymd_opt(2024, 12, 31);
    let second = document::assign(
        &mut conn,
        "DOC-1",
        &AssignInput {
            recipient: "Hanako".to_string(),
            due_date: due,
            extra_values: [None, Some("3F".to_string()), None, None, None],
            ..Default::default()
        },
    )
    .await
    .expect("reassign");

    assert_eq!(second.id, first.id);
    assert_eq!(second.recipient.as_deref(), Some("Hanako"));
    // A blank title keeps the stored one; notes and extra values are replaced.
    assert_eq!(second.title.as_deref(), Some("Manual"));
    assert_eq!(second.notes, None);
    assert_eq!(second.extra_values[0], None);
    assert_eq!(second.extra_values[1].as_deref(), Some("3F"));
    assert_eq!(second.due_date, due);

    let all = document::find_all(&mut conn, None).await.expect("list");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_explicit_distributed_at_is_kept() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    let at = NaiveDate::from_ymd_opt(2024, 4, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid datetime");
    let doc = document::assign(
        &mut conn,
        "TIMED",
        &AssignInput {
            recipient: "Taro".to_string(),
            distributed_at: Some(at),
            ..Default::default()
        },
    )
    .await
    .expect("assign");
    assert_eq!(doc.distributed_at, Some(at));
}

#[tokio::test]
async fn test_return_appends_notes() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    document::assign(
        &mut conn,
        "NOTE-1",
        &AssignInput {
            recipient: "Taro".to_string(),
            notes: Some("handed over".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("assign");

    let doc = document::record_return(
        &mut conn,
        "NOTE-1",
        &ReturnInput {
            returned_by: Some("Taro".to_string()),
            notes: Some("slightly damaged".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("return");

    assert_eq!(doc.status, DocumentStatus::Returned);
    assert_eq!(doc.notes.as_deref(), Some("handed over\nslightly damaged"));
    assert_eq!(doc.returned_by.as_deref(), Some("Taro"));
    assert!(doc.returned_at.is_some());
    // Distribution data survives the return.
    assert_eq!(doc.recipient.as_deref(), Some("Taro"));
}

#[tokio::test]
async fn test_return_without_fields() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    document::assign(&mut conn, "ABC123", &assign_input("Taro"))
        .await
        .expect("assign");
    let doc = document::record_return(&mut conn, "ABC123", &ReturnInput::default())
        .await
        .expect("return");

    assert_eq!(doc.status, DocumentStatus::Returned);
    assert!(doc.returned_at.is_some());
    assert_eq!(doc.returned_by, None);
    assert_eq!(doc.notes, None);
}

#[tokio::test]
async fn test_return_unknown_is_not_found() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    let result = document::record_return(&mut conn, "NEVER-SEEN", &ReturnInput::default()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_stub_then_return() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    let stub = document::find_or_create_stub(&mut conn, "STUB-1")
        .await
        .expect("stub");
    assert_eq!(stub.status, DocumentStatus::Assigned);
    assert_eq!(stub.recipient, None);
    assert_eq!(stub.distributed_at, None);

    // A second visit reuses the same row.
    let again = document::find_or_create_stub(&mut conn, "STUB-1")
        .await
        .expect("stub again");
    assert_eq!(again.id, stub.id);

    let returned = document::record_return(&mut conn, "STUB-1", &ReturnInput::default())
        .await
        .expect("return");
    assert_eq!(returned.status, DocumentStatus::Returned);
}

#[tokio::test]
async fn test_reassign_after_return_goes_back_to_assigned() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    document::assign(&mut conn, "CYCLE", &assign_input("Taro"))
        .await
        .expect("assign");
    document::record_return(&mut conn, "CYCLE", &ReturnInput::default())
        .await
        .expect("return");
    let doc = document::assign(&mut conn, "CYCLE", &assign_input("Jiro"))
        .await
        .expect("reassign");

    assert_eq!(doc.status, DocumentStatus::Assigned);
    assert_eq!(doc.recipient.as_deref(), Some("Jiro"));
}

#[tokio::test]
async fn test_find_all_filters_by_status() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    for qr in ["A", "B", "C"] {
        document::assign(&mut conn, qr, &assign_input("Taro"))
            .await
            .expect("assign");
    }
    document::record_return(&mut conn, "B", &ReturnInput::default())
        .await
        .expect("return");

    let assigned = document::find_all(&mut conn, Some(&DocumentStatus::Assigned))
        .await
        .expect("list");
    let qr_ids: Vec<_> = assigned.iter().map(|d| d.qr_id.as_str()).collect();
    assert_eq!(qr_ids, ["A", "C"]);

    let returned = document::find_all(&mut conn, Some(&DocumentStatus::Returned))
        .await
        .expect("list");
    assert_eq!(returned.len(), 1);
    assert_eq!(returned[0].qr_id, "B");

    let none_new = document::find_all(&mut conn, Some(&DocumentStatus::New))
        .await
        .expect("list");
    assert!(none_new.is_empty());

    let counts = document::count_by_status(&mut conn).await.expect("count");
    assert_eq!(counts.assigned, 2);
    assert_eq!(counts.returned, 1);
    assert_eq!(counts.new, 0);
    assert_eq!(counts.total(), 3);
}

#[tokio::test]
async fn test_unrecognised_status_still_lists() {
    let db = setup_test_db().await;
    let mut conn = db.pool().acquire().await.expect("acquire");

    sqlx::query("INSERT INTO documents (qr_id, status) VALUES ('LEGACY', 'lost')")
        .execute(&mut *conn)
        .await
        .expect("insert");
    document::assign(&mut conn, "A", &assign_input("Taro"))
        .await
        .expect("assign");

    let all = document::find_all(&mut conn, None).await.expect("list");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].status, DocumentStatus::Other("lost".to_string()));
    assert_eq!(all[0].status.as_str(), "lost");

    let counts = document::count_by_status(&mut conn).await.expect("count");
    assert_eq!(counts.assigned, 1);
    assert_eq!(counts.other, 1);
    assert_eq!(counts.total(), 2);

    // Returning it moves it back onto the known track.
    let doc = document::record_return(&mut conn, "LEGACY", &ReturnInput::default())
        .await
        .expect("return");
    assert_eq!(doc.status, DocumentStatus::Returned);
}
