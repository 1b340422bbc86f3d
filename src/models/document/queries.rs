use chrono::{NaiveDateTime, SubsecRound, Utc};
use sqlx::{Connection, SqliteConnection};

use crate::errors::AppError;
use super::types::*;

const SELECT_COLUMNS: &str = "SELECT id, qr_id, title, recipient, distributed_by, distributed_at, \
                                     due_date, field1_value, field2_value, field3_value, \
                                     field4_value, field5_value, returned_by, returned_at, \
                                     status, notes \
                              FROM documents";

/// Current server time, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

/// Combine existing notes with a newly submitted note.
pub fn append_note(existing: Option<&str>, note: Option<&str>) -> Option<String> {
    match (existing.filter(|e| !e.is_empty()), note.filter(|n| !n.is_empty())) {
        (Some(existing), Some(note)) => Some(format!("{existing}\n{note}")),
        (None, Some(note)) => Some(note.to_string()),
        (existing, None) => existing.map(str::to_string),
    }
}

pub async fn find_by_qr_id(
    conn: &mut SqliteConnection,
    qr_id: &str,
) -> Result<Option<Document>, AppError> {
    let doc = sqlx::query_as::<_, Document>(&format!("{SELECT_COLUMNS} WHERE qr_id = ?1"))
        .bind(qr_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(doc)
}

/// All documents in insertion order, optionally restricted to one status.
pub async fn find_all(
    conn: &mut SqliteConnection,
    status: Option<&DocumentStatus>,
) -> Result<Vec<Document>, AppError> {
    let docs = match status {
        Some(status) => {
            sqlx::query_as::<_, Document>(&format!(
                "{SELECT_COLUMNS} WHERE status = ?1 ORDER BY id"
            ))
            .bind(status.as_str())
            .fetch_all(&mut *conn)
            .await?
        }
        None => {
            sqlx::query_as::<_, Document>(&format!("{SELECT_COLUMNS} ORDER BY id"))
                .fetch_all(&mut *conn)
                .await?
        }
    };
    Ok(docs)
}

pub async fn count_by_status(conn: &mut SqliteConnection) -> Result<StatusCounts, AppError> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM documents GROUP BY status")
            .fetch_all(&mut *conn)
            .await?;

    let mut counts = StatusCounts::default();
    for (status, n) in rows {
        match DocumentStatus::from_stored(&status) {
            DocumentStatus::New => counts.new = n,
            DocumentStatus::Assigned => counts.assigned = n,
            DocumentStatus::Returned => counts.returned = n,
            DocumentStatus::Other(_) => counts.other += n,
        }
    }
    Ok(counts)
}

/// Record distribution details, creating the document if it does not exist yet.
///
/// Always leaves the document `assigned`, including one that was already returned.
pub async fn assign(
    conn: &mut SqliteConnection,
    qr_id: &str,
    input: &AssignInput,
) -> Result<Document, AppError> {
    let mut tx = conn.begin().await?;

    sqlx::query("INSERT OR IGNORE INTO documents (qr_id, status) VALUES (?1, 'new')")
        .bind(qr_id)
        .execute(&mut *tx)
        .await?;

    let distributed_at = input.distributed_at.unwrap_or_else(now);
    let [f1, f2, f3, f4, f5] = &input.extra_values;

    sqlx::query(
        "UPDATE documents SET \
             title = COALESCE(?1, title), \
             recipient = ?2, \
             distributed_by = ?3, \
             distributed_at = ?4, \
             due_date = ?5, \
             status = ?6, \
             notes = ?7, \
             field1_value = ?8, field2_value = ?9, field3_value = ?10, \
             field4_value = ?11, field5_value = ?12 \
         WHERE qr_id = ?13",
    )
    .bind(&input.title)
    .bind(&input.recipient)
    .bind(&input.distributed_by)
    .bind(distributed_at)
    .bind(input.due_date)
    .bind(DocumentStatus::Assigned.as_str())
    .bind(&input.notes)
    .bind(f1)
    .bind(f2)
    .bind(f3)
    .bind(f4)
    .bind(f5)
    .bind(qr_id)
    .execute(&mut *tx)
    .await?;

    let doc = find_by_qr_id(&mut tx, qr_id).await?.ok_or(AppError::NotFound)?;
    tx.commit().await?;

    log::info!("Assigned {qr_id} to {}", input.recipient);
    Ok(doc)
}

/// Load the document, or create a bare `assigned` placeholder so that a
/// return can be recorded for a QR code that was never distributed.
pub async fn find_or_create_stub(
    conn: &mut SqliteConnection,
    qr_id: &str,
) -> Result<Document, AppError> {
    if let Some(doc) = find_by_qr_id(conn, qr_id).await? {
        return Ok(doc);
    }

    let inserted = sqlx::query("INSERT OR IGNORE INTO documents (qr_id, status) VALUES (?1, ?2)")
        .bind(qr_id)
        .bind(DocumentStatus::Assigned.as_str())
        .execute(&mut *conn)
        .await?
        .rows_affected();
    if inserted > 0 {
        log::info!("Created stub document for {qr_id}");
    }

    find_by_qr_id(conn, qr_id).await?.ok_or(AppError::NotFound)
}

/// Mark an existing document returned. Fails with `NotFound` for an unknown QR ID.
pub async fn record_return(
    conn: &mut SqliteConnection,
    qr_id: &str,
    input: &ReturnInput,
) -> Result<Document, AppError> {
    let mut tx = conn.begin().await?;

    let doc = find_by_qr_id(&mut tx, qr_id).await?.ok_or(AppError::NotFound)?;
    let notes = append_note(doc.notes.as_deref(), input.notes.as_deref());
    let returned_at = input.returned_at.unwrap_or_else(now);

    sqlx::query(
        "UPDATE documents SET returned_by = ?1, returned_at = ?2, status = ?3, notes = ?4 \
         WHERE id = ?5",
    )
    .bind(&input.returned_by)
    .bind(returned_at)
    .bind(DocumentStatus::Returned.as_str())
    .bind(&notes)
    .bind(doc.id)
    .execute(&mut *tx)
    .await?;

    let updated = find_by_qr_id(&mut tx, qr_id).await?.ok_or(AppError::NotFound)?;
    tx.commit().await?;

    log::info!("Recorded return of {qr_id}");
    Ok(updated)
}
