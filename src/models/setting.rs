use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection};

use crate::errors::AppError;
use crate::models::extra_field::{EXTRA_FIELD_COUNT, default_label};

const SETTINGS_ID: i64 = 1;

/// The singleton settings row: captions for the five extra-field slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub labels: [String; EXTRA_FIELD_COUNT],
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            labels: std::array::from_fn(|i| default_label(i + 1)),
        }
    }
}

impl<'r> FromRow<'r, SqliteRow> for AppSettings {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            labels: [
                row.try_get("field1_label")?,
                row.try_get("field2_label")?,
                row.try_get("field3_label")?,
                row.try_get("field4_label")?,
                row.try_get("field5_label")?,
            ],
        })
    }
}

/// Form data from the settings page.
#[derive(Debug, Default, serde::Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub field1_label: String,
    #[serde(default)]
    pub field2_label: String,
    #[serde(default)]
    pub field3_label: String,
    #[serde(default)]
    pub field4_label: String,
    #[serde(default)]
    pub field5_label: String,
}

impl SettingsForm {
    /// Trimmed labels, with blanks replaced by the positional default.
    pub fn normalized_labels(&self) -> [String; EXTRA_FIELD_COUNT] {
        let raw = [
            &self.field1_label,
            &self.field2_label,
            &self.field3_label,
            &self.field4_label,
            &self.field5_label,
        ];
        std::array::from_fn(|i| {
            let cleaned = raw[i].trim();
            if cleaned.is_empty() {
                default_label(i + 1)
            } else {
                cleaned.to_string()
            }
        })
    }
}

/// Insert the settings row with column defaults unless it already exists.
pub async fn ensure_row(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO app_settings (id) VALUES (?1)")
        .bind(SETTINGS_ID)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Load the settings row, creating it on first access.
pub async fn get_settings(conn: &mut SqliteConnection) -> Result<AppSettings, AppError> {
    ensure_row(conn).await?;
    let settings = sqlx::query_as::<_, AppSettings>(
        "SELECT field1_label, field2_label, field3_label, field4_label, field5_label \
         FROM app_settings WHERE id = ?1",
    )
    .bind(SETTINGS_ID)
    .fetch_one(&mut *conn)
    .await?;
    Ok(settings)
}

/// Overwrite all five labels.
pub async fn save_labels(
    conn: &mut SqliteConnection,
    labels: &[String; EXTRA_FIELD_COUNT],
) -> Result<(), AppError> {
    ensure_row(conn).await?;
    sqlx::query(
        "UPDATE app_settings \
         SET field1_label = ?1, field2_label = ?2, field3_label = ?3, \
             field4_label = ?4, field5_label = ?5 \
         WHERE id = ?6",
    )
    .bind(&labels[0])
    .bind(&labels[1])
    .bind(&labels[2])
    .bind(&labels[3])
    .bind(&labels[4])
    .bind(SETTINGS_ID)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
