use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::NotificationRepository;
use crate::models::{NewNotification, Notification, NotificationType};
use crate::utils::errors::{map_db_error, AppError, AppResult};

const NOTIFICATION_COLUMNS: &str = "id, notification_type, title, message, read, created_at";

#[derive(Debug, FromRow)]
struct NotificationRow {
    id: Uuid,
    notification_type: String,
    title: String,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: row.id,
            notification_type: row
                .notification_type
                .parse::<NotificationType>()
                .map_err(AppError::Internal)?,
            title: row.title,
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        })
    }
}

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            INSERT INTO notifications (id, notification_type, title, message, read, created_at)
            VALUES ($1, $2, $3, $4, FALSE, $5)
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(notification.notification_type.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error creating notification"))?;

        row.try_into()
    }

    async fn list(&self, unread_only: bool, limit: i64) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            r#"
            SELECT {} FROM notifications
            WHERE ($1 = FALSE OR read = FALSE)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(unread_only)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Error listing notifications"))?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error marking notification"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self) -> AppResult<u64> {
        let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE read = FALSE")
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Error marking notifications"))?;

        Ok(result.rows_affected())
    }
}
