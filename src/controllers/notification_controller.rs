use uuid::Uuid;

use crate::dto::notification_dto::{MarkReadResponse, NotificationListQuery, NotificationListResponse};
use crate::repositories::Repositories;
use crate::utils::errors::{AppError, AppResult};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

pub struct NotificationController {
    repos: Repositories,
}

impl NotificationController {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn list(&self, query: NotificationListQuery) -> AppResult<NotificationListResponse> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let notifications = self.repos.notifications.list(query.unread_only, limit).await?;
        let unread_count = notifications.iter().filter(|n| !n.read).count();

        Ok(NotificationListResponse {
            success: true,
            notifications,
            unread_count,
        })
    }

    pub async fn mark_read(&self, id: Uuid) -> AppResult<MarkReadResponse> {
        if !self.repos.notifications.mark_read(id).await? {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }
        Ok(MarkReadResponse {
            success: true,
            updated_count: 1,
        })
    }

    pub async fn mark_all_read(&self) -> AppResult<MarkReadResponse> {
        let updated_count = self.repos.notifications.mark_all_read().await?;
        Ok(MarkReadResponse {
            success: true,
            updated_count,
        })
    }
}
