//! CSV report download

use chrono::NaiveDate;

use super::feedback::Feedback;
use crate::{
    api::ApiClient,
    error::{AppError, AppResult},
    models::{
        enums::ReportEntity,
        user::{PermissionName, User},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// `from` must not be after `to`, and neither may lie after `today`
pub fn validate_range(from: NaiveDate, to: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if from > to || to > today || from > today {
        return Err(AppError::Validation("Invalid date range".to_string()));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ReportsService {
    api: ApiClient,
    feedback: Feedback,
}

impl ReportsService {
    pub fn new(api: ApiClient, feedback: Feedback) -> Self {
        Self { api, feedback }
    }

    pub async fn download(
        &self,
        user: &User,
        from: NaiveDate,
        to: NaiveDate,
        entity: ReportEntity,
        today: NaiveDate,
    ) -> AppResult<Report> {
        self.feedback.guard(user, PermissionName::CreateReports)?;
        if let Err(e) = validate_range(from, to, today) {
            return self.feedback.reject(e);
        }

        match self.api.get_report(from, to, entity).await {
            Ok(content) => {
                tracing::info!("Downloaded {} report ({} bytes)", entity, content.len());
                self.feedback.notifier().success("Report downloaded successfully");
                Ok(Report {
                    file_name: entity.file_name(),
                    content,
                })
            }
            Err(e) => self.feedback.reject(e),
        }
    }
}
