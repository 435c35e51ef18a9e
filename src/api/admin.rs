//! Admin reports

use chrono::NaiveDate;
use serde::Serialize;

use super::ApiClient;
use crate::{error::AppResult, models::enums::ReportEntity};

#[derive(Serialize)]
struct ReportQuery {
    from_: String,
    to: String,
    entity: &'static str,
}

impl ApiClient {
    /// Download a CSV report for the inclusive date range
    pub async fn get_report(&self, from: NaiveDate, to: NaiveDate, entity: ReportEntity) -> AppResult<Vec<u8>> {
        let query = ReportQuery {
            from_: from.format("%Y-%m-%d").to_string(),
            to: to.format("%Y-%m-%d").to_string(),
            entity: entity.as_str(),
        };
        self.get_bytes("/admin/reports", &query).await
    }
}
