use chrono::NaiveDate;
use serde::Serialize;

use super::{
    client::ApiClient,
    types::{ApiError, DashboardStats, ExceptionRecord, ExceptionStat},
};

#[derive(Serialize)]
struct DayQuery {
    date: NaiveDate,
}

/// Everything the dashboard shows for one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub exception_stats: Vec<ExceptionStat>,
    pub exception_records: Vec<ExceptionRecord>,
}

impl ApiClient {
    pub async fn dashboard_stats(&self, date: NaiveDate) -> Result<DashboardStats, ApiError> {
        self.get_json_with_query("/dashboard/stats", &DayQuery { date })
            .await
    }

    pub async fn dashboard_exception_stats(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ExceptionStat>, ApiError> {
        self.get_list_with_query("/dashboard/exception-stats", &DayQuery { date })
            .await
    }

    pub async fn dashboard_exception_records(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ExceptionRecord>, ApiError> {
        self.get_list_with_query("/dashboard/exception-records", &DayQuery { date })
            .await
    }

    /// Issues the three dashboard calls together and joins them.
    pub async fn dashboard_snapshot(&self, date: NaiveDate) -> Result<DashboardSnapshot, ApiError> {
        let (stats, exception_stats, exception_records) = futures::join!(
            self.dashboard_stats(date),
            self.dashboard_exception_stats(date),
            self.dashboard_exception_records(date)
        );
        Ok(DashboardSnapshot {
            stats: stats?,
            exception_stats: exception_stats?,
            exception_records: exception_records?,
        })
    }
}
