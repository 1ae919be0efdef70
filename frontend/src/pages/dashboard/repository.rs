use chrono::NaiveDate;

use crate::api::{
    ApiClient, ApiError, AttendanceRecord, DashboardSnapshot, DateRange, DownloadedFile,
    ProcessStatus,
};

pub async fn load_snapshot(api: &ApiClient, date: NaiveDate) -> Result<DashboardSnapshot, ApiError> {
    api.dashboard_snapshot(date).await
}

pub async fn export_exception_records(
    api: &ApiClient,
    date: NaiveDate,
) -> Result<DownloadedFile, ApiError> {
    api.export_detailed_report(&DateRange {
        start_date: date,
        end_date: date,
    })
    .await
}

pub async fn fetch_record(api: &ApiClient, id: i64) -> Result<AttendanceRecord, ApiError> {
    api.get_attendance(id).await
}

pub async fn set_process_status(
    api: &ApiClient,
    id: i64,
    status: ProcessStatus,
) -> Result<(), ApiError> {
    api.update_process_status(id, status, None).await
}
