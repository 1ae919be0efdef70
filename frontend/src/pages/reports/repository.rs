use crate::api::{ApiClient, ApiError, DateRange, DownloadedFile, Report, ReportDetail};

use super::utils::generate_requests;

pub async fn fetch_reports(api: &ApiClient) -> Result<Vec<Report>, ApiError> {
    api.list_reports().await
}

/// Generates the monthly and exception reports in turn; stops at the first failure.
pub async fn generate_pair(api: &ApiClient, range: &DateRange) -> Result<(), ApiError> {
    for request in generate_requests(range) {
        api.generate_report(&request).await?;
    }
    Ok(())
}

pub async fn view(api: &ApiClient, id: &str) -> Result<ReportDetail, ApiError> {
    api.view_report(id).await
}

pub async fn download(api: &ApiClient, id: &str) -> Result<DownloadedFile, ApiError> {
    api.download_report(id).await
}

pub async fn export_detailed(api: &ApiClient, range: &DateRange) -> Result<DownloadedFile, ApiError> {
    api.export_detailed_report(range).await
}
