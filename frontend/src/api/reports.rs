use super::{
    client::{encode_segment, ApiClient},
    types::{ApiError, DateRange, DownloadedFile, GenerateReportRequest, Report, ReportDetail},
};
use serde_json::Value;

impl ApiClient {
    pub async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.get_list("/reports").await
    }

    pub async fn generate_report(&self, request: &GenerateReportRequest) -> Result<Value, ApiError> {
        self.post_json("/reports", request).await
    }

    pub async fn view_report(&self, id: &str) -> Result<ReportDetail, ApiError> {
        self.get_json(&format!("/reports/view/{}", encode_segment(id)))
            .await
    }

    pub async fn download_report(&self, id: &str) -> Result<DownloadedFile, ApiError> {
        self.download(&format!("/reports/download/{}", encode_segment(id)), &())
            .await
    }

    /// Per-record export for a date range; also backs the dashboard's
    /// exception export.
    pub async fn export_detailed_report(&self, range: &DateRange) -> Result<DownloadedFile, ApiError> {
        self.download("/reports/export_detailed", range).await
    }
}
