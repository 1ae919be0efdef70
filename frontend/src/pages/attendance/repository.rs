use serde_json::Value;

use crate::api::{
    ApiClient, ApiError, AttendancePayload, AttendanceQuery, AttendanceRecord, DownloadedFile,
    Employee, ProcessStatus, SyncResult, UploadFile,
};

pub async fn fetch_records(
    api: &ApiClient,
    query: &AttendanceQuery,
) -> Result<Vec<AttendanceRecord>, ApiError> {
    api.list_attendance(query).await
}

pub async fn fetch_employees(api: &ApiClient) -> Result<Vec<Employee>, ApiError> {
    api.list_employees().await
}

pub async fn save_record(
    api: &ApiClient,
    record_id: Option<i64>,
    payload: &AttendancePayload,
) -> Result<Value, ApiError> {
    match record_id {
        Some(id) => api.update_attendance(id, payload).await,
        None => api.create_attendance(payload).await,
    }
}

pub async fn set_process_status(
    api: &ApiClient,
    id: i64,
    status: ProcessStatus,
) -> Result<(), ApiError> {
    api.update_process_status(id, status, None).await
}

pub async fn import_records(api: &ApiClient, file: UploadFile) -> Result<Value, ApiError> {
    api.import_attendance(file).await
}

pub async fn export_records(
    api: &ApiClient,
    query: &AttendanceQuery,
) -> Result<DownloadedFile, ApiError> {
    api.export_attendance(query).await
}

pub async fn sync_external(api: &ApiClient) -> Result<SyncResult, ApiError> {
    api.sync_external_attendance().await
}
