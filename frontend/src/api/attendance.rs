use serde::Serialize;
use serde_json::Value;

use super::{
    client::ApiClient,
    types::{
        ApiError, AttendancePayload, AttendanceQuery, AttendanceRecord, DownloadedFile,
        ProcessStatus, SyncResult, UploadFile,
    },
};

#[derive(Serialize)]
struct ProcessStatusQuery<'a> {
    process_status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    remarks: Option<&'a str>,
}

impl ApiClient {
    pub async fn list_attendance(
        &self,
        query: &AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.get_list_with_query("/attendance", query).await
    }

    pub async fn get_attendance(&self, id: i64) -> Result<AttendanceRecord, ApiError> {
        self.get_json(&format!("/attendance/{}", id)).await
    }

    pub async fn create_attendance(&self, payload: &AttendancePayload) -> Result<Value, ApiError> {
        self.post_json("/attendance", payload).await
    }

    pub async fn update_attendance(
        &self,
        id: i64,
        payload: &AttendancePayload,
    ) -> Result<Value, ApiError> {
        self.put_json(&format!("/attendance/{}", id), payload).await
    }

    pub async fn update_process_status(
        &self,
        id: i64,
        status: ProcessStatus,
        remarks: Option<&str>,
    ) -> Result<(), ApiError> {
        let query = ProcessStatusQuery {
            process_status: status.as_str(),
            remarks: remarks.filter(|text| !text.trim().is_empty()),
        };
        self.patch_query(&format!("/attendance/{}/process-status", id), &query)
            .await
    }

    pub async fn import_attendance(&self, file: UploadFile) -> Result<Value, ApiError> {
        self.upload("/attendance/import", "file", file).await
    }

    pub async fn export_attendance(
        &self,
        query: &AttendanceQuery,
    ) -> Result<DownloadedFile, ApiError> {
        self.download("/attendance/export", query).await
    }

    pub async fn sync_external_attendance(&self) -> Result<SyncResult, ApiError> {
        self.post_empty("/attendance/sync-external").await
    }
}
