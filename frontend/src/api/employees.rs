use super::{
    client::ApiClient,
    types::{ApiError, DownloadedFile, Employee, EmployeePayload, UploadFile},
};
use serde_json::Value;

impl ApiClient {
    pub async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_list("/employees").await
    }

    pub async fn create_employee(&self, payload: &EmployeePayload) -> Result<Employee, ApiError> {
        self.post_json("/employees", payload).await
    }

    pub async fn update_employee(
        &self,
        id: i64,
        payload: &EmployeePayload,
    ) -> Result<Employee, ApiError> {
        self.put_json(&format!("/employees/{}", id), payload).await
    }

    pub async fn delete_employee(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/employees/{}", id)).await
    }

    pub async fn import_employees(&self, file: UploadFile) -> Result<Value, ApiError> {
        self.upload("/employees/import", "file", file).await
    }

    pub async fn export_employees(&self) -> Result<DownloadedFile, ApiError> {
        self.download("/employees/export", &()).await
    }
}
