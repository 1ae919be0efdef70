use futures::FutureExt;
use serde_json::Value;
use std::rc::Rc;

use crate::{
    api::{ApiClient, ApiError, DownloadedFile, Employee, EmployeePayload, UploadFile},
    state::crud::CrudOps,
};

/// List operations for the generic CRUD controller.
pub fn crud_ops(api: ApiClient) -> CrudOps<Employee, EmployeePayload> {
    let fetch_api = api.clone();
    let add_api = api.clone();
    let edit_api = api.clone();
    CrudOps {
        fetch: Rc::new(move || {
            let api = fetch_api.clone();
            async move { api.list_employees().await }.boxed_local()
        }),
        add: Rc::new(move |payload| {
            let api = add_api.clone();
            async move { api.create_employee(&payload).await.map(|_| ()) }.boxed_local()
        }),
        edit: Rc::new(move |id, payload| {
            let api = edit_api.clone();
            async move { api.update_employee(id, &payload).await.map(|_| ()) }.boxed_local()
        }),
        delete: Rc::new(move |id| {
            let api = api.clone();
            async move { api.delete_employee(id).await }.boxed_local()
        }),
    }
}

pub async fn import_employees(api: &ApiClient, file: UploadFile) -> Result<Value, ApiError> {
    api.import_employees(file).await
}

pub async fn export_employees(api: &ApiClient) -> Result<DownloadedFile, ApiError> {
    api.export_employees().await
}
