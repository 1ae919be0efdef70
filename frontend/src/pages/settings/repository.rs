use crate::api::{ApiClient, ApiError, ChangePasswordRequest};

pub async fn change_password(api: &ApiClient, request: &ChangePasswordRequest) -> Result<(), ApiError> {
    api.change_password(request).await.map(|_| ())
}
