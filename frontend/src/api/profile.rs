use super::{
    client::ApiClient,
    types::{ApiError, ChangePasswordRequest, Profile, ProfileUpdate},
};
use serde_json::Value;

impl ApiClient {
    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.get_json("/my/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.put_json("/my/profile", update).await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Value, ApiError> {
        self.post_json("/my/change-password", request).await
    }
}
