use crate::api::{ApiClient, ApiError, Profile, ProfileUpdate};

pub async fn fetch_profile(api: &ApiClient) -> Result<Profile, ApiError> {
    api.get_profile().await
}

pub async fn update_profile(api: &ApiClient, update: &ProfileUpdate) -> Result<Profile, ApiError> {
    api.update_profile(update).await
}
