use super::{
    client::ApiClient,
    types::{ApiError, Employee, LoginRequest, LoginResponse, StoredUser},
};

impl ApiClient {
    /// Exchanges credentials for a token and opens the session.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let mut response: LoginResponse = self.post_json("/auth/login", request).await?;
        if response.user.is_none() {
            response.user = Some(StoredUser {
                id: None,
                username: request.username.clone(),
                role: None,
                is_admin: false,
            });
        }
        self.session()
            .begin(&response)
            .map_err(|e| ApiError::unknown(e.to_string()))?;
        Ok(response)
    }

    pub async fn get_me(&self) -> Result<Employee, ApiError> {
        self.get_json("/employees/me").await
    }

    /// Refreshes the stored user blob from `/employees/me`.
    pub async fn refresh_current_user(&self) -> Result<StoredUser, ApiError> {
        let me = self.get_me().await?;
        let user = StoredUser::from_employee(&me);
        self.session()
            .store_user(&user)
            .map_err(|e| ApiError::unknown(e.to_string()))?;
        Ok(user)
    }

    pub fn logout(&self) {
        self.session().end();
    }
}
