use crate::api::{ApiError, LoginRequest};
use leptos::*;

pub const LOGIN_FAILED_MESSAGE: &str = "登录失败，请检查您的用户名和密码";

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

impl LoginFormState {
    pub fn to_request(&self) -> Result<LoginRequest, ApiError> {
        let username = self.username.get_untracked();
        let password = self.password.get_untracked();
        validate_credentials(&username, &password)?;
        Ok(LoginRequest {
            username: username.trim().to_string(),
            password,
        })
    }
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::validation("请输入用户名"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("请输入密码"));
    }
    Ok(())
}

/// Any rejected sign-in is shown with the same message.
pub fn login_failure(error: ApiError) -> ApiError {
    ApiError {
        error: LOGIN_FAILED_MESSAGE.to_string(),
        ..error
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn form_state_trims_username() {
        with_runtime(|| {
            let form = LoginFormState::default();
            form.username.set("  li  ".into());
            form.password.set("secret".into());
            let request = form.to_request().unwrap();
            assert_eq!(request.username, "li");
            assert_eq!(request.password, "secret");
        });
    }
}
