use leptos::*;

use crate::api::{ApiError, ChangePasswordRequest};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordDraft {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordDraft {
    /// Passwords are sent as typed; only emptiness ignores surrounding blanks.
    pub fn validate(&self) -> Result<ChangePasswordRequest, ApiError> {
        if self.current.trim().is_empty() {
            return Err(ApiError::validation("请输入当前密码"));
        }
        if self.new.trim().is_empty() {
            return Err(ApiError::validation("请输入新密码"));
        }
        if self.new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::validation("密码长度至少6位"));
        }
        if self.confirm.trim().is_empty() {
            return Err(ApiError::validation("请确认新密码"));
        }
        if self.new != self.confirm {
            return Err(ApiError::validation("新密码和确认密码不一致"));
        }
        Ok(ChangePasswordRequest {
            current_password: self.current.clone(),
            new_password: self.new.clone(),
        })
    }
}

/// Server messages the form can show inline in the page's language.
pub fn map_change_password_error(error: &ApiError) -> ApiError {
    match error.error.as_str() {
        "Current password is incorrect" => ApiError::validation("当前密码不正确"),
        "Current password and new password are required" => {
            ApiError::validation("请输入当前密码和新密码")
        }
        _ => ApiError::validation("密码修改失败，请检查当前密码是否正确"),
    }
}

#[derive(Clone, Copy)]
pub struct PasswordForm {
    pub current: RwSignal<String>,
    pub new: RwSignal<String>,
    pub confirm: RwSignal<String>,
}

impl PasswordForm {
    pub fn new() -> Self {
        Self {
            current: create_rw_signal(String::new()),
            new: create_rw_signal(String::new()),
            confirm: create_rw_signal(String::new()),
        }
    }

    pub fn reset(&self) {
        self.current.set(String::new());
        self.new.set(String::new());
        self.confirm.set(String::new());
    }

    pub fn draft(&self) -> PasswordDraft {
        PasswordDraft {
            current: self.current.get_untracked(),
            new: self.new.get_untracked(),
            confirm: self.confirm.get_untracked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(new: &str, confirm: &str) -> PasswordDraft {
        PasswordDraft {
            current: "old-pass".into(),
            new: new.into(),
            confirm: confirm.into(),
        }
    }

    #[test]
    fn new_password_needs_six_chars() {
        assert_eq!(draft("12345", "12345").validate().unwrap_err().error, "密码长度至少6位");
        assert!(draft("123456", "123456").validate().is_ok());
    }

    #[test]
    fn confirmation_must_match() {
        assert_eq!(
            draft("new-pass", "new-pas5").validate().unwrap_err().error,
            "新密码和确认密码不一致"
        );
        assert_eq!(draft("new-pass", "").validate().unwrap_err().error, "请确认新密码");
    }

    #[test]
    fn maps_known_server_messages() {
        let error = ApiError::validation("Current password is incorrect");
        assert_eq!(map_change_password_error(&error).error, "当前密码不正确");
        let other = ApiError::validation("boom");
        assert_eq!(
            map_change_password_error(&other).error,
            "密码修改失败，请检查当前密码是否正确"
        );
    }
}
