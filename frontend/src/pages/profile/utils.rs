use leptos::*;

use crate::{
    api::{ApiError, Profile, ProfileUpdate},
    pages::employees::utils::is_email,
};

const MAX_TEXT_LEN: usize = 50;

/// Mainland mobile numbers: eleven digits starting with 13 through 19.
pub fn is_mobile(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 11
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
        && bytes.iter().all(u8::is_ascii_digit)
}

fn required(value: &str, message: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::validation(message))
    } else {
        Ok(trimmed.to_string())
    }
}

fn bounded(value: String, message: &str) -> Result<String, ApiError> {
    if value.chars().count() > MAX_TEXT_LEN {
        Err(ApiError::validation(message))
    } else {
        Ok(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
}

impl ProfileDraft {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
            position: profile.position.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ProfileUpdate, ApiError> {
        let name = bounded(required(&self.name, "请输入姓名")?, "姓名不能超过50个字符")?;
        let email = required(&self.email, "请输入邮箱")?;
        if !is_email(&email) {
            return Err(ApiError::validation("请输入有效的邮箱地址"));
        }
        let phone = required(&self.phone, "请输入手机号")?;
        if !is_mobile(&phone) {
            return Err(ApiError::validation("请输入有效的手机号"));
        }
        let position = bounded(required(&self.position, "请输入职位")?, "职位不能超过50个字符")?;
        Ok(ProfileUpdate {
            name,
            email,
            phone,
            position,
        })
    }
}

#[derive(Clone, Copy)]
pub struct ProfileForm {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub position: RwSignal<String>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            phone: create_rw_signal(String::new()),
            position: create_rw_signal(String::new()),
        }
    }

    pub fn load(&self, draft: ProfileDraft) {
        self.name.set(draft.name);
        self.email.set(draft.email);
        self.phone.set(draft.phone);
        self.position.set(draft.position);
    }

    pub fn draft(&self) -> ProfileDraft {
        ProfileDraft {
            name: self.name.get_untracked(),
            email: self.email.get_untracked(),
            phone: self.phone.get_untracked(),
            position: self.position.get_untracked(),
        }
    }
}

/// `department - position` under the name, skipping missing parts.
pub fn subtitle(profile: &Profile) -> String {
    [profile.department.as_deref(), profile.position.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProfileDraft {
        ProfileDraft {
            name: " 王五 ".into(),
            email: "wang@example.com".into(),
            phone: "13800138000".into(),
            position: "工程师".into(),
        }
    }

    #[test]
    fn valid_draft_trims_fields() {
        let update = draft().validate().unwrap();
        assert_eq!(update.name, "王五");
        assert_eq!(update.position, "工程师");
    }

    #[test]
    fn rejects_bad_contact_details() {
        let mut bad_email = draft();
        bad_email.email = "wang.example.com".into();
        assert_eq!(bad_email.validate().unwrap_err().error, "请输入有效的邮箱地址");

        let mut bad_phone = draft();
        bad_phone.phone = "12800138000".into();
        assert_eq!(bad_phone.validate().unwrap_err().error, "请输入有效的手机号");

        let mut long_name = draft();
        long_name.name = "名".repeat(51);
        assert_eq!(long_name.validate().unwrap_err().error, "姓名不能超过50个字符");
    }

    #[test]
    fn mobile_numbers() {
        assert!(is_mobile("19912345678"));
        assert!(!is_mobile("1991234567"));
        assert!(!is_mobile("1991234567a"));
    }
}
