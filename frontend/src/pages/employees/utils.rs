use chrono::NaiveDate;
use leptos::*;

use crate::{
    api::{ApiError, Employee, EmployeePayload},
    utils::time::{format_date, parse_date_input},
};

pub const SEARCH_FIELDS: &[&str] = &["name", "employee_no"];
pub const GENDERS: [&str; 2] = ["男", "女"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Add => "添加员工",
            Self::Edit(_) => "编辑员工",
        }
    }
}

/// Plain snapshot of the employee form, validated into a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub employee_no: String,
    pub name: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub hire_date: String,
    pub contract_end_date: String,
    pub password: String,
}

impl EmployeeDraft {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            employee_no: employee.employee_no.clone(),
            name: employee.name.clone(),
            gender: employee.gender.clone().unwrap_or_default(),
            email: employee.email.clone().unwrap_or_default(),
            phone: employee.phone.clone().unwrap_or_default(),
            position: employee.position.clone().unwrap_or_default(),
            hire_date: employee.hire_date.map(format_date).unwrap_or_default(),
            contract_end_date: employee.contract_end_date.map(format_date).unwrap_or_default(),
            password: String::new(),
        }
    }

    /// The password is required only when creating an account.
    pub fn validate(&self, mode: FormMode) -> Result<EmployeePayload, ApiError> {
        let employee_no = required(&self.employee_no, "请输入工号")?;
        let name = required(&self.name, "请输入姓名")?;
        let gender = required(&self.gender, "请选择性别")?;
        let email = required(&self.email, "请输入邮箱")?;
        if !is_email(&email) {
            return Err(ApiError::validation("请输入有效的邮箱地址"));
        }
        let phone = required(&self.phone, "请输入电话号码")?;
        let password = match mode {
            FormMode::Add => Some(required(&self.password, "请输入密码")?),
            FormMode::Edit(_) => Some(self.password.trim().to_string()).filter(|p| !p.is_empty()),
        };
        let position = required(&self.position, "请输入职位")?;
        let hire_date = parse_date_input(&self.hire_date)
            .ok_or_else(|| ApiError::validation("请选择入职日期"))?;
        let contract_end_date = parse_date_input(&self.contract_end_date);

        Ok(EmployeePayload {
            employee_no,
            name,
            gender,
            email,
            phone,
            position,
            hire_date,
            contract_end_date,
            password,
        })
    }
}

fn required(value: &str, message: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::validation(message))
    } else {
        Ok(trimmed.to_string())
    }
}

/// One `@` with a non-empty local part and a dotted domain.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
            .unwrap_or(false)
        && !value.chars().any(char::is_whitespace)
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("员工信息_{}.xlsx", format_date(today))
}

/// Reactive fields bound to the add/edit modal inputs.
#[derive(Clone, Copy)]
pub struct EmployeeForm {
    pub employee_no: RwSignal<String>,
    pub name: RwSignal<String>,
    pub gender: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub position: RwSignal<String>,
    pub hire_date: RwSignal<String>,
    pub contract_end_date: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self {
            employee_no: create_rw_signal(String::new()),
            name: create_rw_signal(String::new()),
            gender: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            phone: create_rw_signal(String::new()),
            position: create_rw_signal(String::new()),
            hire_date: create_rw_signal(String::new()),
            contract_end_date: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }

    pub fn load(&self, draft: EmployeeDraft) {
        self.employee_no.set(draft.employee_no);
        self.name.set(draft.name);
        self.gender.set(draft.gender);
        self.email.set(draft.email);
        self.phone.set(draft.phone);
        self.position.set(draft.position);
        self.hire_date.set(draft.hire_date);
        self.contract_end_date.set(draft.contract_end_date);
        self.password.set(draft.password);
    }

    pub fn reset(&self) {
        self.load(EmployeeDraft::default());
    }

    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            employee_no: self.employee_no.get_untracked(),
            name: self.name.get_untracked(),
            gender: self.gender.get_untracked(),
            email: self.email.get_untracked(),
            phone: self.phone.get_untracked(),
            position: self.position.get_untracked(),
            hire_date: self.hire_date.get_untracked(),
            contract_end_date: self.contract_end_date.get_untracked(),
            password: self.password.get_untracked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EmployeeDraft {
        EmployeeDraft {
            employee_no: " E001 ".into(),
            name: "王五".into(),
            gender: "男".into(),
            email: "wang@example.com".into(),
            phone: "13800000000".into(),
            position: "工程师".into(),
            hire_date: "2023-07-01".into(),
            contract_end_date: String::new(),
            password: "secret1".into(),
        }
    }

    #[test]
    fn add_requires_password_and_trims_fields() {
        let payload = filled().validate(FormMode::Add).unwrap();
        assert_eq!(payload.employee_no, "E001");
        assert_eq!(payload.password.as_deref(), Some("secret1"));
        assert_eq!(payload.contract_end_date, None);

        let mut draft = filled();
        draft.password.clear();
        let err = draft.validate(FormMode::Add).unwrap_err();
        assert_eq!(err.error, "请输入密码");
        assert!(draft.validate(FormMode::Edit(3)).unwrap().password.is_none());
    }

    #[test]
    fn first_missing_field_wins() {
        let err = EmployeeDraft::default().validate(FormMode::Add).unwrap_err();
        assert_eq!(err.error, "请输入工号");

        let mut draft = filled();
        draft.hire_date = "soon".into();
        assert_eq!(draft.validate(FormMode::Add).unwrap_err().error, "请选择入职日期");
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(is_email("a@b.cn"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.cn"));
        assert!(!is_email("a b@c.cn"));
        assert!(!is_email("a@@c.cn"));

        let mut draft = filled();
        draft.email = "nope".into();
        assert_eq!(draft.validate(FormMode::Add).unwrap_err().error, "请输入有效的邮箱地址");
    }

    #[test]
    fn draft_round_trips_existing_employee() {
        let employee = Employee {
            employee_id: 5,
            employee_no: "E005".into(),
            name: "赵六".into(),
            gender: Some("女".into()),
            email: Some("zhao@example.com".into()),
            phone: Some("1".into()),
            position: Some("HR".into()),
            hire_date: NaiveDate::from_ymd_opt(2022, 1, 3),
            contract_end_date: NaiveDate::from_ymd_opt(2025, 1, 2),
            is_admin: false,
        };
        let draft = EmployeeDraft::from_employee(&employee);
        assert_eq!(draft.hire_date, "2022-01-03");
        let payload = draft.validate(FormMode::Edit(5)).unwrap();
        assert_eq!(payload.contract_end_date, NaiveDate::from_ymd_opt(2025, 1, 2));
        assert_eq!(FormMode::Edit(5).title(), "编辑员工");
    }

    #[test]
    fn export_name_carries_date() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        assert_eq!(export_filename(day), "员工信息_2024-05-06.xlsx");
    }
}
