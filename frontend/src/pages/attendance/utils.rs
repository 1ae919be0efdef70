use chrono::{NaiveDate, NaiveDateTime};
use leptos::*;

use crate::{
    api::{ApiError, AttendancePayload, AttendanceQuery, AttendanceRecord, Employee, SyncResult},
    utils::time::{format_date, parse_date_input, parse_time_input},
};

pub const STATUS_OPTIONS: [&str; 5] = ["正常", "迟到", "早退", "缺勤", "异常"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Add => "手动补录考勤",
            Self::Edit(_) => "修正考勤记录",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Add => "添加记录",
            Self::Edit(_) => "保存修改",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Add => "考勤记录添加成功",
            Self::Edit(_) => "考勤记录修改成功",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Add => "添加失败",
            Self::Edit(_) => "修改失败",
        }
    }
}

/// Date range applies only when both ends are picked.
pub fn build_query(start: &str, end: &str, name: &str) -> Result<AttendanceQuery, ApiError> {
    let (start_date, end_date) = match (parse_date_input(start), parse_date_input(end)) {
        (Some(start), Some(end)) if start > end => {
            return Err(ApiError::validation("开始日期不能晚于结束日期"));
        }
        (Some(start), Some(end)) => (Some(start), Some(end)),
        _ => (None, None),
    };
    let name = Some(name.trim().to_string()).filter(|name| !name.is_empty());
    Ok(AttendanceQuery {
        start_date,
        end_date,
        name,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceDraft {
    pub employee_id: String,
    pub date: String,
    pub clock_in: String,
    pub clock_out: String,
    pub status: String,
    pub remarks: String,
}

impl AttendanceDraft {
    pub fn from_record(record: &AttendanceRecord) -> Self {
        let status = record.attendance_status().label().to_string();
        Self {
            employee_id: record.employee_id.to_string(),
            date: record.date.clone(),
            clock_in: record.check_in.clone().unwrap_or_default(),
            clock_out: record.check_out.clone().unwrap_or_default(),
            status,
            remarks: record.remarks.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<AttendancePayload, ApiError> {
        let employee_id = self
            .employee_id
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::validation("请选择员工"))?;
        let date = parse_date_input(&self.date).ok_or_else(|| ApiError::validation("请选择日期"))?;
        let clock_in_time = clock_at(date, &self.clock_in, "上班时间格式不正确")?;
        let clock_out_time = clock_at(date, &self.clock_out, "下班时间格式不正确")?;
        if let (Some(start), Some(end)) = (clock_in_time, clock_out_time) {
            if end < start {
                return Err(ApiError::validation("下班时间不能早于上班时间"));
            }
        }
        let status = self.status.trim();
        if status.is_empty() {
            return Err(ApiError::validation("请选择考勤状态"));
        }
        let remarks = Some(self.remarks.trim().to_string()).filter(|text| !text.is_empty());
        Ok(AttendancePayload {
            employee_id,
            date,
            clock_in_time,
            clock_out_time,
            status: Some(status.to_string()),
            remarks,
        })
    }
}

/// Blank input means "not clocked".
fn clock_at(date: NaiveDate, raw: &str, message: &str) -> Result<Option<NaiveDateTime>, ApiError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_time_input(raw)
        .map(|time| Some(date.and_time(time)))
        .ok_or_else(|| ApiError::validation(message))
}

/// `(value, label)` pairs for the employee picker.
pub fn employee_options(employees: &[Employee]) -> Vec<(String, String)> {
    employees
        .iter()
        .map(|employee| {
            let label = if employee.employee_no.is_empty() {
                employee.name.clone()
            } else {
                format!("{} ({})", employee.name, employee.employee_no)
            };
            (employee.employee_id.to_string(), label)
        })
        .collect()
}

pub fn sync_message(result: &SyncResult) -> String {
    match (&result.message, result.synced_count) {
        (Some(message), _) if !message.trim().is_empty() => message.clone(),
        (_, Some(count)) => format!("同步完成，共同步 {} 条记录", count),
        _ => "同步完成".to_string(),
    }
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("考勤记录_{}.xlsx", format_date(today))
}

#[derive(Clone, Copy)]
pub struct AttendanceForm {
    pub employee_id: RwSignal<String>,
    pub date: RwSignal<String>,
    pub clock_in: RwSignal<String>,
    pub clock_out: RwSignal<String>,
    pub status: RwSignal<String>,
    pub remarks: RwSignal<String>,
}

impl Default for AttendanceForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceForm {
    pub fn new() -> Self {
        Self {
            employee_id: create_rw_signal(String::new()),
            date: create_rw_signal(String::new()),
            clock_in: create_rw_signal(String::new()),
            clock_out: create_rw_signal(String::new()),
            status: create_rw_signal(String::new()),
            remarks: create_rw_signal(String::new()),
        }
    }

    pub fn load(&self, draft: AttendanceDraft) {
        self.employee_id.set(draft.employee_id);
        self.date.set(draft.date);
        self.clock_in.set(draft.clock_in);
        self.clock_out.set(draft.clock_out);
        self.status.set(draft.status);
        self.remarks.set(draft.remarks);
    }

    pub fn draft(&self) -> AttendanceDraft {
        AttendanceDraft {
            employee_id: self.employee_id.get_untracked(),
            date: self.date.get_untracked(),
            clock_in: self.clock_in.get_untracked(),
            clock_out: self.clock_out.get_untracked(),
            status: self.status.get_untracked(),
            remarks: self.remarks.get_untracked(),
        }
    }
}
