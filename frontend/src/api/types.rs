use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<StoredUser>,
}

/// User blob persisted under the `userInfo` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(default, alias = "employee_id")]
    pub id: Option<i64>,
    #[serde(default, alias = "name")]
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl StoredUser {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            id: Some(employee.employee_id),
            username: employee.name.clone(),
            role: Some(if employee.is_admin { "admin" } else { "employee" }.to_string()),
            is_admin: employee.is_admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(alias = "id")]
    pub employee_id: i64,
    #[serde(default)]
    pub employee_no: String,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub contract_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub employee_no: String,
    pub name: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub hire_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    Normal,
    Late,
    EarlyLeave,
    Absent,
    Exception,
}

impl AttendanceStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "正常" | "normal" => Self::Normal,
            "迟到" | "late" => Self::Late,
            "早退" | "early_leave" | "early-leave" => Self::EarlyLeave,
            "缺勤" | "absent" => Self::Absent,
            _ => Self::Exception,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "正常",
            Self::Late => "迟到",
            Self::EarlyLeave => "早退",
            Self::Absent => "缺勤",
            Self::Exception => "异常",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    #[default]
    Unprocessed,
    Processing,
    Processed,
}

impl ProcessStatus {
    pub const ALL: [ProcessStatus; 3] = [Self::Unprocessed, Self::Processing, Self::Processed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unprocessed => "unprocessed",
            Self::Processing => "processing",
            Self::Processed => "processed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unprocessed => "未处理",
            Self::Processing => "处理中",
            Self::Processed => "已处理",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

fn process_status_or_default<'de, D>(deserializer: D) -> Result<ProcessStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(ProcessStatus::parse)
        .unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(alias = "id")]
    pub record_id: i64,
    pub employee_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
    pub date: String,
    #[serde(default, rename = "checkIn")]
    pub check_in: Option<String>,
    #[serde(default, rename = "checkOut")]
    pub check_out: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "process_status_or_default")]
    pub process_status: ProcessStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default, rename = "workHours")]
    pub work_hours: Option<String>,
}

impl AttendanceRecord {
    pub fn attendance_status(&self) -> AttendanceStatus {
        AttendanceStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceQuery {
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendancePayload {
    pub employee_id: i64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_in_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub synced_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictInfo {
    pub conflicting_schedule_id: Option<i64>,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(alias = "schedule_id")]
    pub id: i64,
    pub employee_id: i64,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub shift_type_id: i64,
    #[serde(default)]
    pub shift_type_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_schedule_status")]
    pub status: i32,
    #[serde(default, skip_serializing)]
    pub conflict: Option<ConflictInfo>,
}

fn default_schedule_status() -> i32 {
    1
}

impl ScheduleEntry {
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePayload {
    pub employee_id: i64,
    pub shift_type_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyScheduleRequest {
    pub source_year: i32,
    pub source_month: u32,
    pub target_year: i32,
    pub target_month: u32,
    pub employee_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictQuery {
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftType {
    #[serde(alias = "shift_type_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shift_type_id: Option<i64>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplatePayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_type_id: Option<i64>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyTemplateRequest {
    pub template_id: i64,
    pub employee_ids: Vec<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyTemplateResult {
    #[serde(default)]
    pub created_count: u32,
    #[serde(default)]
    pub conflicts_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionRuleType {
    Late,
    EarlyLeave,
    MissingPunch,
    Overdue,
}

impl ExceptionRuleType {
    pub const ALL: [ExceptionRuleType; 4] = [
        Self::Late,
        Self::EarlyLeave,
        Self::MissingPunch,
        Self::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Late => "late",
            Self::EarlyLeave => "early_leave",
            Self::MissingPunch => "missing_punch",
            Self::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Late => "迟到",
            Self::EarlyLeave => "早退",
            Self::MissingPunch => "缺卡",
            Self::Overdue => "超时",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == raw || kind.label() == raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionRule {
    #[serde(alias = "id")]
    pub rule_id: i64,
    pub rule_name: String,
    pub rule_type: String,
    #[serde(default)]
    pub threshold: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExceptionRule {
    pub fn kind(&self) -> Option<ExceptionRuleType> {
        ExceptionRuleType::parse(&self.rule_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionRulePayload {
    pub rule_name: String,
    pub rule_type: ExceptionRuleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Monthly,
    Exception,
}

impl ReportType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "月度考勤报表",
            Self::Exception => "异常考勤报表",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(alias = "report_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, alias = "report_name")]
    pub name: String,
    #[serde(default, alias = "report_type")]
    pub kind: Option<String>,
    #[serde(default, alias = "generated_at")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateReportRequest {
    pub report_type: ReportType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportDetail {
    #[serde(default, deserialize_with = "string_or_number")]
    pub report_id: String,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: ReportDetailData,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportDetailData {
    #[serde(default)]
    pub summary: Option<Value>,
    #[serde(default)]
    pub records_count: Option<u64>,
    #[serde(default)]
    pub date_range: Option<Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_employees: u32,
    #[serde(default)]
    pub present_today: u32,
    #[serde(default)]
    pub attendance_rate: f64,
    #[serde(default)]
    pub abnormal_attendance: u32,
    #[serde(default)]
    pub pending_requests: u32,
    #[serde(default)]
    pub late_early_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionStat {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    pub record_id: i64,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub employee_no: Option<String>,
    #[serde(default)]
    pub exception_type: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "process_status_or_default")]
    pub status: ProcessStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<i64>,
    /// Some servers send both `id` and `employee_id`; either identifies the user.
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub employee_no: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl Profile {
    pub fn user_id(&self) -> Option<i64> {
        self.id.or(self.employee_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Raw bytes of a response the caller saves to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// File picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}
