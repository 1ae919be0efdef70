use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::{
    api::{ApiError, DateRange, GenerateReportRequest, Report, ReportDetail, ReportType},
    utils::time::parse_date_input,
};

pub const GENERATE_SUCCESS: &str = "报表生成成功（包含月度考勤报表和异常考勤统计）";

/// Generation needs both ends of the range.
pub fn required_range(start: &str, end: &str) -> Result<DateRange, ApiError> {
    match (parse_date_input(start), parse_date_input(end)) {
        (Some(start_date), Some(end_date)) if start_date > end_date => {
            Err(ApiError::validation("开始日期不能晚于结束日期"))
        }
        (Some(start_date), Some(end_date)) => Ok(DateRange {
            start_date,
            end_date,
        }),
        _ => Err(ApiError::validation("请选择时间范围")),
    }
}

/// Detailed export falls back to the whole current year when no range is picked.
pub fn export_range(start: &str, end: &str, today: NaiveDate) -> Result<DateRange, ApiError> {
    if start.trim().is_empty() && end.trim().is_empty() {
        let year = today.year();
        if let (Some(start_date), Some(end_date)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) {
            return Ok(DateRange {
                start_date,
                end_date,
            });
        }
    }
    required_range(start, end)
}

/// Monthly first, then exceptions, over the same range.
pub fn generate_requests(range: &DateRange) -> [GenerateReportRequest; 2] {
    [ReportType::Monthly, ReportType::Exception].map(|report_type| GenerateReportRequest {
        report_type,
        start_date: range.start_date,
        end_date: range.end_date,
    })
}

pub fn kind_label(kind: Option<&str>) -> &'static str {
    match kind {
        Some("monthly") => ReportType::Monthly.label(),
        _ => "异常考勤统计",
    }
}

pub fn status_label(status: Option<&str>) -> String {
    match status {
        Some("completed") => "已完成".to_string(),
        Some(other) if !other.is_empty() => other.to_string(),
        _ => "-".to_string(),
    }
}

fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// `(label, value)` rows for the detail modal.
pub fn detail_rows(report: &Report, detail: &ReportDetail) -> Vec<(&'static str, String)> {
    let id = if detail.report_id.is_empty() {
        report.id.clone()
    } else {
        detail.report_id.clone()
    };
    vec![
        ("报表名称", report.name.clone()),
        ("报表类型", kind_label(report.kind.as_deref()).to_string()),
        ("报表ID", id),
        (
            "生成时间",
            detail
                .generated_at
                .as_deref()
                .map(crate::utils::time::format_timestamp)
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("状态", status_label(detail.status.as_deref())),
        (
            "记录数量",
            format!("{} 条", detail.data.records_count.unwrap_or(0)),
        ),
        (
            "日期范围",
            value_text(detail.data.date_range.as_ref()).unwrap_or_else(|| "未指定".to_string()),
        ),
        (
            "摘要",
            value_text(detail.data.summary.as_ref()).unwrap_or_else(|| "无摘要".to_string()),
        ),
    ]
}

pub fn download_filename(report: &Report) -> String {
    format!("report_{}.xlsx", report.id)
}

pub fn export_filename(range: &DateRange) -> String {
    format!(
        "attendance_report_{}_{}.xlsx",
        range.start_date, range.end_date
    )
}
