use serde::Deserialize;
use thiserror::Error;

use crate::{api::SchedulePayload, utils::time::parse_date_input};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("文件为空")]
    Empty,
    #[error("缺少表头列: {0}")]
    MissingColumn(&'static str),
    #[error("第 {line} 行格式错误: {reason}")]
    Malformed { line: u64, reason: String },
    #[error("第 {line} 行{field}无效")]
    InvalidField { line: u64, field: &'static str },
    #[error("第 {line} 行结束日期早于开始日期")]
    InvertedRange { line: u64 },
}

const REQUIRED_COLUMNS: [&str; 4] = ["employee_id", "shift_type_id", "start_date", "end_date"];

#[derive(Debug, Deserialize)]
struct RawRow {
    employee_id: String,
    shift_type_id: String,
    start_date: String,
    end_date: String,
    #[serde(default)]
    status: Option<String>,
}

/// Rows that parsed cleanly, plus one error per rejected row.
#[derive(Debug, Default, PartialEq)]
pub struct ImportPlan {
    pub rows: Vec<SchedulePayload>,
    pub rejected: Vec<ImportError>,
}

/// Parses a headed CSV. A bad header fails the whole file; a bad row only
/// rejects that row.
pub fn parse_schedule_csv(bytes: &[u8]) -> Result<ImportPlan, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|err| ImportError::Malformed {
            line: 1,
            reason: err.to_string(),
        })?
        .clone();
    if headers.iter().all(|header| header.is_empty()) {
        return Err(ImportError::Empty);
    }
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(ImportError::MissingColumn(column));
        }
    }

    let mut plan = ImportPlan::default();
    for (index, record) in reader.records().enumerate() {
        let line = index as u64 + 2;
        let parsed = record
            .and_then(|record| record.deserialize::<RawRow>(Some(&headers)))
            .map_err(|err| ImportError::Malformed {
                line,
                reason: err.to_string(),
            })
            .and_then(|raw| validate_row(line, raw));
        match parsed {
            Ok(row) => plan.rows.push(row),
            Err(error) => {
                log::warn!("skipping schedule row: {}", error);
                plan.rejected.push(error);
            }
        }
    }
    Ok(plan)
}

fn validate_row(line: u64, raw: RawRow) -> Result<SchedulePayload, ImportError> {
    let employee_id = raw
        .employee_id
        .parse::<i64>()
        .map_err(|_| ImportError::InvalidField { line, field: "员工ID" })?;
    let shift_type_id = raw
        .shift_type_id
        .parse::<i64>()
        .map_err(|_| ImportError::InvalidField { line, field: "班次类型" })?;
    let start_date = parse_date_input(&raw.start_date)
        .ok_or(ImportError::InvalidField { line, field: "开始日期" })?;
    let end_date = parse_date_input(&raw.end_date)
        .ok_or(ImportError::InvalidField { line, field: "结束日期" })?;
    if end_date < start_date {
        return Err(ImportError::InvertedRange { line });
    }
    let status = match raw.status.as_deref().map(str::trim) {
        None | Some("") => 1,
        Some(value) => value
            .parse::<i32>()
            .map_err(|_| ImportError::InvalidField { line, field: "状态" })?,
    };
    Ok(SchedulePayload {
        employee_id,
        shift_type_id,
        start_date,
        end_date,
        status,
    })
}

pub fn success_message(count: usize) -> String {
    format!("成功导入 {} 条排班", count)
}

pub fn failure_message(count: usize) -> String {
    format!("{} 条导入失败", count)
}
