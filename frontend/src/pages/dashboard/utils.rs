use chrono::NaiveDate;

use crate::api::{ExceptionStat, ProcessStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub name: String,
    pub value: u32,
    pub percent: f64,
}

/// Share of each exception type; all zero when nothing was recorded.
pub fn distribution(stats: &[ExceptionStat]) -> Vec<DistributionRow> {
    let total: u32 = stats.iter().map(|stat| stat.value).sum();
    stats
        .iter()
        .map(|stat| DistributionRow {
            name: stat.name.clone(),
            value: stat.value,
            percent: if total == 0 {
                0.0
            } else {
                f64::from(stat.value) * 100.0 / f64::from(total)
            },
        })
        .collect()
}

pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}%", rounded)
    } else {
        format!("{:.1}%", rounded)
    }
}

pub fn exception_tone(kind: &str) -> &'static str {
    match kind.trim() {
        "迟到" | "早退" | "迟到早退" => {
            "bg-status-warning-bg text-status-warning-text border border-status-warning-border"
        }
        "缺卡" | "缺勤" | "位置异常" => {
            "bg-status-error-bg text-status-error-text border border-status-error-border"
        }
        _ => "bg-surface-muted text-fg-muted border border-border",
    }
}

pub fn process_tone(status: ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Unprocessed => {
            "bg-status-error-bg text-status-error-text border border-status-error-border"
        }
        ProcessStatus::Processing => {
            "bg-status-warning-bg text-status-warning-text border border-status-warning-border"
        }
        ProcessStatus::Processed => {
            "bg-status-success-bg text-status-success-text border border-status-success-border"
        }
    }
}

pub fn record_action_label(status: ProcessStatus) -> &'static str {
    if status == ProcessStatus::Unprocessed {
        "标记处理"
    } else {
        "查看详情"
    }
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("异常记录报表_{}.xlsx", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(name: &str, value: u32) -> ExceptionStat {
        ExceptionStat {
            name: name.into(),
            value,
        }
    }

    #[test]
    fn distribution_sums_to_one_hundred() {
        let rows = distribution(&[stat("迟到", 3), stat("缺卡", 1)]);
        assert_eq!(rows[0].percent, 75.0);
        assert_eq!(rows[1].percent, 25.0);
        assert_eq!(format_percent(rows[0].percent), "75%");
        assert_eq!(format_percent(33.333), "33.3%");
    }

    #[test]
    fn empty_distribution_has_no_division() {
        let rows = distribution(&[stat("迟到", 0)]);
        assert_eq!(rows[0].percent, 0.0);
        assert!(distribution(&[]).is_empty());
    }

    #[test]
    fn labels_follow_process_state() {
        assert_eq!(record_action_label(ProcessStatus::Unprocessed), "标记处理");
        assert_eq!(record_action_label(ProcessStatus::Processed), "查看详情");
        assert!(exception_tone("缺卡").contains("status-error"));
        assert_eq!(
            export_filename(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
            "异常记录报表_2024-05-01.xlsx"
        );
    }
}
