use std::collections::BTreeSet;

use leptos::*;

use super::calendar::shift_label;
use crate::{
    api::{
        ApiError, ApplyTemplateRequest, ApplyTemplateResult, ScheduleEntry, SchedulePayload,
        ShiftTemplate, ShiftType,
    },
    utils::time::{format_date, parse_date_input},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTab {
    Single,
    Batch,
    Template,
}

impl ScheduleTab {
    pub const ALL: [ScheduleTab; 3] = [Self::Single, Self::Batch, Self::Template];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "单个排班",
            Self::Batch => "批量排班",
            Self::Template => "模板应用",
        }
    }
}

pub const STATUS_OPTIONS: [(i32, &str); 2] = [(1, "已安排"), (0, "待确认")];

/// Server shift types when loaded, otherwise the three built-in shifts.
pub fn shift_type_options(types: &[ShiftType]) -> Vec<(String, String)> {
    if types.is_empty() {
        return (1..=3)
            .map(|id| (id.to_string(), shift_label(id).to_string()))
            .collect();
    }
    types
        .iter()
        .map(|shift| (shift.id.to_string(), shift.name.clone()))
        .collect()
}

pub fn template_options(templates: &[ShiftTemplate]) -> Vec<(String, String)> {
    templates
        .iter()
        .map(|template| (template.id.to_string(), template.name.clone()))
        .collect()
}

/// True only when every listed employee is selected.
pub fn all_selected(selected: &BTreeSet<i64>, employee_ids: &[i64]) -> bool {
    !employee_ids.is_empty() && employee_ids.iter().all(|id| selected.contains(id))
}

fn required_id(raw: &str, message: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::validation(message))
}

fn date_range(start: &str, end: &str) -> Result<(chrono::NaiveDate, chrono::NaiveDate), ApiError> {
    let start = parse_date_input(start).ok_or_else(|| ApiError::validation("请选择开始时间"))?;
    let end = parse_date_input(end).ok_or_else(|| ApiError::validation("请选择结束时间"))?;
    if end < start {
        return Err(ApiError::validation("结束时间不能早于开始时间"));
    }
    Ok((start, end))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub employee_id: String,
    pub shift_type_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub template_id: String,
    pub employee_ids: Vec<i64>,
}

impl ScheduleDraft {
    pub fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            employee_id: entry.employee_id.to_string(),
            shift_type_id: entry.shift_type_id.to_string(),
            start_date: format_date(entry.start_date),
            end_date: format_date(entry.end_date),
            status: entry.status.to_string(),
            ..Self::default()
        }
    }

    fn status(&self) -> i32 {
        self.status.trim().parse().unwrap_or(1)
    }

    /// Single and edit forms.
    pub fn single(&self) -> Result<SchedulePayload, ApiError> {
        let employee_id = required_id(&self.employee_id, "请选择员工")?;
        let shift_type_id = required_id(&self.shift_type_id, "请选择班次类型")?;
        let (start_date, end_date) = date_range(&self.start_date, &self.end_date)?;
        Ok(SchedulePayload {
            employee_id,
            shift_type_id,
            start_date,
            end_date,
            status: self.status(),
        })
    }

    /// One payload per selected employee.
    pub fn batch(&self) -> Result<Vec<SchedulePayload>, ApiError> {
        if self.employee_ids.is_empty() {
            return Err(ApiError::validation("请选择员工"));
        }
        let shift_type_id = required_id(&self.shift_type_id, "请选择班次类型")?;
        let (start_date, end_date) = date_range(&self.start_date, &self.end_date)?;
        Ok(self
            .employee_ids
            .iter()
            .map(|&employee_id| SchedulePayload {
                employee_id,
                shift_type_id,
                start_date,
                end_date,
                status: 1,
            })
            .collect())
    }

    pub fn template(&self) -> Result<ApplyTemplateRequest, ApiError> {
        let template_id = required_id(&self.template_id, "请选择排班模板")?;
        if self.employee_ids.is_empty() {
            return Err(ApiError::validation("请选择员工"));
        }
        let (Some(start_date), Some(end_date)) = (
            parse_date_input(&self.start_date),
            parse_date_input(&self.end_date),
        ) else {
            return Err(ApiError::validation("请选择日期范围"));
        };
        if end_date < start_date {
            return Err(ApiError::validation("结束时间不能早于开始时间"));
        }
        Ok(ApplyTemplateRequest {
            template_id,
            employee_ids: self.employee_ids.clone(),
            start_date,
            end_date,
        })
    }
}

pub fn batch_message(created: usize) -> String {
    format!("批量排班成功，共创建 {} 个排班", created)
}

/// `Ok` for a clean apply, `Err` (a warning) when conflicts were skipped.
pub fn template_message(result: &ApplyTemplateResult) -> Result<String, String> {
    if result.conflicts_count > 0 {
        Err(format!(
            "模板应用完成，共创建 {} 个排班，检测到 {} 个冲突",
            result.created_count, result.conflicts_count
        ))
    } else {
        Ok(format!("模板应用成功，共创建 {} 个排班", result.created_count))
    }
}

#[derive(Clone, Copy)]
pub struct ScheduleForm {
    pub employee_id: RwSignal<String>,
    pub shift_type_id: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
    pub status: RwSignal<String>,
    pub template_id: RwSignal<String>,
    pub selected: RwSignal<BTreeSet<i64>>,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleForm {
    pub fn new() -> Self {
        Self {
            employee_id: create_rw_signal(String::new()),
            shift_type_id: create_rw_signal(String::new()),
            start_date: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            status: create_rw_signal("1".to_string()),
            template_id: create_rw_signal(String::new()),
            selected: create_rw_signal(BTreeSet::new()),
        }
    }

    pub fn load(&self, draft: ScheduleDraft) {
        self.employee_id.set(draft.employee_id);
        self.shift_type_id.set(draft.shift_type_id);
        self.start_date.set(draft.start_date);
        self.end_date.set(draft.end_date);
        self.status.set(if draft.status.is_empty() {
            "1".to_string()
        } else {
            draft.status
        });
        self.template_id.set(draft.template_id);
        self.selected.set(draft.employee_ids.into_iter().collect());
    }

    pub fn reset(&self) {
        self.load(ScheduleDraft::default());
    }

    pub fn draft(&self) -> ScheduleDraft {
        ScheduleDraft {
            employee_id: self.employee_id.get_untracked(),
            shift_type_id: self.shift_type_id.get_untracked(),
            start_date: self.start_date.get_untracked(),
            end_date: self.end_date.get_untracked(),
            status: self.status.get_untracked(),
            template_id: self.template_id.get_untracked(),
            employee_ids: self.selected.with_untracked(|ids| ids.iter().copied().collect()),
        }
    }

    pub fn toggle(&self, employee_id: i64) {
        self.selected.update(|ids| {
            if !ids.remove(&employee_id) {
                ids.insert(employee_id);
            }
        });
    }

    pub fn select_all(&self, employee_ids: &[i64], checked: bool) {
        self.selected.update(|ids| {
            if checked {
                ids.extend(employee_ids.iter().copied());
            } else {
                ids.clear();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filled() -> ScheduleDraft {
        ScheduleDraft {
            employee_id: "3".into(),
            shift_type_id: "2".into(),
            start_date: "2024-05-06".into(),
            end_date: "2024-05-07".into(),
            status: String::new(),
            template_id: "9".into(),
            employee_ids: vec![3, 4],
        }
    }

    #[test]
    fn single_requires_each_field_in_order() {
        let mut draft = ScheduleDraft::default();
        assert_eq!(draft.single().unwrap_err().error, "请选择员工");
        draft.employee_id = "3".into();
        assert_eq!(draft.single().unwrap_err().error, "请选择班次类型");
        draft.shift_type_id = "1".into();
        assert_eq!(draft.single().unwrap_err().error, "请选择开始时间");
        draft.start_date = "2024-05-06".into();
        assert_eq!(draft.single().unwrap_err().error, "请选择结束时间");
        draft.end_date = "2024-05-01".into();
        assert_eq!(draft.single().unwrap_err().error, "结束时间不能早于开始时间");
        draft.end_date = "2024-05-06".into();
        let payload = draft.single().unwrap();
        assert_eq!(payload.status, 1);
        assert_eq!(payload.start_date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
    }

    #[test]
    fn batch_fans_out_per_employee() {
        let payloads = filled().batch().unwrap();
        assert_eq!(payloads.iter().map(|p| p.employee_id).collect::<Vec<_>>(), vec![3, 4]);
        let mut empty = filled();
        empty.employee_ids.clear();
        assert_eq!(empty.batch().unwrap_err().error, "请选择员工");
    }

    #[test]
    fn template_needs_template_and_range() {
        let request = filled().template().unwrap();
        assert_eq!(request.template_id, 9);
        let mut draft = filled();
        draft.template_id.clear();
        assert_eq!(draft.template().unwrap_err().error, "请选择排班模板");
        let mut draft = filled();
        draft.end_date.clear();
        assert_eq!(draft.template().unwrap_err().error, "请选择日期范围");
    }

    #[test]
    fn template_message_warns_on_conflicts() {
        let clean = ApplyTemplateResult { created_count: 4, conflicts_count: 0 };
        assert_eq!(template_message(&clean), Ok("模板应用成功，共创建 4 个排班".to_string()));
        let clashing = ApplyTemplateResult { created_count: 2, conflicts_count: 1 };
        assert!(template_message(&clashing).unwrap_err().contains("检测到 1 个冲突"));
    }

    #[test]
    fn select_all_needs_every_employee() {
        let selected: BTreeSet<i64> = [1, 2].into_iter().collect();
        assert!(all_selected(&selected, &[1, 2]));
        assert!(!all_selected(&selected, &[1, 2, 3]));
        assert!(!all_selected(&selected, &[]));
    }

    #[test]
    fn shift_options_fall_back_to_builtins() {
        assert_eq!(
            shift_type_options(&[]),
            vec![
                ("1".to_string(), "早班".to_string()),
                ("2".to_string(), "中班".to_string()),
                ("3".to_string(), "晚班".to_string()),
            ]
        );
    }
}
