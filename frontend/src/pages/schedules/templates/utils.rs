use leptos::*;

use crate::{
    api::{ApiError, ShiftTemplate, ShiftTemplatePayload},
    utils::time::{format_time, parse_time_input},
};

pub const SEARCH_FIELDS: &[&str] = &["name", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Add => "新建模板",
            Self::Edit(_) => "编辑模板",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: String,
    pub description: String,
    pub shift_type_id: String,
    pub start_time: String,
    pub end_time: String,
}

impl TemplateDraft {
    pub fn from_template(template: &ShiftTemplate) -> Self {
        Self {
            name: template.name.clone(),
            description: template.description.clone().unwrap_or_default(),
            shift_type_id: template
                .shift_type_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            start_time: format_time(template.start_time),
            end_time: format_time(template.end_time),
        }
    }

    /// An end time before the start time is an overnight shift, not an error.
    pub fn validate(&self) -> Result<ShiftTemplatePayload, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("请输入模板名称"));
        }
        let start_time =
            parse_time_input(&self.start_time).ok_or_else(|| ApiError::validation("请选择开始时间"))?;
        let end_time =
            parse_time_input(&self.end_time).ok_or_else(|| ApiError::validation("请选择结束时间"))?;
        let shift_type_id = match self.shift_type_id.trim() {
            "" => None,
            raw => Some(
                raw.parse::<i64>()
                    .map_err(|_| ApiError::validation("请选择班次类型"))?,
            ),
        };
        let description = Some(self.description.trim().to_string()).filter(|text| !text.is_empty());
        Ok(ShiftTemplatePayload {
            name: name.to_string(),
            description,
            shift_type_id,
            start_time,
            end_time,
        })
    }
}

#[derive(Clone, Copy)]
pub struct TemplateForm {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub shift_type_id: RwSignal<String>,
    pub start_time: RwSignal<String>,
    pub end_time: RwSignal<String>,
}

impl Default for TemplateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateForm {
    pub fn new() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            shift_type_id: create_rw_signal(String::new()),
            start_time: create_rw_signal(String::new()),
            end_time: create_rw_signal(String::new()),
        }
    }

    pub fn load(&self, draft: TemplateDraft) {
        self.name.set(draft.name);
        self.description.set(draft.description);
        self.shift_type_id.set(draft.shift_type_id);
        self.start_time.set(draft.start_time);
        self.end_time.set(draft.end_time);
    }

    pub fn reset(&self) {
        self.load(TemplateDraft::default());
    }

    pub fn draft(&self) -> TemplateDraft {
        TemplateDraft {
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
            shift_type_id: self.shift_type_id.get_untracked(),
            start_time: self.start_time.get_untracked(),
            end_time: self.end_time.get_untracked(),
        }
    }
}
