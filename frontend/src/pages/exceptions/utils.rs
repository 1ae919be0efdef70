use leptos::*;

use crate::api::{ApiError, ExceptionRule, ExceptionRulePayload, ExceptionRuleType};

pub const SEARCH_FIELDS: &[&str] = &["rule_name", "rule_type", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Add => "新增规则",
            Self::Edit(_) => "编辑规则",
        }
    }
}

/// Tag classes per rule type; unknown types share the neutral tone.
pub fn rule_tone(kind: Option<ExceptionRuleType>) -> &'static str {
    match kind {
        Some(ExceptionRuleType::Late) => "bg-status-warning-bg text-status-warning-text",
        Some(ExceptionRuleType::EarlyLeave) => "bg-status-error-bg text-status-error-text",
        _ => "bg-status-info-bg text-status-info-text",
    }
}

pub fn rule_type_label(rule: &ExceptionRule) -> String {
    rule.kind()
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| rule.rule_type.clone())
}

/// Overdue rules count days; the rest count minutes.
pub fn threshold_label(kind: Option<ExceptionRuleType>) -> &'static str {
    match kind {
        Some(ExceptionRuleType::Overdue) => "时间阈值 (天)",
        _ => "时间阈值 (分钟)",
    }
}

pub fn type_options() -> Vec<(String, String)> {
    ExceptionRuleType::ALL
        .into_iter()
        .map(|kind| (kind.as_str().to_string(), kind.label().to_string()))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDraft {
    pub rule_name: String,
    pub rule_type: String,
    pub threshold: String,
    pub description: String,
}

impl RuleDraft {
    pub fn from_rule(rule: &ExceptionRule) -> Self {
        Self {
            rule_name: rule.rule_name.clone(),
            rule_type: rule
                .kind()
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_default(),
            threshold: rule.threshold.map(|t| t.to_string()).unwrap_or_default(),
            description: rule.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ExceptionRulePayload, ApiError> {
        let rule_name = self.rule_name.trim();
        if rule_name.is_empty() {
            return Err(ApiError::validation("请输入规则名称"));
        }
        let rule_type = ExceptionRuleType::parse(self.rule_type.trim())
            .ok_or_else(|| ApiError::validation("请选择规则类型"))?;
        let threshold = self.threshold.trim();
        if threshold.is_empty() {
            return Err(ApiError::validation("请输入时间阈值"));
        }
        let threshold = threshold
            .parse::<i64>()
            .ok()
            .filter(|value| *value >= 1)
            .ok_or_else(|| ApiError::validation("时间阈值必须为正整数"))?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ApiError::validation("请输入处理方式"));
        }
        Ok(ExceptionRulePayload {
            rule_name: rule_name.to_string(),
            rule_type,
            threshold: Some(threshold),
            description: Some(description.to_string()),
        })
    }
}

#[derive(Clone, Copy)]
pub struct RuleForm {
    pub rule_name: RwSignal<String>,
    pub rule_type: RwSignal<String>,
    pub threshold: RwSignal<String>,
    pub description: RwSignal<String>,
}

impl Default for RuleForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleForm {
    pub fn new() -> Self {
        Self {
            rule_name: create_rw_signal(String::new()),
            rule_type: create_rw_signal(String::new()),
            threshold: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
        }
    }

    pub fn load(&self, draft: RuleDraft) {
        self.rule_name.set(draft.rule_name);
        self.rule_type.set(draft.rule_type);
        self.threshold.set(draft.threshold);
        self.description.set(draft.description);
    }

    pub fn reset(&self) {
        self.load(RuleDraft::default());
    }

    pub fn draft(&self) -> RuleDraft {
        RuleDraft {
            rule_name: self.rule_name.get_untracked(),
            rule_type: self.rule_type.get_untracked(),
            threshold: self.threshold.get_untracked(),
            description: self.description.get_untracked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(rule_type: &str) -> ExceptionRule {
        ExceptionRule {
            rule_id: 1,
            rule_name: "上班迟到".into(),
            rule_type: rule_type.into(),
            threshold: Some(10),
            description: Some("发送提醒".into()),
        }
    }

    #[test]
    fn tones_follow_rule_type() {
        assert!(rule_tone(rule("late").kind()).contains("warning"));
        assert!(rule_tone(rule("早退").kind()).contains("error"));
        assert!(rule_tone(rule("缺卡").kind()).contains("info"));
        assert!(rule_tone(rule("自定义").kind()).contains("info"));
        assert_eq!(rule_type_label(&rule("自定义")), "自定义");
        assert_eq!(rule_type_label(&rule("early_leave")), "早退");
    }

    #[test]
    fn overdue_threshold_is_in_days() {
        assert_eq!(threshold_label(Some(ExceptionRuleType::Overdue)), "时间阈值 (天)");
        assert_eq!(threshold_label(None), "时间阈值 (分钟)");
    }

    #[test]
    fn validation_order_and_payload() {
        let mut draft = RuleDraft::default();
        assert_eq!(draft.validate().unwrap_err().error, "请输入规则名称");
        draft.rule_name = "迟到提醒".into();
        assert_eq!(draft.validate().unwrap_err().error, "请选择规则类型");
        draft.rule_type = "late".into();
        assert_eq!(draft.validate().unwrap_err().error, "请输入时间阈值");
        draft.threshold = "0".into();
        assert_eq!(draft.validate().unwrap_err().error, "时间阈值必须为正整数");
        draft.threshold = "15".into();
        assert_eq!(draft.validate().unwrap_err().error, "请输入处理方式");
        draft.description = "发送提醒".into();
        let payload = draft.validate().unwrap();
        assert_eq!(payload.rule_type, ExceptionRuleType::Late);
        assert_eq!(payload.threshold, Some(15));
    }

    #[test]
    fn draft_from_label_typed_rule_uses_wire_value() {
        let draft = RuleDraft::from_rule(&rule("迟到"));
        assert_eq!(draft.rule_type, "late");
        assert_eq!(draft.threshold, "10");
    }
}
