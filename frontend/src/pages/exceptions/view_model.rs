use leptos::*;

use super::{
    repository,
    utils::{FormMode, RuleDraft, RuleForm, SEARCH_FIELDS},
};
use crate::{
    api::{ApiClient, ApiError, ExceptionRule, ExceptionRulePayload},
    state::crud::{use_crud, CrudController},
};

#[derive(Clone, Copy)]
pub struct ExceptionsViewModel {
    pub crud: CrudController<ExceptionRule, ExceptionRulePayload>,
    pub form: RuleForm,
    pub mode: RwSignal<Option<FormMode>>,
    pub form_error: RwSignal<Option<ApiError>>,
    pub saving: RwSignal<bool>,
}

impl ExceptionsViewModel {
    pub fn new(crud: CrudController<ExceptionRule, ExceptionRulePayload>) -> Self {
        Self {
            crud,
            form: RuleForm::new(),
            mode: create_rw_signal(None),
            form_error: create_rw_signal(None),
            saving: create_rw_signal(false),
        }
    }

    pub fn open_add(&self) {
        self.form.reset();
        self.form_error.set(None);
        self.mode.set(Some(FormMode::Add));
    }

    pub fn open_edit(&self, rule: &ExceptionRule) {
        self.form.load(RuleDraft::from_rule(rule));
        self.form_error.set(None);
        self.mode.set(Some(FormMode::Edit(rule.rule_id)));
    }

    pub fn close_form(&self) {
        self.mode.set(None);
        self.form_error.set(None);
    }

    pub async fn submit(&self) -> bool {
        let Some(mode) = self.mode.get_untracked() else {
            return false;
        };
        let payload = match self.form.draft().validate() {
            Ok(payload) => payload,
            Err(error) => {
                self.form_error.set(Some(error));
                return false;
            }
        };
        self.form_error.set(None);
        self.saving.set(true);
        let saved = match mode {
            FormMode::Add => self.crud.add(payload).await,
            FormMode::Edit(id) => self.crud.edit(id, payload).await,
        };
        self.saving.set(false);
        if saved {
            self.mode.set(None);
        }
        saved
    }
}

pub fn use_exceptions_view_model() -> ExceptionsViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    ExceptionsViewModel::new(use_crud(repository::crud_ops(api), "规则", SEARCH_FIELDS))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::{
        lifetime::Lifetime,
        loading::GlobalLoading,
        notifications::{NoticeLevel, RecordingNotifier},
    };
    use crate::test_support::helpers::memory_client;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::rc::Rc;

    fn view_model(server: &MockServer) -> (ExceptionsViewModel, RecordingNotifier) {
        let (client, _store, notifier) = memory_client(&server.url("/api"));
        let crud = CrudController::new(
            repository::crud_ops(client),
            "规则",
            SEARCH_FIELDS,
            Rc::new(notifier.clone()),
            GlobalLoading::new(),
            Lifetime::new(),
        );
        (ExceptionsViewModel::new(crud), notifier)
    }

    #[tokio::test]
    async fn add_sends_wire_type_and_refetches() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api/exception-rules")
                .json_body_includes(r#"{"rule_name":"迟到提醒","rule_type":"late","threshold":10}"#);
            then.status(201).json_body(json!({
                "rule_id": 1, "rule_name": "迟到提醒", "rule_type": "late"
            }));
        });
        let list = server.mock(|when, then| {
            when.method(GET).path("/api/exception-rules");
            then.status(200).json_body(json!({ "data": [
                { "rule_id": 1, "rule_name": "迟到提醒", "rule_type": "late", "threshold": 10 }
            ]}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.open_add();
        vm.form.rule_name.set("迟到提醒".into());
        vm.form.rule_type.set("late".into());
        vm.form.threshold.set("10".into());
        vm.form.description.set("发送提醒".into());
        assert!(vm.submit().await);
        assert_eq!(create.calls(), 1);
        assert_eq!(list.calls(), 1);
        assert!(!vm.crud.loading().get_untracked());
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["添加规则成功"]);
        runtime.dispose();
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let server = MockServer::start_async().await;
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/api/exception-rules/4");
            then.status(204);
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/exception-rules");
            then.status(200).json_body(json!([]));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.crud.request_delete(4);
        assert_eq!(delete.calls(), 0);
        assert!(vm.crud.confirm_delete().await);
        assert_eq!(delete.calls(), 1);
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["删除规则成功"]);
        runtime.dispose();
    }

    #[tokio::test]
    async fn edit_failure_keeps_modal_open() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(PUT).path("/api/exception-rules/2");
            then.status(400).json_body(json!({ "error": "规则名称重复" }));
        });
        let runtime = create_runtime();
        let (vm, _notifier) = view_model(&server);
        vm.open_edit(&ExceptionRule {
            rule_id: 2,
            rule_name: "早退".into(),
            rule_type: "early_leave".into(),
            threshold: Some(5),
            description: Some("记录".into()),
        });
        assert!(!vm.submit().await);
        assert_eq!(vm.mode.get_untracked(), Some(FormMode::Edit(2)));
        runtime.dispose();
    }
}
