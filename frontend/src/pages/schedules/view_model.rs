use std::{future::Future, rc::Rc};

use chrono::NaiveDate;
use leptos::*;

use super::{
    calendar::{copy_request, entries_for},
    import::{failure_message, parse_schedule_csv, success_message},
    repository,
    utils::{batch_message, template_message, ScheduleDraft, ScheduleForm, ScheduleTab},
};
use crate::{
    api::{ApiClient, ApiError, Employee, ScheduleEntry, ScheduleMap, ShiftTemplate, ShiftType, UploadFile},
    state::{
        lifetime::{spawn_bound, use_lifetime, Lifetime},
        loading::{use_global_loading, GlobalLoading},
        notifications::{use_notifier, Notifier},
    },
    utils::{
        time::{format_date, shift_month, today, year_month},
        upload::{check_extension, read_upload, CSV_EXTENSIONS},
    },
};

pub const CONFLICT_MESSAGE: &str = "检测到排班冲突，请检查时间安排";

#[derive(Clone, Copy)]
pub struct SchedulesViewModel {
    api: StoredValue<ApiClient>,
    notifier: StoredValue<Rc<dyn Notifier>>,
    lifetime: StoredValue<Lifetime>,
    global: GlobalLoading,
    pub year: RwSignal<i32>,
    pub month: RwSignal<u32>,
    pub schedules: RwSignal<ScheduleMap>,
    pub loading: RwSignal<bool>,
    pub employees: RwSignal<Vec<Employee>>,
    pub shift_types: RwSignal<Vec<ShiftType>>,
    pub templates: RwSignal<Vec<ShiftTemplate>>,
    /// Entry picked for copying; the next day click targets it.
    pub pending_copy: RwSignal<Option<ScheduleEntry>>,
    pub detail_day: RwSignal<Option<NaiveDate>>,
    pub create_open: RwSignal<bool>,
    pub tab: RwSignal<ScheduleTab>,
    pub form: ScheduleForm,
    pub form_error: RwSignal<Option<ApiError>>,
    pub editing: RwSignal<Option<ScheduleEntry>>,
    pub edit_form: ScheduleForm,
    pub edit_error: RwSignal<Option<ApiError>>,
    pub pending_delete: RwSignal<Option<ScheduleEntry>>,
    pub saving: RwSignal<bool>,
    pub importing: RwSignal<bool>,
}

impl SchedulesViewModel {
    pub fn new(
        api: ApiClient,
        notifier: Rc<dyn Notifier>,
        global: GlobalLoading,
        lifetime: Lifetime,
    ) -> Self {
        let (year, month) = year_month(today());
        Self {
            api: store_value(api),
            notifier: store_value(notifier),
            lifetime: store_value(lifetime),
            global,
            year: create_rw_signal(year),
            month: create_rw_signal(month),
            schedules: create_rw_signal(ScheduleMap::new()),
            loading: create_rw_signal(false),
            employees: create_rw_signal(Vec::new()),
            shift_types: create_rw_signal(Vec::new()),
            templates: create_rw_signal(Vec::new()),
            pending_copy: create_rw_signal(None),
            detail_day: create_rw_signal(None),
            create_open: create_rw_signal(false),
            tab: create_rw_signal(ScheduleTab::Single),
            form: ScheduleForm::new(),
            form_error: create_rw_signal(None),
            editing: create_rw_signal(None),
            edit_form: ScheduleForm::new(),
            edit_error: create_rw_signal(None),
            pending_delete: create_rw_signal(None),
            saving: create_rw_signal(false),
            importing: create_rw_signal(false),
        }
    }

    async fn bound<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Option<Result<T, ApiError>> {
        self.lifetime.with_value(|lifetime| lifetime.bind(request)).await
    }

    fn notify(&self, f: impl FnOnce(&dyn Notifier)) {
        self.notifier.with_value(|notifier| f(notifier.as_ref()));
    }

    fn report(&self, summary: &str, error: &ApiError) {
        log::warn!("{}: {}", summary, error);
        if !error.reported_by_client() {
            self.notify(|n| n.error(summary));
        }
    }

    pub async fn load(&self) -> bool {
        self.loading.set(true);
        let api = self.api.get_value();
        let (year, month) = (self.year.get_untracked(), self.month.get_untracked());
        let outcome = self
            .bound(async move { repository::fetch_month(&api, year, month).await })
            .await;
        let loaded = match outcome {
            None => return false,
            Some(Ok(map)) => {
                self.schedules.set(map);
                true
            }
            Some(Err(error)) => {
                self.report("获取排班数据失败", &error);
                false
            }
        };
        self.loading.set(false);
        loaded
    }

    pub async fn change_month(&self, delta: i32) -> bool {
        let (year, month) = shift_month(self.year.get_untracked(), self.month.get_untracked(), delta);
        self.year.set(year);
        self.month.set(month);
        self.load().await
    }

    pub async fn go_today(&self) -> bool {
        let (year, month) = year_month(today());
        self.year.set(year);
        self.month.set(month);
        self.load().await
    }

    pub fn day_entries(&self, date: NaiveDate) -> Vec<ScheduleEntry> {
        self.schedules.with(|map| entries_for(map, date))
    }

    /// A day click either completes a pending copy or opens the day detail.
    pub async fn select_day(&self, date: NaiveDate) -> bool {
        if self.pending_copy.with_untracked(Option::is_some) {
            self.copy_to(date).await
        } else {
            self.detail_day.set(Some(date));
            true
        }
    }

    pub fn start_copy(&self, entry: ScheduleEntry) {
        self.pending_copy.set(Some(entry));
        self.notify(|n| n.info("已选择排班，点击目标日期进行复制"));
    }

    pub fn cancel_copy(&self) {
        self.pending_copy.set(None);
    }

    pub async fn copy_to(&self, target: NaiveDate) -> bool {
        let Some(source) = self.pending_copy.get_untracked() else {
            return false;
        };
        let request = copy_request(&source, target);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::copy(&api, &request).await })
            .await;
        match outcome {
            None => false,
            Some(Ok(_)) => {
                self.pending_copy.set(None);
                self.notify(|n| n.success("排班复制成功"));
                self.load().await;
                true
            }
            Some(Err(error)) => {
                self.report("排班复制失败", &error);
                false
            }
        }
    }

    pub async fn load_options(&self) -> bool {
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::fetch_options(&api).await })
            .await;
        match outcome {
            None => false,
            Some(Ok((employees, shift_types, templates))) => {
                self.employees.set(employees);
                self.shift_types.set(shift_types);
                self.templates.set(templates);
                true
            }
            Some(Err(error)) => {
                self.report("获取员工列表失败", &error);
                false
            }
        }
    }

    /// Opens the create modal, prefilled with `day` when one was clicked.
    pub fn open_create(&self, day: Option<NaiveDate>) {
        self.form.reset();
        if let Some(day) = day {
            self.form.start_date.set(format_date(day));
            self.form.end_date.set(format_date(day));
        }
        self.form_error.set(None);
        self.tab.set(ScheduleTab::Single);
        self.create_open.set(true);
    }

    pub fn close_create(&self) {
        self.create_open.set(false);
        self.form_error.set(None);
    }

    pub async fn submit(&self) -> bool {
        let draft = self.form.draft();
        match self.tab.get_untracked() {
            ScheduleTab::Single => self.submit_single(draft).await,
            ScheduleTab::Batch => self.submit_batch(draft).await,
            ScheduleTab::Template => self.submit_template(draft).await,
        }
    }

    fn reject(&self, error: ApiError) -> bool {
        self.form_error.set(Some(error));
        false
    }

    async fn finish_create(&self) {
        self.form.reset();
        self.create_open.set(false);
        self.load().await;
    }

    /// Checks for overlaps first; a conflict aborts before anything is created.
    async fn submit_single(&self, draft: ScheduleDraft) -> bool {
        let payload = match draft.single() {
            Ok(payload) => payload,
            Err(error) => return self.reject(error),
        };
        self.form_error.set(None);
        self.saving.set(true);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::save_unless_conflict(&api, None, &payload).await })
            .await;
        self.saving.set(false);
        match outcome {
            None => false,
            Some(Ok(Err(conflict))) => {
                self.notify(|n| n.warning(CONFLICT_MESSAGE));
                self.reject(ApiError::validation(conflict.detail))
            }
            Some(Ok(Ok(_))) => {
                self.notify(|n| n.success("排班新增成功"));
                self.finish_create().await;
                true
            }
            Some(Err(error)) => {
                self.report("排班新增失败", &error);
                false
            }
        }
    }

    async fn submit_batch(&self, draft: ScheduleDraft) -> bool {
        let payloads = match draft.batch() {
            Ok(payloads) => payloads,
            Err(error) => return self.reject(error),
        };
        self.form_error.set(None);
        self.saving.set(true);
        self.global.show("正在批量创建排班...");
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::create_batch(&api, &payloads).await })
            .await;
        self.global.hide();
        self.saving.set(false);
        match outcome {
            None => false,
            Some(Ok(created)) => {
                self.notify(|n| n.success(&batch_message(created.len())));
                self.finish_create().await;
                true
            }
            Some(Err(error)) => {
                self.report("批量排班失败", &error);
                false
            }
        }
    }

    async fn submit_template(&self, draft: ScheduleDraft) -> bool {
        let request = match draft.template() {
            Ok(request) => request,
            Err(error) => return self.reject(error),
        };
        self.form_error.set(None);
        self.saving.set(true);
        self.global.show("正在应用排班模板...");
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::apply_template(&api, &request).await })
            .await;
        self.global.hide();
        self.saving.set(false);
        match outcome {
            None => false,
            Some(Ok(result)) => {
                match template_message(&result) {
                    Ok(message) => self.notify(|n| n.success(&message)),
                    Err(message) => self.notify(|n| n.warning(&message)),
                }
                self.finish_create().await;
                true
            }
            Some(Err(error)) => {
                self.report("模板应用失败", &error);
                false
            }
        }
    }

    pub fn open_edit(&self, entry: ScheduleEntry) {
        self.edit_form.load(ScheduleDraft::from_entry(&entry));
        self.edit_error.set(None);
        self.editing.set(Some(entry));
    }

    pub fn close_edit(&self) {
        self.editing.set(None);
        self.edit_error.set(None);
    }

    /// Same conflict rule as creation, ignoring the entry being edited.
    pub async fn submit_edit(&self) -> bool {
        let Some(entry) = self.editing.get_untracked() else {
            return false;
        };
        let payload = match self.edit_form.draft().single() {
            Ok(payload) => payload,
            Err(error) => {
                self.edit_error.set(Some(error));
                return false;
            }
        };
        self.edit_error.set(None);
        self.saving.set(true);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move {
                repository::save_unless_conflict(&api, Some(entry.id), &payload).await
            })
            .await;
        self.saving.set(false);
        match outcome {
            None => false,
            Some(Ok(Err(conflict))) => {
                self.notify(|n| n.warning(CONFLICT_MESSAGE));
                self.edit_error.set(Some(ApiError::validation(conflict.detail)));
                false
            }
            Some(Ok(Ok(_))) => {
                self.notify(|n| n.success("排班编辑成功"));
                self.editing.set(None);
                self.load().await;
                true
            }
            Some(Err(error)) => {
                self.report("排班编辑失败", &error);
                false
            }
        }
    }

    pub fn request_delete(&self, entry: ScheduleEntry) {
        self.pending_delete.set(Some(entry));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub async fn confirm_delete(&self) -> bool {
        let Some(entry) = self.pending_delete.get_untracked() else {
            return false;
        };
        self.pending_delete.set(None);
        let api = self.api.get_value();
        let outcome = self
            .bound(async move { repository::remove(&api, entry.id).await })
            .await;
        match outcome {
            None => false,
            Some(Ok(())) => {
                self.notify(|n| n.success("排班删除成功"));
                self.load().await;
                true
            }
            Some(Err(error)) => {
                self.report("排班删除失败", &error);
                false
            }
        }
    }

    pub async fn import_file(&self, file: web_sys::File) -> bool {
        if let Err(error) = check_extension(&file.name(), CSV_EXTENSIONS) {
            self.notify(|n| n.error(&error.to_string()));
            return false;
        }
        match read_upload(file).await {
            Ok(upload) => self.import_upload(upload).await,
            Err(error) => {
                self.notify(|n| n.error(&error.to_string()));
                false
            }
        }
    }

    /// Valid rows are created one by one and never rolled back; bad rows
    /// are counted as failures.
    pub async fn import_upload(&self, upload: UploadFile) -> bool {
        if let Err(error) = check_extension(&upload.name, CSV_EXTENSIONS) {
            self.notify(|n| n.error(&error.to_string()));
            return false;
        }
        let plan = match parse_schedule_csv(&upload.bytes) {
            Ok(plan) => plan,
            Err(error) => {
                self.notify(|n| n.error(&error.to_string()));
                return false;
            }
        };
        self.importing.set(true);
        let api = self.api.get_value();
        let rows = plan.rows;
        let outcome = self
            .lifetime
            .with_value(|lifetime| {
                lifetime.bind(async move { repository::import_rows(&api, &rows).await })
            })
            .await;
        self.importing.set(false);
        let Some((created, failed)) = outcome else {
            return false;
        };
        let failed = failed + plan.rejected.len();
        if created > 0 {
            self.notify(|n| n.success(&success_message(created)));
        }
        if failed > 0 {
            self.notify(|n| n.warning(&failure_message(failed)));
        }
        if created > 0 {
            self.load().await;
        }
        created > 0
    }
}

pub fn use_schedules_view_model() -> SchedulesViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let lifetime = use_lifetime();
    let vm = SchedulesViewModel::new(api, use_notifier(), use_global_loading(), lifetime.clone());
    create_effect(move |_| {
        spawn_bound(&lifetime, async move {
            vm.load().await;
            vm.load_options().await;
        });
    });
    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::pages::schedules::calendar::entry;
    use crate::state::notifications::{NoticeLevel, RecordingNotifier};
    use crate::test_support::helpers::memory_client;
    use httpmock::prelude::*;
    use serde_json::json;

    fn view_model(server: &MockServer) -> (SchedulesViewModel, RecordingNotifier) {
        let (client, _store, notifier) = memory_client(&server.url("/api"));
        let vm = SchedulesViewModel::new(
            client,
            Rc::new(notifier.clone()),
            GlobalLoading::new(),
            Lifetime::new(),
        );
        vm.year.set(2024);
        vm.month.set(5);
        (vm, notifier)
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn created_entry() -> serde_json::Value {
        json!({
            "id": 1, "employee_id": 1, "shift_type_id": 1,
            "start_date": "2024-05-06", "end_date": "2024-05-06"
        })
    }

    fn fill_single(form: &ScheduleForm) {
        form.employee_id.set("1".into());
        form.shift_type_id.set("1".into());
        form.start_date.set("2024-05-06".into());
        form.end_date.set("2024-05-06".into());
    }

    #[tokio::test]
    async fn loads_the_selected_month() {
        let server = MockServer::start_async().await;
        let month = server.mock(|when, then| {
            when.method(GET)
                .path("/api/schedules")
                .query_param("year", "2024")
                .query_param("month", "6");
            then.status(200).json_body(json!({ "data": {
                "2024-06-03": [{
                    "id": 5, "employee_id": 2, "shift_type_id": 2,
                    "start_date": "2024-06-03", "end_date": "2024-06-03"
                }]
            }}));
        });
        let runtime = create_runtime();
        let (vm, _notifier) = view_model(&server);
        assert!(vm.change_month(1).await);
        assert_eq!(month.calls(), 1);
        assert_eq!(vm.month.get_untracked(), 6);
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(vm.day_entries(day).len(), 1);
        assert!(!vm.loading.get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn conflict_aborts_single_create() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/schedules/conflicts");
            then.status(200).json_body(json!({
                "id": 9, "employee_id": 1, "shift_type_id": 2,
                "start_date": "2024-05-06", "end_date": "2024-05-06"
            }));
        });
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/schedules");
            then.status(201).json_body(created_entry());
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.open_create(None);
        fill_single(&vm.form);
        assert!(!vm.submit().await);
        assert_eq!(create.calls(), 0);
        assert_eq!(notifier.messages(NoticeLevel::Warning), vec![CONFLICT_MESSAGE]);
        assert!(vm.create_open.get_untracked());
        assert!(vm.form_error.get_untracked().is_some());
        runtime.dispose();
    }

    #[tokio::test]
    async fn single_create_without_conflict_posts_and_reloads() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/schedules/conflicts");
            then.status(200).json_body(json!(null));
        });
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api/schedules")
                .json_body_includes(r#"{"employee_id":1,"shift_type_id":1,"status":1}"#);
            then.status(201).json_body(created_entry());
        });
        let month = server.mock(|when, then| {
            when.method(GET).path("/api/schedules");
            then.status(200).json_body(json!([created_entry()]));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.open_create(Some(may(6)));
        assert_eq!(vm.form.start_date.get_untracked(), "2024-05-06");
        fill_single(&vm.form);
        assert!(vm.submit().await);
        assert_eq!(create.calls(), 1);
        assert_eq!(month.calls(), 1);
        assert!(!vm.create_open.get_untracked());
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["排班新增成功"]);
        runtime.dispose();
    }

    #[tokio::test]
    async fn batch_sends_one_payload_per_selected_employee() {
        let server = MockServer::start_async().await;
        let batch = server.mock(|when, then| {
            when.method(POST).path("/api/schedules/batch");
            then.status(201).json_body(json!([created_entry(), created_entry()]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/schedules");
            then.status(200).json_body(json!({}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.open_create(None);
        vm.tab.set(ScheduleTab::Batch);
        vm.form.select_all(&[1, 2], true);
        vm.form.shift_type_id.set("2".into());
        vm.form.start_date.set("2024-05-06".into());
        vm.form.end_date.set("2024-05-10".into());
        assert!(vm.submit().await);
        assert_eq!(batch.calls(), 1);
        assert_eq!(
            notifier.messages(NoticeLevel::Success),
            vec!["批量排班成功，共创建 2 个排班"]
        );
        runtime.dispose();
    }

    #[tokio::test]
    async fn template_apply_reports_conflicts_as_warning() {
        let server = MockServer::start_async().await;
        let apply = server.mock(|when, then| {
            when.method(POST)
                .path("/api/shift_templates/apply")
                .json_body_includes(r#"{"template_id":3,"employee_ids":[4]}"#);
            then.status(200)
                .json_body(json!({ "created_count": 5, "conflicts_count": 2 }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/schedules");
            then.status(200).json_body(json!({}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.open_create(None);
        vm.tab.set(ScheduleTab::Template);
        vm.form.template_id.set("3".into());
        vm.form.toggle(4);
        vm.form.start_date.set("2024-05-01".into());
        vm.form.end_date.set("2024-05-31".into());
        assert!(vm.submit().await);
        assert_eq!(apply.calls(), 1);
        let warnings = notifier.messages(NoticeLevel::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("创建 5 个排班"));
        assert!(warnings[0].contains("2 个冲突"));
        runtime.dispose();
    }

    #[tokio::test]
    async fn copy_targets_the_clicked_month_then_clears() {
        let server = MockServer::start_async().await;
        let copy = server.mock(|when, then| {
            when.method(POST).path("/api/schedules/copy").json_body(json!({
                "sourceYear": 2024, "sourceMonth": 5,
                "targetYear": 2024, "targetMonth": 6,
                "employeeIds": [7]
            }));
            then.status(200).json_body(json!({ "message": "ok" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/schedules");
            then.status(200).json_body(json!({}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.start_copy(entry(5, 7, 1, may(20)));
        assert_eq!(
            notifier.messages(NoticeLevel::Info),
            vec!["已选择排班，点击目标日期进行复制"]
        );
        assert!(vm.select_day(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()).await);
        assert_eq!(copy.calls(), 1);
        assert!(vm.pending_copy.get_untracked().is_none());
        assert!(vm.detail_day.get_untracked().is_none());
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["排班复制成功"]);

        assert!(vm.select_day(may(8)).await);
        assert_eq!(vm.detail_day.get_untracked(), Some(may(8)));
        assert_eq!(copy.calls(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn delete_waits_for_confirmation() {
        let server = MockServer::start_async().await;
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/api/schedules/5");
            then.status(204);
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/schedules");
            then.status(200).json_body(json!({}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.request_delete(entry(5, 1, 1, may(6)));
        vm.cancel_delete();
        assert!(!vm.confirm_delete().await);
        assert_eq!(delete.calls(), 0);
        vm.request_delete(entry(5, 1, 1, may(6)));
        assert!(vm.confirm_delete().await);
        assert_eq!(delete.calls(), 1);
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["排班删除成功"]);
        runtime.dispose();
    }

    #[tokio::test]
    async fn edit_checks_conflicts_excluding_itself() {
        let server = MockServer::start_async().await;
        let conflicts = server.mock(|when, then| {
            when.method(GET)
                .path("/api/schedules/conflicts")
                .query_param("schedule_id", "5");
            then.status(200).json_body(json!(null));
        });
        let update = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/schedules/5")
                .json_body_includes(r#"{"shift_type_id":3,"status":0}"#);
            then.status(200).json_body(created_entry());
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/schedules");
            then.status(200).json_body(json!({}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        vm.open_edit(entry(5, 1, 1, may(6)));
        assert_eq!(vm.edit_form.shift_type_id.get_untracked(), "1");
        vm.edit_form.shift_type_id.set("3".into());
        vm.edit_form.status.set("0".into());
        assert!(vm.submit_edit().await);
        assert_eq!(conflicts.calls(), 1);
        assert_eq!(update.calls(), 1);
        assert!(vm.editing.get_untracked().is_none());
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["排班编辑成功"]);
        runtime.dispose();
    }

    #[tokio::test]
    async fn csv_import_keeps_valid_rows_and_counts_bad_ones() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/schedules");
            then.status(201).json_body(created_entry());
        });
        let month = server.mock(|when, then| {
            when.method(GET).path("/api/schedules");
            then.status(200).json_body(json!({}));
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        let upload = UploadFile {
            name: "排班.csv".into(),
            mime: Some("text/csv".into()),
            bytes: b"employee_id,shift_type_id,start_date,end_date\n\
                     1,1,2024-05-06,2024-05-06\n\
                     2,1,2024-05-07,not-a-date\n\
                     3,2,2024-05-08,2024-05-08\n"
                .to_vec(),
        };
        assert!(vm.import_upload(upload).await);
        assert_eq!(create.calls(), 2);
        assert_eq!(month.calls(), 1);
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["成功导入 2 条排班"]);
        assert_eq!(notifier.messages(NoticeLevel::Warning), vec!["1 条导入失败"]);
        assert!(!vm.importing.get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn csv_import_rejects_other_extensions() {
        let server = MockServer::start_async().await;
        let create = server.mock(|when, then| {
            when.method(POST).path("/api/schedules");
            then.status(201).json_body(created_entry());
        });
        let runtime = create_runtime();
        let (vm, notifier) = view_model(&server);
        let upload = UploadFile {
            name: "排班.xlsx".into(),
            mime: None,
            bytes: Vec::new(),
        };
        assert!(!vm.import_upload(upload).await);
        assert_eq!(create.calls(), 0);
        assert_eq!(notifier.messages(NoticeLevel::Error), vec!["只支持 .csv 格式的文件"]);
        runtime.dispose();
    }
}
