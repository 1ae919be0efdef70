use std::rc::Rc;

use futures::future::LocalBoxFuture;
use leptos::*;

use crate::{
    api::{ApiError, Employee, ExceptionRule, ShiftTemplate},
    state::{
        lifetime::{spawn_bound, use_lifetime, Lifetime},
        loading::{use_global_loading, GlobalLoading},
        notifications::{use_notifier, Notifier},
    },
};

pub const DELETE_DIALOG_MESSAGE: &str = "删除后将无法恢复";

pub type OpFuture<T> = LocalBoxFuture<'static, Result<T, ApiError>>;

/// The four backend operations a list screen needs.
pub struct CrudOps<T, D> {
    pub fetch: Rc<dyn Fn() -> OpFuture<Vec<T>>>,
    pub add: Rc<dyn Fn(D) -> OpFuture<()>>,
    pub edit: Rc<dyn Fn(i64, D) -> OpFuture<()>>,
    pub delete: Rc<dyn Fn(i64) -> OpFuture<()>>,
}

impl<T, D> Clone for CrudOps<T, D> {
    fn clone(&self) -> Self {
        Self {
            fetch: Rc::clone(&self.fetch),
            add: Rc::clone(&self.add),
            edit: Rc::clone(&self.edit),
            delete: Rc::clone(&self.delete),
        }
    }
}

/// Named text fields a list can be searched by.
pub trait Searchable {
    fn field(&self, name: &str) -> Option<String>;
}

/// Case-insensitive substring match over `fields`; an empty query keeps all.
pub fn filter_items<T: Searchable + Clone>(items: &[T], query: &str, fields: &[&str]) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            fields.iter().any(|field| {
                item.field(field)
                    .map(|value| value.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

pub struct CrudController<T: 'static, D: 'static> {
    label: &'static str,
    search_fields: &'static [&'static str],
    data: RwSignal<Vec<T>>,
    query: RwSignal<String>,
    loading: RwSignal<bool>,
    pending_delete: RwSignal<Option<i64>>,
    ops: StoredValue<CrudOps<T, D>>,
    notifier: StoredValue<Rc<dyn Notifier>>,
    lifetime: StoredValue<Lifetime>,
    global: GlobalLoading,
}

impl<T, D> Clone for CrudController<T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D> Copy for CrudController<T, D> {}

impl<T, D> CrudController<T, D>
where
    T: Searchable + Clone + 'static,
    D: 'static,
{
    pub fn new(
        ops: CrudOps<T, D>,
        label: &'static str,
        search_fields: &'static [&'static str],
        notifier: Rc<dyn Notifier>,
        global: GlobalLoading,
        lifetime: Lifetime,
    ) -> Self {
        Self {
            label,
            search_fields,
            data: create_rw_signal(Vec::new()),
            query: create_rw_signal(String::new()),
            loading: create_rw_signal(false),
            pending_delete: create_rw_signal(None),
            ops: store_value(ops),
            notifier: store_value(notifier),
            lifetime: store_value(lifetime),
            global,
        }
    }

    pub fn data(&self) -> Signal<Vec<T>> {
        self.data.into()
    }

    /// The source list narrowed by the current search query.
    pub fn filtered(&self) -> Signal<Vec<T>> {
        let data = self.data;
        let query = self.query;
        let fields = self.search_fields;
        Signal::derive(move || {
            let query = query.get();
            data.with(|items| filter_items(items, &query, fields))
        })
    }

    pub fn loading(&self) -> Signal<bool> {
        self.loading.into()
    }

    pub fn query(&self) -> Signal<String> {
        self.query.into()
    }

    pub fn search(&self, query: &str) {
        self.query.set(query.to_string());
    }

    pub fn pending_delete(&self) -> Signal<Option<i64>> {
        self.pending_delete.into()
    }

    pub fn delete_dialog_title(&self) -> String {
        format!("确定删除该{}吗？", self.label)
    }

    /// Replaces the list with a fresh copy from the backend.
    pub async fn fetch(&self) -> bool {
        self.loading.set(true);
        let request = self.ops.with_value(|ops| (ops.fetch)());
        let bound = self.lifetime.with_value(|lifetime| lifetime.bind(request));
        let fetched = match bound.await {
            None => false,
            Some(Ok(items)) => {
                self.data.set(items);
                true
            }
            Some(Err(error)) => {
                self.report_failure(&format!("获取{}失败", self.label), &error);
                false
            }
        };
        self.loading.set(false);
        fetched
    }

    pub async fn add(&self, draft: D) -> bool {
        let request = self.ops.with_value(|ops| (ops.add)(draft));
        self.mutate("添加", request).await
    }

    pub async fn edit(&self, id: i64, draft: D) -> bool {
        let request = self.ops.with_value(|ops| (ops.edit)(id, draft));
        self.mutate("更新", request).await
    }

    /// Marks `id` for deletion; nothing is sent until confirmed.
    pub fn request_delete(&self, id: i64) {
        self.pending_delete.set(Some(id));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub async fn confirm_delete(&self) -> bool {
        let Some(id) = self.pending_delete.get_untracked() else {
            return false;
        };
        self.pending_delete.set(None);
        let request = self.ops.with_value(|ops| (ops.delete)(id));
        self.mutate("删除", request).await
    }

    async fn mutate(&self, verb: &str, request: OpFuture<()>) -> bool {
        self.global.show(format!("正在{}{}...", verb, self.label));
        let bound = self.lifetime.with_value(|lifetime| lifetime.bind(request));
        let succeeded = match bound.await {
            None => false,
            Some(Ok(())) => {
                self.notifier
                    .with_value(|notifier| notifier.success(&format!("{}{}成功", verb, self.label)));
                self.fetch().await;
                true
            }
            Some(Err(error)) => {
                self.report_failure(&format!("{}{}失败", verb, self.label), &error);
                false
            }
        };
        self.global.hide();
        succeeded
    }

    fn report_failure(&self, summary: &str, error: &ApiError) {
        log::warn!("{}: {}", summary, error);
        if error.reported_by_client() {
            return;
        }
        let message = if error.error.trim().is_empty() {
            summary.to_string()
        } else {
            format!("{}：{}", summary, error.error)
        };
        self.notifier.with_value(|notifier| notifier.error(&message));
    }
}

/// Controller bound to the current view; loads the list once mounted.
pub fn use_crud<T, D>(
    ops: CrudOps<T, D>,
    label: &'static str,
    search_fields: &'static [&'static str],
) -> CrudController<T, D>
where
    T: Searchable + Clone + 'static,
    D: 'static,
{
    let lifetime = use_lifetime();
    let controller = CrudController::new(
        ops,
        label,
        search_fields,
        use_notifier(),
        use_global_loading(),
        lifetime.clone(),
    );
    create_effect(move |_| {
        spawn_bound(&lifetime, async move {
            controller.fetch().await;
        });
    });
    controller
}

impl Searchable for Employee {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "employee_no" => Some(self.employee_no.clone()),
            "position" => self.position.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            _ => None,
        }
    }
}

impl Searchable for ExceptionRule {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "rule_name" => Some(self.rule_name.clone()),
            "rule_type" => Some(
                self.kind()
                    .map(|kind| kind.label().to_string())
                    .unwrap_or_else(|| self.rule_type.clone()),
            ),
            "description" => self.description.clone(),
            _ => None,
        }
    }
}

impl Searchable for ShiftTemplate {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "description" => self.description.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        code: &'static str,
    }

    impl Searchable for Row {
        fn field(&self, name: &str) -> Option<String> {
            match name {
                "name" => Some(self.name.to_string()),
                "code" => Some(self.code.to_string()),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Alice Wang", code: "E001" },
            Row { name: "李雷", code: "E002" },
            Row { name: "Bob", code: "X-ALI" },
        ]
    }

    #[test]
    fn empty_query_returns_source_list() {
        assert_eq!(filter_items(&rows(), "", &["name"]), rows());
        assert_eq!(filter_items(&rows(), "   ", &["name"]), rows());
    }

    #[test]
    fn matches_any_named_field_ignoring_case() {
        let hits = filter_items(&rows(), "ali", &["name", "code"]);
        assert_eq!(hits.len(), 2);
        let by_name_only = filter_items(&rows(), "ali", &["name"]);
        assert_eq!(by_name_only, vec![rows()[0].clone()]);
        assert_eq!(filter_items(&rows(), "李", &["name"]).len(), 1);
        assert!(filter_items(&rows(), "ali", &["missing"]).is_empty());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::{ApiClient, EmployeePayload},
        state::notifications::{NoticeLevel, RecordingNotifier},
        test_support::helpers::memory_client,
    };
    use futures::FutureExt;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    #[derive(Clone, Default)]
    struct Calls {
        fetch: Rc<Cell<u32>>,
        add: Rc<Cell<u32>>,
        edit: Rc<Cell<u32>>,
        delete: Rc<Cell<u32>>,
        loading_seen_by_fetch: Rc<RefCell<Vec<bool>>>,
    }

    fn fake_ops(
        calls: &Calls,
        items: Vec<Employee>,
        fail_with: Option<ApiError>,
        loading: Rc<RefCell<Option<RwSignal<bool>>>>,
    ) -> CrudOps<Employee, String> {
        let fetch_calls = calls.clone();
        let add_calls = calls.clone();
        let edit_calls = calls.clone();
        let delete_calls = calls.clone();
        let add_error = fail_with.clone();
        let edit_error = fail_with;
        CrudOps {
            fetch: Rc::new(move || {
                fetch_calls.fetch.set(fetch_calls.fetch.get() + 1);
                if let Some(signal) = *loading.borrow() {
                    fetch_calls
                        .loading_seen_by_fetch
                        .borrow_mut()
                        .push(signal.get_untracked());
                }
                let items = items.clone();
                async move { Ok(items) }.boxed_local()
            }),
            add: Rc::new(move |_draft| {
                add_calls.add.set(add_calls.add.get() + 1);
                let outcome = add_error.clone();
                async move { outcome.map_or(Ok(()), Err) }.boxed_local()
            }),
            edit: Rc::new(move |_id, _draft| {
                edit_calls.edit.set(edit_calls.edit.get() + 1);
                let outcome = edit_error.clone();
                async move { outcome.map_or(Ok(()), Err) }.boxed_local()
            }),
            delete: Rc::new(move |_id| {
                delete_calls.delete.set(delete_calls.delete.get() + 1);
                async move { Ok(()) }.boxed_local()
            }),
        }
    }

    fn employee(id: i64, name: &str, no: &str) -> Employee {
        Employee {
            employee_id: id,
            employee_no: no.into(),
            name: name.into(),
            gender: None,
            email: None,
            phone: None,
            position: None,
            hire_date: None,
            contract_end_date: None,
            is_admin: false,
        }
    }

    fn controller(
        ops: CrudOps<Employee, String>,
        notifier: &RecordingNotifier,
    ) -> CrudController<Employee, String> {
        CrudController::new(
            ops,
            "员工",
            &["name", "employee_no"],
            Rc::new(notifier.clone()),
            GlobalLoading::new(),
            Lifetime::new(),
        )
    }

    #[tokio::test]
    async fn fetch_after_teardown_settles_loading() {
        let runtime = create_runtime();
        let calls = Calls::default();
        let notifier = RecordingNotifier::new();
        let lifetime = Lifetime::new();
        let crud = CrudController::new(
            fake_ops(&calls, vec![employee(1, "王五", "E001")], None, Rc::default()),
            "员工",
            &["name"],
            Rc::new(notifier.clone()),
            GlobalLoading::new(),
            lifetime.clone(),
        );
        lifetime.end();

        assert!(!crud.fetch().await);
        assert!(!crud.loading().get_untracked());
        assert!(crud.data().get_untracked().is_empty());
        assert!(notifier.is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn successful_mutations_refetch_exactly_once() {
        let runtime = create_runtime();
        let calls = Calls::default();
        let loading_slot = Rc::new(RefCell::new(None));
        let notifier = RecordingNotifier::new();
        let crud = controller(
            fake_ops(&calls, vec![employee(1, "王五", "E001")], None, loading_slot.clone()),
            &notifier,
        );
        *loading_slot.borrow_mut() = Some(crud.loading);

        assert!(crud.add("draft".into()).await);
        assert_eq!(calls.add.get(), 1);
        assert_eq!(calls.fetch.get(), 1);
        assert!(!crud.loading().get_untracked());

        assert!(crud.edit(1, "draft".into()).await);
        assert_eq!(calls.fetch.get(), 2);

        crud.request_delete(1);
        assert!(crud.confirm_delete().await);
        assert_eq!(calls.fetch.get(), 3);
        assert_eq!(*calls.loading_seen_by_fetch.borrow(), vec![true, true, true]);
        assert_eq!(
            notifier.messages(NoticeLevel::Success),
            vec!["添加员工成功", "更新员工成功", "删除员工成功"]
        );
        assert_eq!(crud.data().get_untracked().len(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_mutation_notifies_and_keeps_state() {
        let runtime = create_runtime();
        let calls = Calls::default();
        let notifier = RecordingNotifier::new();
        let crud = controller(
            fake_ops(
                &calls,
                vec![employee(1, "王五", "E001")],
                Some(ApiError::unknown("boom")),
                Rc::new(RefCell::new(None)),
            ),
            &notifier,
        );
        crud.fetch().await;
        assert_eq!(calls.fetch.get(), 1);

        assert!(!crud.add("draft".into()).await);
        assert_eq!(calls.fetch.get(), 1);
        assert_eq!(crud.data().get_untracked().len(), 1);
        assert_eq!(
            notifier.messages(NoticeLevel::Error),
            vec!["添加员工失败：boom"]
        );
        assert!(!crud.loading().get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn client_reported_failures_are_not_repeated() {
        let runtime = create_runtime();
        let calls = Calls::default();
        let notifier = RecordingNotifier::new();
        let crud = controller(
            fake_ops(
                &calls,
                Vec::new(),
                Some(ApiError::from_status(500, b"")),
                Rc::new(RefCell::new(None)),
            ),
            &notifier,
        );
        assert!(!crud.edit(3, "draft".into()).await);
        assert!(notifier.is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let runtime = create_runtime();
        let calls = Calls::default();
        let notifier = RecordingNotifier::new();
        let crud = controller(
            fake_ops(&calls, Vec::new(), None, Rc::new(RefCell::new(None))),
            &notifier,
        );
        assert!(!crud.confirm_delete().await);
        assert_eq!(calls.delete.get(), 0);

        crud.request_delete(4);
        assert_eq!(crud.pending_delete().get_untracked(), Some(4));
        assert_eq!(calls.delete.get(), 0);
        crud.cancel_delete();
        assert!(!crud.confirm_delete().await);
        assert_eq!(calls.delete.get(), 0);

        crud.request_delete(4);
        assert!(crud.confirm_delete().await);
        assert_eq!(calls.delete.get(), 1);
        assert_eq!(crud.pending_delete().get_untracked(), None);
        assert_eq!(crud.delete_dialog_title(), "确定删除该员工吗？");
        runtime.dispose();
    }

    #[tokio::test]
    async fn search_filters_without_touching_source() {
        let runtime = create_runtime();
        let calls = Calls::default();
        let notifier = RecordingNotifier::new();
        let crud = controller(
            fake_ops(
                &calls,
                vec![employee(1, "王五", "E001"), employee(2, "Zhao Liu", "E002")],
                None,
                Rc::new(RefCell::new(None)),
            ),
            &notifier,
        );
        crud.fetch().await;
        crud.search("zhao");
        assert_eq!(crud.filtered().get_untracked().len(), 1);
        assert_eq!(crud.data().get_untracked().len(), 2);
        crud.search("e00");
        assert_eq!(crud.filtered().get_untracked().len(), 2);
        crud.search("");
        assert_eq!(crud.filtered().get_untracked(), crud.data().get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn late_response_after_teardown_is_discarded() {
        let runtime = create_runtime();
        let calls = Calls::default();
        let notifier = RecordingNotifier::new();
        let lifetime = Lifetime::new();
        let crud = CrudController::new(
            fake_ops(
                &calls,
                vec![employee(1, "王五", "E001")],
                None,
                Rc::new(RefCell::new(None)),
            ),
            "员工",
            &["name"],
            Rc::new(notifier.clone()),
            GlobalLoading::new(),
            lifetime.clone(),
        );
        lifetime.end();
        assert!(!crud.fetch().await);
        assert!(crud.data().get_untracked().is_empty());
        runtime.dispose();
    }

    fn employees_client_ops(client: ApiClient) -> CrudOps<Employee, EmployeePayload> {
        let fetch_client = client.clone();
        let add_client = client.clone();
        let edit_client = client.clone();
        CrudOps {
            fetch: Rc::new(move || {
                let client = fetch_client.clone();
                async move { client.list_employees().await }.boxed_local()
            }),
            add: Rc::new(move |draft| {
                let client = add_client.clone();
                async move { client.create_employee(&draft).await.map(|_| ()) }.boxed_local()
            }),
            edit: Rc::new(move |id, draft| {
                let client = edit_client.clone();
                async move { client.update_employee(id, &draft).await.map(|_| ()) }.boxed_local()
            }),
            delete: Rc::new(move |id| {
                let client = client.clone();
                async move { client.delete_employee(id).await }.boxed_local()
            }),
        }
    }

    #[tokio::test]
    async fn every_list_shape_loads_the_same_rows() {
        let rows = json!([
            { "employee_id": 1, "employee_no": "E001", "name": "王五" },
            { "employee_id": 2, "employee_no": "E002", "name": "赵六" }
        ]);
        let shapes = [
            rows.clone(),
            json!({ "data": rows.clone() }),
            json!({ "list": rows.clone() }),
        ];
        let mut loaded = Vec::new();
        for shape in shapes {
            let server = MockServer::start_async().await;
            server.mock(|when, then| {
                when.method(GET).path("/api/employees");
                then.status(200).json_body(shape.clone());
            });
            let runtime = create_runtime();
            let notifier = RecordingNotifier::new();
            let (client, _, _) = memory_client(&server.url("/api"));
            let crud = CrudController::new(
                employees_client_ops(client),
                "员工",
                &["name"],
                Rc::new(notifier.clone()),
                GlobalLoading::new(),
                Lifetime::new(),
            );
            assert!(crud.fetch().await);
            loaded.push(crud.data().get_untracked());
            runtime.dispose();
        }
        assert_eq!(loaded[0], loaded[1]);
        assert_eq!(loaded[1], loaded[2]);
        assert_eq!(loaded[0].len(), 2);
    }
}
