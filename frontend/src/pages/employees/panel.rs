use leptos::*;

use super::{
    components::{form_modal::EmployeeFormModal, table::EmployeeTable, toolbar::EmployeeToolbar},
    view_model::use_employees_view_model,
};
use crate::{components::confirm_dialog::ConfirmDialog, state::crud::DELETE_DIALOG_MESSAGE};

#[component]
pub fn EmployeesPanel() -> impl IntoView {
    let vm = use_employees_view_model();
    let crud = vm.crud;

    let on_search = Callback::new(move |query: String| crud.search(&query));
    let on_import = Callback::new(move |file: web_sys::File| {
        spawn_local(async move {
            vm.import_file(file).await;
        });
    });
    let on_export = Callback::new(move |_| {
        spawn_local(async move {
            vm.export().await;
        });
    });
    let on_confirm_delete = Callback::new(move |_| {
        spawn_local(async move {
            crud.confirm_delete().await;
        });
    });

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold text-fg">"人员管理"</h2>
            <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <EmployeeToolbar
                    query=crud.query()
                    on_search=on_search
                    on_import=on_import
                    on_export=on_export
                    on_add=Callback::new(move |_| vm.open_add())
                    importing=vm.importing
                    exporting=vm.exporting
                />
                <EmployeeTable
                    employees=crud.filtered()
                    loading=crud.loading()
                    on_edit=Callback::new(move |employee| vm.open_edit(&employee))
                    on_delete=Callback::new(move |id| crud.request_delete(id))
                />
            </section>
            <EmployeeFormModal vm=vm />
            <ConfirmDialog
                is_open=Signal::derive(move || crud.pending_delete().get().is_some())
                title=crud.delete_dialog_title()
                message=DELETE_DIALOG_MESSAGE
                on_confirm=on_confirm_delete
                on_cancel=Callback::new(move |_| crud.cancel_delete())
                destructive=true
            />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        state::permissions::Role,
        test_support::ssr::render_as,
    };

    #[test]
    fn panel_renders_toolbar_for_admin() {
        let html = render_as(Role::Admin, || view! { <EmployeesPanel /> });
        assert!(html.contains("人员管理"));
        assert!(html.contains("搜索员工姓名或工号"));
        assert!(html.contains("导入Excel"));
        assert!(html.contains("新增员工"));
        assert!(html.contains("暂无员工数据"));
    }

    #[test]
    fn manager_cannot_import() {
        let html = render_as(Role::Manager, || view! { <EmployeesPanel /> });
        assert!(!html.contains("导入Excel"));
        assert!(html.contains("导出Excel"));
    }
}
