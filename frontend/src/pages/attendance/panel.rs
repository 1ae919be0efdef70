use leptos::*;

use super::{
    components::{filters::AttendanceFilters, form_modal::AttendanceFormModal, table::AttendanceTable},
    view_model::use_attendance_view_model,
};
use crate::{
    api::ProcessStatus,
    components::{
        common::{Button, ButtonVariant},
        forms::FileButton,
        record_detail::RecordDetailModal,
    },
};

#[component]
pub fn AttendancePanel() -> impl IntoView {
    let vm = use_attendance_view_model();

    let on_import = Callback::new(move |file: web_sys::File| {
        spawn_local(async move {
            vm.import_file(file).await;
        });
    });
    let export = move |_| {
        spawn_local(async move {
            vm.export().await;
        });
    };
    let sync = move |_| {
        spawn_local(async move {
            vm.sync().await;
        });
    };
    let on_status = Callback::new(move |status: ProcessStatus| {
        spawn_local(async move {
            vm.change_status(status).await;
        });
    });

    view! {
        <div class="space-y-6">
            <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div class="flex flex-wrap items-center justify-between gap-3">
                    <h2 class="text-2xl font-bold text-fg">"考勤记录"</h2>
                    <div class="flex flex-wrap gap-2">
                        <Button on:click=move |_| vm.open_add()>"手动补录"</Button>
                        <FileButton
                            label="导入考勤"
                            accept=".xlsx,.xls"
                            on_file=on_import
                            disabled=vm.importing
                        />
                        <Button variant=ButtonVariant::Secondary loading=vm.exporting on:click=export>
                            "导出考勤"
                        </Button>
                        <Button variant=ButtonVariant::Secondary loading=vm.syncing on:click=sync>
                            "同步外部考勤"
                        </Button>
                    </div>
                </div>
                <AttendanceFilters vm=vm />
                <AttendanceTable
                    records=vm.records
                    loading=vm.loading
                    on_detail=Callback::new(move |record| vm.open_detail(record))
                    on_edit=Callback::new(move |record| vm.open_edit(&record))
                />
            </section>
            <RecordDetailModal
                is_open=Signal::derive(move || vm.detail.with(Option::is_some))
                record=vm.detail
                loading=Signal::derive(|| false)
                saving=vm.status_saving
                on_close=Callback::new(move |_| vm.close_detail())
                on_status=on_status
            />
            <AttendanceFormModal vm=vm />
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
    fn panel_renders_actions_and_filters() {
        let html = render_as(Role::Admin, || view! { <AttendancePanel /> });
        for text in ["考勤记录", "手动补录", "导入考勤", "导出考勤", "同步外部考勤", "查询", "暂无考勤记录"] {
            assert!(html.contains(text), "missing {}", text);
        }
    }
}
