use leptos::*;

use super::{
    utils::detail_rows,
    view_model::{use_reports_view_model, ReportsViewModel},
};
use crate::{
    api::Report,
    components::{
        common::{Button, ButtonVariant},
        empty_state::EmptyState,
        forms::DatePicker,
        guard::PermissionGate,
        layout::LoadingSpinner,
        modal::Modal,
    },
    state::permissions::Permission,
    utils::time::format_timestamp,
};

#[component]
pub fn ReportsPanel() -> impl IntoView {
    let vm = use_reports_view_model();

    let on_view = Callback::new(move |report: Report| {
        spawn_local(async move {
            vm.view(report).await;
        });
    });
    let on_download = Callback::new(move |report: Report| {
        spawn_local(async move {
            vm.download(report).await;
        });
    });

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold text-fg">"报表统计"</h2>
            <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div class="flex flex-wrap items-end gap-3">
                    <DatePicker value=vm.start_date label="开始日期" />
                    <DatePicker value=vm.end_date label="结束日期" />
                    <PermissionGate require=Permission::ReportExport hide=true>
                        <Button
                            loading=vm.generating
                            on:click=move |_| {
                                spawn_local(async move {
                                    vm.generate().await;
                                });
                            }
                        >
                            "生成报表"
                        </Button>
                        <Button
                            variant=ButtonVariant::Secondary
                            loading=vm.exporting
                            on:click=move |_| {
                                spawn_local(async move {
                                    vm.export_detailed().await;
                                });
                            }
                        >
                            "导出详细报表"
                        </Button>
                    </PermissionGate>
                </div>
                <ReportTable
                    reports=vm.reports
                    loading=vm.loading
                    downloading=vm.downloading
                    on_view=on_view
                    on_download=on_download
                />
            </section>
            <ReportDetailModal vm=vm />
        </div>
    }
}

#[component]
fn ReportTable(
    #[prop(into)] reports: Signal<Vec<Report>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] downloading: Signal<Option<String>>,
    on_view: Callback<Report>,
    on_download: Callback<Report>,
) -> impl IntoView {
    view! {
        <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
            {move || {
                let rows = reports.get();
                if rows.is_empty() {
                    return view! { <EmptyState title="暂无报表" /> }.into_view();
                }
                view! {
                    <table class="min-w-full divide-y divide-border text-sm">
                        <thead>
                            <tr class="text-left text-fg-muted">
                                <th class="py-2 pr-4">"报表名称"</th>
                                <th class="py-2 pr-4">"生成日期"</th>
                                <th class="py-2">"操作"</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            {rows
                                .into_iter()
                                .map(|report| {
                                    let generated = report
                                        .created_at
                                        .as_deref()
                                        .map(format_timestamp)
                                        .unwrap_or_else(|| "-".into());
                                    let id = report.id.clone();
                                    let busy = Signal::derive(move || {
                                        downloading.with(|current| current.as_deref() == Some(id.as_str()))
                                    });
                                    let row = store_value(report.clone());
                                    view! {
                                        <tr>
                                            <td class="py-2 pr-4 text-fg">{report.name.clone()}</td>
                                            <td class="py-2 pr-4">{generated}</td>
                                            <td class="py-2 space-x-3 whitespace-nowrap">
                                                <PermissionGate require=Permission::ReportDownload hide=true>
                                                    <button
                                                        class="text-action-primary-bg hover:underline disabled:opacity-50"
                                                        disabled=move || busy.get()
                                                        on:click=move |_| on_download.call(row.get_value())
                                                    >
                                                        {move || if busy.get() { "下载中..." } else { "下载" }}
                                                    </button>
                                                </PermissionGate>
                                                <button
                                                    class="text-action-primary-bg hover:underline"
                                                    on:click=move |_| on_view.call(row.get_value())
                                                >
                                                    "查看"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_view()
            }}
        </Show>
    }
}

#[component]
fn ReportDetailModal(vm: ReportsViewModel) -> impl IntoView {
    view! {
        <Modal
            is_open=Signal::derive(move || vm.detail.with(Option::is_some))
            title="报表详情"
            on_close=Callback::new(move |_| vm.close_detail())
            wide=true
        >
            {move || {
                vm.detail.get().map(|(report, detail)| view! {
                    <dl class="grid grid-cols-2 gap-4 text-sm">
                        {detail_rows(&report, &detail)
                            .into_iter()
                            .map(|(label, value)| view! {
                                <div class=if label == "摘要" { "col-span-2" } else { "" }>
                                    <dt class="text-fg-muted">{label}</dt>
                                    <dd class="text-fg break-all">{value}</dd>
                                </div>
                            })
                            .collect_view()}
                    </dl>
                })
            }}
            <div class="flex justify-end">
                <button
                    type="button"
                    class=format!("rounded-md px-4 py-2 text-sm font-semibold {}", ButtonVariant::Secondary.classes())
                    on:click=move |_| vm.close_detail()
                >
                    "关闭"
                </button>
            </div>
        </Modal>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::{ApiClient, ReportDetail},
        state::{
            lifetime::Lifetime, loading::GlobalLoading, notifications::RecordingNotifier,
            permissions::Role,
        },
        test_support::ssr::{render_as, render_to_string},
    };
    use serde_json::json;
    use std::rc::Rc;

    #[test]
    fn manager_can_generate_and_export() {
        let html = render_as(Role::Manager, || view! { <ReportsPanel /> });
        assert!(html.contains("报表统计"));
        assert!(html.contains("生成报表"));
        assert!(html.contains("导出详细报表"));
    }

    #[test]
    fn employee_only_views() {
        let html = render_as(Role::Employee, || view! { <ReportsPanel /> });
        assert!(html.contains("报表统计"));
        assert!(!html.contains("生成报表"));
    }

    #[test]
    fn detail_modal_lists_fields() {
        let html = render_to_string(|| {
            let vm = ReportsViewModel::new(
                ApiClient::new_with_base_url("http://127.0.0.1:9/api"),
                Rc::new(RecordingNotifier::new()),
                GlobalLoading::new(),
                Lifetime::new(),
            );
            let report: Report =
                serde_json::from_value(json!({ "report_id": 8, "report_name": "五月异常", "report_type": "exception" }))
                    .unwrap();
            let detail: ReportDetail =
                serde_json::from_value(json!({ "report_id": 8, "status": "completed", "data": {} })).unwrap();
            vm.detail.set(Some((report, detail)));
            view! { <ReportDetailModal vm=vm /> }
        });
        assert!(html.contains("报表详情"));
        assert!(html.contains("五月异常"));
        assert!(html.contains("已完成"));
        assert!(html.contains("0 条"));
        assert!(html.contains("无摘要"));
        assert!(html.contains("关闭"));
    }
}
