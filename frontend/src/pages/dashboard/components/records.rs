use leptos::*;

use crate::{
    api::ExceptionRecord,
    components::{common::Tag, empty_state::EmptyState, layout::LoadingSpinner},
    pages::dashboard::utils::{exception_tone, process_tone, record_action_label},
};

#[component]
pub fn ExceptionRecordsTable(
    #[prop(into)] records: Signal<Vec<ExceptionRecord>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] exporting: Signal<bool>,
    on_open: Callback<i64>,
    on_export: Callback<()>,
) -> impl IntoView {
    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h3 class="text-lg font-medium text-fg">"今日异常记录"</h3>
                <button
                    class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                    disabled=move || exporting.get()
                    on:click=move |_| on_export.call(())
                >
                    {move || if exporting.get() { "导出中..." } else { "导出报表" }}
                </button>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                {move || {
                    let rows = records.get();
                    if rows.is_empty() {
                        return view! { <EmptyState title="今日暂无异常记录" /> }.into_view();
                    }
                    view! {
                        <table class="min-w-full divide-y divide-border text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted">
                                    <th class="py-2">"姓名"</th>
                                    <th class="py-2">"工号"</th>
                                    <th class="py-2">"异常类型"</th>
                                    <th class="py-2">"时间"</th>
                                    <th class="py-2">"状态"</th>
                                    <th class="py-2">"操作"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-border">
                                {rows
                                    .into_iter()
                                    .map(|record| {
                                        let id = record.record_id;
                                        view! {
                                            <tr>
                                                <td class="py-2 text-fg">{record.employee_name.clone()}</td>
                                                <td class="py-2 text-fg-muted">{record.employee_no.clone().unwrap_or_default()}</td>
                                                <td class="py-2">
                                                    <Tag tone=exception_tone(&record.exception_type) label=record.exception_type.clone() />
                                                </td>
                                                <td class="py-2 text-fg-muted">{record.time.clone().unwrap_or_default()}</td>
                                                <td class="py-2">
                                                    <Tag tone=process_tone(record.status) label=record.status.label() />
                                                </td>
                                                <td class="py-2">
                                                    <button
                                                        class="text-action-primary-bg hover:underline"
                                                        on:click=move |_| on_open.call(id)
                                                    >
                                                        {record_action_label(record.status)}
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
        </section>
    }
}
