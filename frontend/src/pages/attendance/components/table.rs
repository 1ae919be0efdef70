use leptos::*;

use crate::{
    api::AttendanceRecord,
    components::{
        common::Tag, empty_state::EmptyState, layout::LoadingSpinner,
        record_detail::attendance_tone,
    },
};

#[component]
pub fn AttendanceTable(
    #[prop(into)] records: Signal<Vec<AttendanceRecord>>,
    #[prop(into)] loading: Signal<bool>,
    on_detail: Callback<AttendanceRecord>,
    on_edit: Callback<AttendanceRecord>,
) -> impl IntoView {
    view! {
        <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
            {move || {
                let rows = records.get();
                if rows.is_empty() {
                    return view! { <EmptyState title="暂无考勤记录" hint="调整筛选条件后重新查询" /> }.into_view();
                }
                view! {
                    <table class="min-w-full divide-y divide-border text-sm">
                        <thead>
                            <tr class="text-left text-fg-muted">
                                <th class="py-2 pr-4">"日期"</th>
                                <th class="py-2 pr-4">"姓名"</th>
                                <th class="py-2 pr-4">"上班时间"</th>
                                <th class="py-2 pr-4">"下班时间"</th>
                                <th class="py-2 pr-4">"考勤状态"</th>
                                <th class="py-2 pr-4">"处理状态"</th>
                                <th class="py-2">"操作"</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            {rows
                                .into_iter()
                                .map(|record| {
                                    let status = record.attendance_status();
                                    let stored = store_value(record.clone());
                                    view! {
                                        <tr>
                                            <td class="py-2 pr-4">{record.date.clone()}</td>
                                            <td class="py-2 pr-4 text-fg">{record.name.clone()}</td>
                                            <td class="py-2 pr-4">{record.check_in.clone().unwrap_or_else(|| "-".into())}</td>
                                            <td class="py-2 pr-4">{record.check_out.clone().unwrap_or_else(|| "-".into())}</td>
                                            <td class="py-2 pr-4">
                                                <Tag tone=attendance_tone(status) label=status.label() />
                                            </td>
                                            <td class="py-2 pr-4 text-fg-muted">{record.process_status.label()}</td>
                                            <td class="py-2 space-x-3 whitespace-nowrap">
                                                <button
                                                    class="text-action-primary-bg hover:underline"
                                                    on:click=move |_| on_detail.call(stored.get_value())
                                                >
                                                    "详情"
                                                </button>
                                                <button
                                                    class="text-action-primary-bg hover:underline"
                                                    on:click=move |_| on_edit.call(stored.get_value())
                                                >
                                                    "修正"
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
