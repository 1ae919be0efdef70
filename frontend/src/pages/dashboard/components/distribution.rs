use leptos::*;

use crate::{
    api::ExceptionStat,
    components::empty_state::EmptyState,
    pages::dashboard::utils::{distribution, exception_tone, format_percent},
};

#[component]
pub fn ExceptionDistribution(#[prop(into)] stats: Signal<Vec<ExceptionStat>>) -> impl IntoView {
    let rows = move || distribution(&stats.get());

    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <h3 class="text-lg font-medium text-fg">"异常类型分布"</h3>
            {move || {
                let rows = rows();
                if rows.is_empty() {
                    return view! { <EmptyState title="暂无异常数据" /> }.into_view();
                }
                rows.into_iter()
                    .map(|row| {
                        let width = format!("width: {:.1}%", row.percent);
                        view! {
                            <div class="space-y-1">
                                <div class="flex justify-between text-sm">
                                    <span class=format!("inline-flex rounded px-2 py-0.5 text-xs {}", exception_tone(&row.name))>
                                        {row.name.clone()}
                                    </span>
                                    <span class="text-fg-muted">
                                        {format!("{} ({})", row.value, format_percent(row.percent))}
                                    </span>
                                </div>
                                <div class="h-2 rounded bg-surface-muted">
                                    <div class="h-2 rounded bg-action-primary-bg" style=width></div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </section>
    }
}
