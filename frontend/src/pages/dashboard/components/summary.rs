use leptos::*;

use crate::{components::cards::StatCard, pages::dashboard::utils::format_percent, api::DashboardStats};

#[component]
pub fn SummaryCards(#[prop(into)] stats: Signal<DashboardStats>) -> impl IntoView {
    let rate = Signal::derive(move || format_percent(stats.get().attendance_rate));
    let abnormal = Signal::derive(move || format!("{} 例", stats.get().abnormal_attendance));
    let present = Signal::derive(move || stats.get().present_today.to_string());
    let late_early = Signal::derive(move || format!("{} 例", stats.get().late_early_count));

    view! {
        <div class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4">
            <StatCard title="今日出勤率" value=rate icon="fa-chart-line" />
            <StatCard title="异常预警" value=abnormal icon="fa-exclamation-triangle" />
            <StatCard title="在岗人数" value=present icon="fa-users" />
            <StatCard title="迟到早退" value=late_early icon="fa-clock" />
        </div>
    }
}
