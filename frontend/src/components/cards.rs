use leptos::*;

#[component]
pub fn StatCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] icon: &'static str,
    #[prop(optional, into)] hint: Option<String>,
) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated overflow-hidden shadow rounded-lg">
            <div class="px-4 py-5 sm:p-6 flex items-center gap-4">
                {(!icon.is_empty()).then(|| view! {
                    <div class="w-10 h-10 flex items-center justify-center rounded-lg bg-surface-muted text-action-primary-bg">
                        <i class=format!("fas {}", icon)></i>
                    </div>
                })}
                <div>
                    <dt class="text-sm font-medium text-fg-muted">{title}</dt>
                    <dd class="mt-1 text-2xl font-semibold text-fg">{move || value.get()}</dd>
                    {hint.map(|hint| view! { <p class="mt-1 text-xs text-fg-muted">{hint}</p> })}
                </div>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn stat_card_renders_title_and_value() {
        let html = render_to_string(move || {
            view! { <StatCard title="今日出勤率" value=Signal::derive(|| "92.5%".to_string()) icon="fa-user-check" /> }
        });
        assert!(html.contains("今日出勤率"));
        assert!(html.contains("92.5%"));
        assert!(html.contains("fa-user-check"));
    }
}
