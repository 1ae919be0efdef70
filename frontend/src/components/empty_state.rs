use leptos::*;

/// Placeholder shown where a list or table has no rows.
#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] hint: Option<String>,
) -> impl IntoView {
    view! {
        <div class="text-center py-10 px-4 rounded-lg border border-dashed border-border-strong bg-surface-muted">
            <svg class="mx-auto h-10 w-10 text-fg-muted" fill="none" viewBox="0 0 24 24" stroke="currentColor" aria-hidden="true">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="1.5" d="M8 7V3m8 4V3m-9 8h10M5 21h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v12a2 2 0 002 2z" />
            </svg>
            <p class="mt-2 text-sm font-medium text-fg">{title}</p>
            {hint.map(|hint| view! { <p class="mt-1 text-xs text-fg-muted">{hint}</p> })}
        </div>
    }
}
