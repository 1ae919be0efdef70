use crate::api::ApiError;
use leptos::*;

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let listed = e
                        .details
                        .as_ref()
                        .and_then(|details| details.as_array().cloned())
                        .filter(|items| !items.is_empty());
                    if let Some(items) = listed {
                        return view! {
                            <ul class="list-disc list-inside text-sm">
                                {items.iter().map(|item| {
                                    let text = item
                                        .get("msg")
                                        .and_then(|m| m.as_str())
                                        .or_else(|| item.as_str())
                                        .unwrap_or_default()
                                        .to_string();
                                    view! { <li>{text}</li> }
                                }).collect_view()}
                            </ul>
                        }.into_view();
                    }
                    match e.status {
                        Some(status) => view! {
                            <div class="text-xs opacity-75">{format!("状态码: {}", status)}</div>
                        }.into_view(),
                        None => ().into_view(),
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}
