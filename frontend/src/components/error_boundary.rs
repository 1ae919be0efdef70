use leptos::*;

use crate::{
    api::ApiClient,
    utils::navigation::{default_navigator, Navigator, HOME_PATH},
};

fn navigator() -> std::rc::Rc<dyn Navigator> {
    use_context::<ApiClient>()
        .map(|client| client.navigator())
        .unwrap_or_else(default_navigator)
}

/// Top-level fallback for views that render an `Err`.
#[component]
pub fn AppErrorBoundary(children: Children) -> impl IntoView {
    view! {
        <ErrorBoundary fallback=|errors| view! { <ErrorFallback errors=errors /> }>
            {children()}
        </ErrorBoundary>
    }
}

#[component]
pub fn ErrorFallback(errors: RwSignal<Errors>) -> impl IntoView {
    let on_reload = move |_| navigator().reload();
    let on_home = move |_| navigator().go_to(HOME_PATH);
    let messages = move || {
        errors
            .get()
            .into_iter()
            .map(|(_, error)| error.to_string())
            .collect::<Vec<_>>()
    };
    create_effect(move |_| {
        for message in messages() {
            log::error!("view error: {}", message);
        }
    });

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface px-4">
            <div class="max-w-lg w-full text-center space-y-4">
                <div class="mx-auto h-12 w-12 text-status-error-text">
                    <i class="fas fa-exclamation-triangle text-4xl"></i>
                </div>
                <h1 class="text-xl font-semibold text-fg">"页面出现错误"</h1>
                <p class="text-sm text-fg-muted">
                    "抱歉，页面遇到了一些问题。您可以尝试刷新页面或返回首页。"
                </p>
                <div class="flex justify-center gap-3">
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                        on:click=on_reload
                    >
                        "刷新页面"
                    </button>
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg border border-border"
                        on:click=on_home
                    >
                        "返回首页"
                    </button>
                </div>
                <Show when=move || cfg!(debug_assertions)>
                    <pre class="text-left text-xs text-status-error-text bg-status-error-bg border border-status-error-border rounded p-3 whitespace-pre-wrap">
                        {move || messages().join("\n")}
                    </pre>
                </Show>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ApiError;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn failing_child_shows_recovery_actions() {
        let html = render_to_string(move || {
            view! {
                <AppErrorBoundary>
                    {move || Err::<String, ApiError>(ApiError::unknown("render failed"))}
                </AppErrorBoundary>
            }
        });
        assert!(html.contains("页面出现错误"));
        assert!(html.contains("刷新页面"));
        assert!(html.contains("返回首页"));
    }

    #[test]
    fn healthy_child_renders_normally() {
        let html = render_to_string(move || {
            view! {
                <AppErrorBoundary>
                    <p>"all good"</p>
                </AppErrorBoundary>
            }
        });
        assert!(html.contains("all good"));
        assert!(!html.contains("页面出现错误"));
    }
}
