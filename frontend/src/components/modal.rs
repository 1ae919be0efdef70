use leptos::ev::KeyboardEvent;
use leptos::*;

/// Dialog shell shared by the form and detail modals.
#[component]
pub fn Modal(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let width = if wide { "max-w-3xl" } else { "max-w-lg" };
    let children = store_value(children);
    let title = Signal::derive(move || title.get());

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="关闭"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_close.call(())
                ></button>
                <div
                    class=format!(
                        "relative z-[61] w-full {} max-h-[90vh] overflow-y-auto rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4",
                        width
                    )
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_close.call(());
                        }
                    }
                >
                    <div class="flex items-start justify-between gap-3">
                        <h2 class="text-lg font-semibold text-fg">{move || title.get()}</h2>
                        <button
                            type="button"
                            aria-label="关闭"
                            class="text-fg-muted hover:text-fg"
                            on:click=move |_| on_close.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    {children.with_value(|children| children())}
                </div>
            </div>
        </Show>
    }
}
