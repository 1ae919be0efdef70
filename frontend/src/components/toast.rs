use leptos::*;

use crate::state::notifications::ToastStore;

#[component]
pub fn ToastHost(store: ToastStore) -> impl IntoView {
    let notices = store.notices();
    view! {
        <div class="fixed top-4 right-4 z-[80] flex flex-col gap-2 w-80" aria-live="polite">
            <For
                each=move || notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div
                            class=format!(
                                "flex items-start justify-between gap-3 rounded border px-4 py-3 shadow text-sm {}",
                                notice.level.classes()
                            )
                            role="status"
                        >
                            <span>{notice.message}</span>
                            <button
                                type="button"
                                aria-label="关闭"
                                class="opacity-60 hover:opacity-100"
                                on:click=move |_| store.dismiss(id)
                            >
                                {"✕"}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
