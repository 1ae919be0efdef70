use crate::{components::error::InlineErrorMessage, pages::login::view_model::LoginViewModel};
use leptos::{ev::SubmitEvent, *};

const INPUT_CLASS: &str = "appearance-none relative block w-full px-3 py-2 border border-border bg-surface-elevated text-fg placeholder-fg-muted focus:outline-none focus:ring-2 focus:ring-action-primary-focus sm:text-sm";

#[component]
pub fn LoginForm(vm: LoginViewModel) -> impl IntoView {
    let pending = vm.login_action.pending();
    let username = vm.form.username;
    let password = vm.form.password;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">"考勤管理系统"</h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">"请登录您的账户"</p>
                </div>
                <form class="mt-8 space-y-6" on:submit=on_submit>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="username" class="sr-only">"用户名"</label>
                            <input
                                id="username"
                                name="username"
                                type="text"
                                autocomplete="username"
                                class=format!("{} rounded-t-md", INPUT_CLASS)
                                placeholder="用户名"
                                prop:value=move || username.get()
                                on:input=move |ev| username.set(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">"密码"</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                autocomplete="current-password"
                                class=format!("{} rounded-b-md", INPUT_CLASS)
                                placeholder="密码"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                        </div>
                    </div>

                    <InlineErrorMessage error=vm.error />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "登录中..." } else { "登录" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
