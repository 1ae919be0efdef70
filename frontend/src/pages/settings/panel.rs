use leptos::*;

use super::view_model::use_settings_view_model;
use crate::components::{common::ButtonVariant, error::InlineErrorMessage, forms::TextField};

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let vm = use_settings_view_model();
    let form = vm.form;

    view! {
        <div class="mx-auto max-w-3xl space-y-6">
            <h2 class="text-2xl font-bold text-fg">"个人设置"</h2>
            <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <h3 class="text-xl font-semibold text-fg border-b border-border pb-2">"修改密码"</h3>
                <form
                    class="space-y-4"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        spawn_local(async move {
                            vm.change_password().await;
                        });
                    }
                >
                    <TextField label="当前密码" value=form.current input_type="password" required=true />
                    <TextField label="新密码" value=form.new input_type="password" required=true />
                    <TextField label="确认新密码" value=form.confirm input_type="password" required=true />
                    <InlineErrorMessage error=vm.error />
                    <div class="flex justify-end">
                        <button
                            type="submit"
                            class=format!("rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}", ButtonVariant::Primary.classes())
                            disabled=move || vm.saving.get()
                        >
                            {move || if vm.saving.get() { "更新中..." } else { "更新密码" }}
                        </button>
                    </div>
                </form>
            </section>
        </div>
    }
}
