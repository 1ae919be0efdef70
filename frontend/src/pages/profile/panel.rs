use leptos::*;

use super::{
    utils::subtitle,
    view_model::{use_profile_view_model, ProfileViewModel},
};
use crate::{
    components::{
        common::{Button, ButtonVariant},
        error::InlineErrorMessage,
        forms::TextField,
        layout::LoadingSpinner,
        modal::Modal,
    },
    utils::time::format_date,
};

#[component]
pub fn ProfilePanel() -> impl IntoView {
    let vm = use_profile_view_model();

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold text-fg">"个人信息"</h2>
            <Show when=move || !vm.loading.get() fallback=|| view! { <LoadingSpinner /> }>
                {move || {
                    vm.profile.get().map(|profile| {
                        let dash = || "-".to_string();
                        let fields = [
                            ("员工ID", profile.user_id().map(|id| id.to_string()).unwrap_or_else(dash)),
                            ("邮箱", profile.email.clone().unwrap_or_else(dash)),
                            ("电话", profile.phone.clone().unwrap_or_else(dash)),
                            ("入职日期", profile.hire_date.map(format_date).unwrap_or_else(dash)),
                        ];
                        view! {
                            <section class="bg-surface-elevated shadow rounded-lg p-6 space-y-6">
                                <div class="flex items-center gap-4">
                                    <div class="flex h-16 w-16 items-center justify-center rounded-full bg-surface-muted text-fg-muted">
                                        <i class="fas fa-user text-2xl"></i>
                                    </div>
                                    <div>
                                        <h3 class="text-xl font-bold text-fg">{profile.name.clone()}</h3>
                                        <p class="text-fg-muted">{subtitle(&profile)}</p>
                                    </div>
                                </div>
                                <div>
                                    <h4 class="mb-2 text-sm font-semibold text-fg">"基本信息"</h4>
                                    <dl class="grid grid-cols-1 gap-px overflow-hidden rounded-md border border-border bg-border sm:grid-cols-2">
                                        {fields
                                            .into_iter()
                                            .map(|(label, value)| view! {
                                                <div class="flex bg-surface-elevated text-sm">
                                                    <dt class="w-24 bg-surface-muted px-3 py-2 text-fg-muted">{label}</dt>
                                                    <dd class="px-3 py-2 text-fg">{value}</dd>
                                                </div>
                                            })
                                            .collect_view()}
                                    </dl>
                                </div>
                                <div class="flex justify-end">
                                    <Button on:click=move |_| vm.open_edit()>"编辑信息"</Button>
                                </div>
                            </section>
                        }
                    })
                }}
            </Show>
            <EditProfileModal vm=vm />
        </div>
    }
}

#[component]
fn EditProfileModal(vm: ProfileViewModel) -> impl IntoView {
    let form = vm.form;
    let submit = move || {
        spawn_local(async move {
            vm.submit().await;
        });
    };

    view! {
        <Modal
            is_open=Signal::derive(move || vm.editing.get())
            title="编辑个人信息"
            on_close=Callback::new(move |_| vm.close_edit())
        >
            <form
                class="space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <TextField label="姓名" value=form.name placeholder="请输入姓名" required=true />
                <TextField label="邮箱" value=form.email input_type="email" placeholder="请输入邮箱" required=true />
                <TextField label="手机号" value=form.phone placeholder="请输入手机号" required=true />
                <TextField label="职位" value=form.position placeholder="请输入职位" required=true />
                <InlineErrorMessage error=vm.form_error />
                <div class="flex justify-end gap-2">
                    <button
                        type="button"
                        class=format!("rounded-md px-4 py-2 text-sm font-semibold {}", ButtonVariant::Secondary.classes())
                        on:click=move |_| vm.close_edit()
                    >
                        "取消"
                    </button>
                    <button
                        type="submit"
                        class=format!("rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}", ButtonVariant::Primary.classes())
                        disabled=move || vm.saving.get()
                    >
                        {move || if vm.saving.get() { "保存中..." } else { "保存" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::{ApiClient, Profile},
        state::{lifetime::Lifetime, notifications::RecordingNotifier},
        test_support::ssr::render_to_string,
    };
    use std::rc::Rc;

    #[test]
    fn edit_modal_shows_prefilled_form() {
        let html = render_to_string(|| {
            let vm = ProfileViewModel::new(
                ApiClient::new_with_base_url("http://127.0.0.1:9/api"),
                Rc::new(RecordingNotifier::new()),
                Lifetime::new(),
            );
            vm.profile.set(Some(Profile {
                id: Some(5),
                employee_id: None,
                employee_no: None,
                name: "赵六".into(),
                email: Some("zhao@example.com".into()),
                phone: Some("13800138000".into()),
                department: None,
                position: Some("工程师".into()),
                hire_date: None,
            }));
            vm.open_edit();
            view! { <EditProfileModal vm=vm /> }
        });
        assert!(html.contains("编辑个人信息"));
        assert!(html.contains("手机号"));
        assert!(html.contains("保存"));
    }

    #[test]
    fn subtitle_skips_missing_department() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "name": "赵六", "position": "工程师"
        }))
        .unwrap();
        assert_eq!(subtitle(&profile), "工程师");
    }
}
