use super::{components::form::LoginForm, view_model::use_login_view_model};
use leptos::*;

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    view! { <LoginForm vm=vm /> }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_panel_renders_form() {
        let html = render_to_string(|| view! { <LoginPanel /> });
        assert!(html.contains("考勤管理系统"));
        assert!(html.contains("用户名"));
        assert!(html.contains("登录"));
    }
}
