use crate::state::{
    auth::{use_auth, use_logout},
    loading::use_global_loading,
    permissions::{use_permissions, Permission, Role},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub requires: Option<Permission>,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { href: "/", label: "首页", requires: None },
    NavItem { href: "/employees", label: "员工管理", requires: Some(Permission::EmployeeView) },
    NavItem { href: "/attendance", label: "考勤管理", requires: None },
    NavItem { href: "/schedules", label: "排班管理", requires: Some(Permission::ScheduleView) },
    NavItem { href: "/exceptions", label: "异常规则", requires: Some(Permission::ExceptionView) },
    NavItem { href: "/reports", label: "报表", requires: Some(Permission::ReportView) },
    NavItem { href: "/profile", label: "个人资料", requires: None },
    NavItem { href: "/settings", label: "设置", requires: None },
];

const LINK_CLASS: &str = "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let permissions = use_permissions();
    let snapshot = permissions.snapshot();
    let (menu_open, set_menu_open) = create_signal(false);
    let logout = use_logout();

    let visible_items = move || {
        snapshot.with(|set| {
            NAV_ITEMS
                .iter()
                .copied()
                .filter(|item| item.requires.map_or(true, |p| set.has(p)))
                .collect::<Vec<_>>()
        })
    };
    let user_label = move || {
        auth.get()
            .user
            .map(|user| {
                let role = Role::from_user(Some(&user));
                format!("{} ({})", user.username, role.label())
            })
            .unwrap_or_default()
    };
    let on_logout = move |_| {
        set_menu_open.set(false);
        logout.call(());
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center">
                        <h1 class="text-xl font-semibold text-fg">"考勤管理系统"</h1>
                    </div>
                    <div class="flex items-center">
                        <nav class="hidden lg:flex space-x-4 items-center">
                            {move || {
                                visible_items()
                                    .into_iter()
                                    .map(|item| view! { <a href=item.href class=LINK_CLASS>{item.label}</a> })
                                    .collect_view()
                            }}
                            <span class="text-sm text-fg-muted px-3">{user_label}</span>
                            <button on:click=on_logout class=LINK_CLASS>
                                "退出登录"
                            </button>
                        </nav>
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get()
                            aria-controls="mobile-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "关闭菜单" } else { "打开菜单" }}
                            </span>
                            <svg
                                class="h-6 w-6"
                                xmlns="http://www.w3.org/2000/svg"
                                fill="none"
                                viewBox="0 0 24 24"
                                stroke="currentColor"
                            >
                                <Show
                                    when=move || menu_open.get()
                                    fallback=move || {
                                        view! {
                                            <path
                                                stroke-linecap="round"
                                                stroke-linejoin="round"
                                                stroke-width="2"
                                                d="M4 6h16M4 12h16M4 18h16"
                                            />
                                        }
                                    }
                                >
                                    <path
                                        stroke-linecap="round"
                                        stroke-linejoin="round"
                                        stroke-width="2"
                                        d="M6 18L18 6M6 6l12 12"
                                    />
                                </Show>
                            </svg>
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div id="mobile-nav" class="lg:hidden border-t border-border">
                        <nav class="px-4 py-3 space-y-2">
                            {move || {
                                visible_items()
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <a
                                                href=item.href
                                                class=format!("block {}", LINK_CLASS)
                                                on:click=move |_| set_menu_open.set(false)
                                            >
                                                {item.label}
                                            </a>
                                        }
                                    })
                                    .collect_view()
                            }}
                            <button
                                on:click=on_logout
                                class=format!("w-full text-left {}", LINK_CLASS)
                            >
                                "退出登录"
                            </button>
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                {children()}
            </main>
            <LoadingOverlay/>
        </div>
    }
}

/// Full-screen blocker driven by [`crate::state::loading::GlobalLoading`].
#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let loading = use_global_loading();
    let active = loading.is_active();
    let text = loading.text();
    view! {
        <Show when=move || active.get()>
            <div
                class="fixed inset-0 z-[90] flex flex-col items-center justify-center gap-3 bg-overlay-backdrop"
                role="alert"
                aria-busy="true"
            >
                <div class="animate-spin rounded-full h-10 w-10 border-b-2 border-action-primary-text"></div>
                <p class="text-sm text-action-primary-text">{move || text.get()}</p>
            </div>
        </Show>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}
