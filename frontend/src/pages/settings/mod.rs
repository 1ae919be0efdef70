use leptos::*;

pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::SettingsPanel;

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! { <SettingsPanel /> }
}
