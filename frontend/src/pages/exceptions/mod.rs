use leptos::*;

pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::ExceptionsPanel;

#[component]
pub fn ExceptionsPage() -> impl IntoView {
    view! { <ExceptionsPanel /> }
}
