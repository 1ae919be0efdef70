use leptos::*;

pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::ShiftTemplatesPanel;

#[component]
pub fn ShiftTemplatesPage() -> impl IntoView {
    view! { <ShiftTemplatesPanel /> }
}
