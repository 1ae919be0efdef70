use leptos::*;

pub mod calendar;
pub mod components;
pub mod import;
pub mod repository;
pub mod templates;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::{SchedulesPanel, TEMPLATES_PATH};
pub use templates::ShiftTemplatesPage;

#[component]
pub fn SchedulesPage() -> impl IntoView {
    view! { <SchedulesPanel /> }
}
