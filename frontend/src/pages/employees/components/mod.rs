pub mod form_modal;
pub mod table;
pub mod toolbar;
