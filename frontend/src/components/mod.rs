pub mod cards;
pub mod common;
pub mod confirm_dialog;
pub mod empty_state;
pub mod error;
pub mod error_boundary;
pub mod forms;
pub mod guard;
pub mod layout;
pub mod modal;
pub mod record_detail;
pub mod toast;
