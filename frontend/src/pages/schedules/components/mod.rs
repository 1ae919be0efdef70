pub mod calendar;
pub mod day_detail;
pub mod edit_modal;
pub mod schedule_modal;
