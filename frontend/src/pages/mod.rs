pub mod attendance;
pub mod dashboard;
pub mod employees;
pub mod exceptions;
pub mod login;
pub mod profile;
pub mod reports;
pub mod schedules;
pub mod settings;
