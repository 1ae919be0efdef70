mod attendance;
mod auth;
pub mod client;
mod dashboard;
mod employees;
pub mod envelope;
pub mod errors;
mod exceptions;
mod profile;
mod reports;
pub mod retry;
mod schedules;
pub mod types;

pub use client::*;
pub use dashboard::DashboardSnapshot;
pub use envelope::ScheduleMap;
pub use types::*;
