pub mod auth;
pub mod crud;
pub mod lifetime;
pub mod loading;
pub mod notifications;
pub mod permissions;
pub mod session;
