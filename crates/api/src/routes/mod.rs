pub mod assistant;
pub mod auth;
pub mod content;
pub mod health;
pub mod notifications;
pub mod qa;
pub mod schedule;
pub mod settings;
pub mod sync;
pub mod users;
