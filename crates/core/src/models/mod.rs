pub mod assistant;
pub mod content;
pub mod notification;
pub mod qa;
pub mod schedule;
pub mod settings;
pub mod user;
