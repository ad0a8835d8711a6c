pub mod content;
pub mod qa;
pub mod schedule;
pub mod settings;
pub mod users;
