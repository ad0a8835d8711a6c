mod auth_test;
mod middleware_test;
mod schedule_test;
mod settings_test;
mod sync_test;
mod users_test;
