//! # Studio Core
//!
//! Domain types and the pure logic of the yoga studio: booking capacity and
//! status transitions, the login/registration gate, role-scoped views and the
//! Q&A board. Nothing in this crate performs I/O; callers load a collection,
//! hand it to these functions and persist the result.

pub mod access;
pub mod booking;
pub mod errors;
pub mod models;
pub mod qa;
