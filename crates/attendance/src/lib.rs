//! Drafting and submitting class attendance sessions.
//!
//! The pure core lives in [`session`]: status classification of a session at
//! a reference time, and expansion of a course's weekly schedule into dated
//! drafts. [`api`] talks to the attendance API and [`server`] exposes the
//! session form handlers over HTTP.

pub mod api;
pub mod config;
pub mod server;
pub mod session;
pub mod types;
