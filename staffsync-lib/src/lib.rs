//! StaffSync API client library
//!
//! An async client for the StaffSync staff-management server: attendance
//! marking, notification polling, employee deletion and payroll generation.

pub mod api;
pub mod config;
pub mod error;

mod client;

pub use client::*;
pub use config::Config;
