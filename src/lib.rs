//! Konsultasi TUI - terminal front-end for the Konsultasi health-consultation service
//!
//! Sign-in and sign-up screens with validated forms, a simulated
//! authentication task, and a client for submitting a complaint (keluhan)
//! and receiving a suggestion (saran).

pub mod app;
pub mod auth;
pub mod config;
pub mod consultation;
pub mod platform;
pub mod state;
pub mod ui;
