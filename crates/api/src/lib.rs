//! HTTP API: the browser-facing surface over one invoice session.

pub mod app;
pub mod config;
