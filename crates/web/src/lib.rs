//! HTML front end: routing, sessions, templates and error pages.

pub mod app;
pub mod context;
pub mod middleware;
