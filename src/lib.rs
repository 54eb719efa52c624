// Main library entry point for py2ts.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
