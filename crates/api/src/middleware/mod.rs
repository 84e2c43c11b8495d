//! HTTP middleware: authentication extractor.

pub mod auth;
