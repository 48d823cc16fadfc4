//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cookie management (Set-Cookie construction, cookie extraction)
//! - HTTP client construction for external services

pub mod cookie;
pub mod http;
