//! # Helpdesk - canned, per-user helpdesk replies
//!
//! Helpdesk answers short free-text questions on behalf of a known user. A query is
//! matched against an ordered list of keyword rules and answered with a templated,
//! canned reply that can mention the user's name and account status.
//!
//! ## Features
//!
//! - **Ordered keyword rules**: first matching rule wins; plain case-sensitive substring tests.
//! - **Injected user directory**: the responder reads users through the [`desk::UserDirectory`] trait;
//!   a built-in table or a JSON seed file backs it.
//! - **Per-session context**: each responder remembers the last resolved user's name.
//! - **Configurable replies**: rules, fallback, and not-found text live in `config.toml`.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use helpdesk::desk::{QueryResponder, StaticDirectory};
//!
//! let mut desk = QueryResponder::new(Arc::new(StaticDirectory::builtin()));
//! assert_eq!(
//!     desk.process_query("How can I reset my password?", "123"),
//!     "Hello Alice, to reset your password, click on 'Forgot Password'."
//! );
//! assert_eq!(
//!     desk.process_query("", "789"),
//!     "User not found. Please provide a valid user ID."
//! );
//! ```
//!
//! ## Module Organization
//!
//! - [`desk`] - responder, rules, templates, and the user directory
//! - [`config`] - configuration loading and validation
//! - [`logutil`] - single-line log escaping for query text

pub mod config;
pub mod desk;
pub mod logutil;
