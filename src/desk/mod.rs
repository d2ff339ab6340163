//! # Desk Module
//!
//! Everything needed to answer a helpdesk query lives here.
//!
//! ## Components
//!
//! - [`responder`] - [`QueryResponder`] and its per-session [`ResponderContext`]
//! - [`rules`] - ordered keyword rules, response templates, and the fallback text
//! - [`directory`] - the read-only user table the responder resolves ids against
//! - [`session`] - line-by-line driver that answers a stream of queries
//! - [`errors`] - [`DeskError`] for setup failures (seed files, templates, rules)
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use helpdesk::desk::{QueryResponder, StaticDirectory};
//!
//! let mut desk = QueryResponder::new(Arc::new(StaticDirectory::builtin()));
//! let reply = desk.process_query("What is my account status?", "456");
//! assert_eq!(reply, "Bob, your account status is inactive.");
//! assert_eq!(desk.context().get("user_name"), Some("Bob"));
//! ```

pub mod directory;
pub mod errors;
pub mod responder;
pub mod rules;
pub mod session;

pub use directory::{AccountStatus, StaticDirectory, UserDirectory, UserRecord};
pub use errors::DeskError;
pub use responder::{QueryResponder, Reply, ReplyKind, ResponderContext, USER_NAME_KEY};
pub use rules::{ResponsePolicy, ResponseRule, Template};
pub use session::{run_session, SessionSummary};
