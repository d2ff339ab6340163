//! The query responder: resolve the user, remember who they are, pick a reply.
//!
//! A [`QueryResponder`] is created per session and used by one caller at a time.
//! Each call to [`QueryResponder::process_query`] runs the same fixed sequence:
//!
//! 1. Resolve `user_id` in the directory. Unknown or empty ids return the policy's
//!    not-found text and leave the context untouched.
//! 2. Record the resolved name under [`USER_NAME_KEY`] in the context.
//! 3. Render the first rule whose keyword occurs in the query, or the fallback.
//!
//! Resolution always happens first, even for rules whose template never mentions
//! the user.

use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use super::directory::UserDirectory;
use super::rules::{ResponsePolicy, TemplateFields};
use crate::logutil::escape_log;

/// Context key holding the most recently resolved user's name.
pub const USER_NAME_KEY: &str = "user_name";

/// Per-responder key/value state. Only ever grows; nothing clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponderContext {
    values: HashMap<String, String>,
}

impl ResponderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Which branch produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyKind {
    UserNotFound,
    Matched { rule: String },
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
}

impl Reply {
    pub fn into_text(self) -> String {
        self.text
    }
}

pub struct QueryResponder {
    directory: Arc<dyn UserDirectory + Send + Sync>,
    policy: ResponsePolicy,
    context: ResponderContext,
}

impl QueryResponder {
    /// Responder with the stock response policy.
    pub fn new(directory: Arc<dyn UserDirectory + Send + Sync>) -> Self {
        Self::with_policy(directory, ResponsePolicy::default())
    }

    pub fn with_policy(
        directory: Arc<dyn UserDirectory + Send + Sync>,
        policy: ResponsePolicy,
    ) -> Self {
        Self {
            directory,
            policy,
            context: ResponderContext::new(),
        }
    }

    pub fn context(&self) -> &ResponderContext {
        &self.context
    }

    pub fn policy(&self) -> &ResponsePolicy {
        &self.policy
    }

    /// Answer `query` on behalf of `user_id`, returning the response text.
    pub fn process_query(&mut self, query: &str, user_id: &str) -> String {
        self.respond(query, user_id).into_text()
    }

    /// Same as [`process_query`](Self::process_query) but also reports which branch fired.
    pub fn respond(&mut self, query: &str, user_id: &str) -> Reply {
        let Some(record) = self.directory.lookup(user_id) else {
            debug!(
                "user '{}' not found (query='{}')",
                escape_log(user_id),
                escape_log(query)
            );
            return Reply {
                kind: ReplyKind::UserNotFound,
                text: self.policy.user_not_found().to_string(),
            };
        };

        self.context.set(USER_NAME_KEY, &record.name);

        let fields = TemplateFields {
            user_name: self.context.get(USER_NAME_KEY).unwrap_or(&record.name),
            account_status: record.account_status,
        };
        let reply = match self.policy.select(query) {
            Some(rule) => Reply {
                kind: ReplyKind::Matched {
                    rule: rule.name.clone(),
                },
                text: rule.template.render(&fields),
            },
            None => Reply {
                kind: ReplyKind::Fallback,
                text: self.policy.fallback().render(&fields),
            },
        };
        debug!(
            "user '{}' query='{}' -> {:?}",
            escape_log(user_id),
            escape_log(query),
            reply.kind
        );
        reply
    }
}
