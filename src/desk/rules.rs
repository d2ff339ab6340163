//! Response policy: ordered keyword rules, a fallback, and the not-found sentinel.
//!
//! Rules are checked in declaration order against the raw query text and the first
//! rule whose keyword is contained in the query wins. Matching is a plain,
//! case-sensitive substring test; there is no normalization or tokenization.
//!
//! Response text comes from [`Template`]s. A template is parsed once into literal
//! and field segments and rendered in a single pass, so a user name that happens to
//! contain `{account_status}` is printed as-is rather than expanded again.
//!
//! | placeholder        | rendered from                      |
//! |--------------------|------------------------------------|
//! | `{user_name}`      | responder context (`user_name`)    |
//! | `{account_status}` | resolved user record               |
//!
//! `{{` and `}}` produce literal braces.

use log::trace;
use std::collections::HashSet;

use super::directory::AccountStatus;
use super::errors::DeskError;

pub const USER_NOT_FOUND: &str = "User not found. Please provide a valid user ID.";
pub const FALLBACK: &str = "I'm sorry, I didn't understand your question.";

/// Built-in rules as `(name, keyword, template)`, in evaluation order.
pub const DEFAULT_RULES: [(&str, &str, &str); 3] = [
    (
        "password_reset",
        "reset my password",
        "Hello {user_name}, to reset your password, click on 'Forgot Password'.",
    ),
    (
        "hours_of_operation",
        "hours of operation",
        "We are open from 9 AM to 5 PM, Monday through Friday.",
    ),
    (
        "account_status",
        "account status",
        "{user_name}, your account status is {account_status}.",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UserName,
    AccountStatus,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "user_name" => Some(Field::UserName),
            "account_status" => Some(Field::AccountStatus),
            _ => None,
        }
    }
}

/// Values available to a template at render time.
#[derive(Debug, Clone, Copy)]
pub struct TemplateFields<'a> {
    pub user_name: &'a str,
    pub account_status: AccountStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, DeskError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(DeskError::template(source, "unclosed '{'"));
                    }
                    let field = Field::from_name(&name).ok_or_else(|| {
                        DeskError::template(source, format!("unknown placeholder {{{}}}", name))
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => return Err(DeskError::template(source, "unmatched '}'")),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn uses(&self, field: Field) -> bool {
        self.segments.contains(&Segment::Field(field))
    }

    pub fn render(&self, fields: &TemplateFields<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::UserName) => out.push_str(fields.user_name),
                Segment::Field(Field::AccountStatus) => {
                    out.push_str(fields.account_status.as_str())
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRule {
    pub name: String,
    pub keyword: String,
    pub template: Template,
}

impl ResponseRule {
    pub fn new(name: &str, keyword: &str, template: &str) -> Result<Self, DeskError> {
        if keyword.is_empty() {
            // An empty keyword is contained in every query and would shadow later rules.
            return Err(DeskError::invalid_rule(name, "keyword must not be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            keyword: keyword.to_string(),
            template: Template::parse(template)?,
        })
    }

    pub fn matches(&self, query: &str) -> bool {
        query.contains(self.keyword.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePolicy {
    rules: Vec<ResponseRule>,
    fallback: Template,
    user_not_found: String,
}

impl ResponsePolicy {
    pub fn new(
        rules: Vec<ResponseRule>,
        fallback: Template,
        user_not_found: &str,
    ) -> Result<Self, DeskError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.name.as_str()) {
                return Err(DeskError::invalid_rule(&rule.name, "duplicate rule name"));
            }
        }
        Ok(Self {
            rules,
            fallback,
            user_not_found: user_not_found.to_string(),
        })
    }

    /// First rule whose keyword occurs in `query`, or `None` for the fallback.
    pub fn select(&self, query: &str) -> Option<&ResponseRule> {
        let hit = self.rules.iter().find(|rule| rule.matches(query));
        match hit {
            Some(rule) => trace!("rule '{}' matched keyword '{}'", rule.name, rule.keyword),
            None => trace!("no rule matched; using fallback"),
        }
        hit
    }

    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &Template {
        &self.fallback
    }

    pub fn user_not_found(&self) -> &str {
        &self.user_not_found
    }
}

impl Default for ResponsePolicy {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(name, keyword, template)| {
                ResponseRule::new(name, keyword, template).expect("built-in rule is valid")
            })
            .collect();
        Self {
            rules,
            fallback: Template::parse(FALLBACK).expect("built-in fallback is valid"),
            user_not_found: USER_NOT_FOUND.to_string(),
        }
    }
}
