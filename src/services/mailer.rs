//! # Mail Collaborator
//!
//! Outbound email is an external collaborator: the assistant composes the
//! message and hands it to a [`Mailer`]. The default [`LogMailer`] records
//! and logs outbound mail; a real transport plugs in behind the trait.
//!
//! Also hosts recipient resolution (spoken name -> address via the
//! configured contact book) and the inline email-request parser used by
//! the web path.

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutboundMail) -> Result<()>;
}

/// Mailer that records messages instead of delivering them.
#[derive(Default)]
pub struct LogMailer {
    sent: Mutex<Vec<OutboundMail>>,
}

impl LogMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OutboundMail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutboundMail) -> Result<()> {
        info!(
            "Outbound mail to {} | subject: {} | {} chars",
            mail.recipient,
            mail.subject,
            mail.body.len()
        );
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(mail);
        Ok(())
    }
}

/// Resolve a spoken recipient to an address.
///
/// Accepts a literal address, a contact-book name, or a contact-book name
/// with a leading "to ".
pub fn resolve_recipient(said: &str, contacts: &HashMap<String, String>) -> Option<String> {
    let said = said.trim().to_lowercase();

    if said.contains('@') && said.contains('.') {
        return Some(said);
    }
    if let Some(address) = contacts.get(&said) {
        return Some(address.clone());
    }
    if let Some(name) = said.strip_prefix("to ") {
        return contacts.get(name).cloned();
    }
    None
}

/// Parse a one-shot email request like
/// "send email to a@b.com with subject Meeting and message See you there".
///
/// Used by the web path, which has no conversational prompts. Returns None
/// unless recipient, subject, and body were all found.
pub fn parse_email_request(text: &str) -> Option<OutboundMail> {
    let address = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .ok()?
        .find(text)?
        .as_str()
        .to_string();

    let subject = Regex::new(r"(?i)(?:with subject|subject is|subject:?)\s+(.+?)(?:\s+and\b|\s+with\b|$)")
        .ok()?
        .captures(text)?
        .get(1)?
        .as_str()
        .trim()
        .to_string();

    let body = Regex::new(r"(?i)(?:and message|with message|message|body|saying)\s+(.+)$")
        .ok()?
        .captures(text)?
        .get(1)?
        .as_str()
        .trim()
        .to_string();

    Some(OutboundMail {
        recipient: address,
        subject,
        body,
    })
}
