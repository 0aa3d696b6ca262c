//! # External Services
//!
//! Thin reqwest-backed clients for the information intents, plus the mail
//! collaborator. Each client degrades to a spoken "not configured" style
//! error when its API key is missing; network failures surface as
//! `anyhow::Error` for the handler to translate.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod mailer;
pub mod news;
pub mod weather;
pub mod wiki;

pub use mailer::{parse_email_request, resolve_recipient, LogMailer, Mailer, OutboundMail};
pub use news::NewsClient;
pub use weather::{locate_city, WeatherClient, WeatherReport};
pub use wiki::{WikiClient, WikiError};
