//! # Web API Handlers
//!
//! JSON endpoints over the same context the voice loop uses. Text sent
//! here runs through the same classifier and handlers, with one
//! difference: intents that would prompt for follow-up in voice mode are
//! answered from the request text alone, or with instructions on how to
//! phrase a one-shot request.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::LogEntry;
use crate::features::reminders::Reminder;
use crate::intents::handlers::remind;
use crate::intents::{AssistantContext, Intent, IntentKind};
use crate::services::parse_email_request;

use super::AppState;

/// How many conversation entries one request returns.
const CONVERSATION_LIMIT: usize = 20;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn check_rate_limit(state: &AppState, addr: &SocketAddr) -> Result<(), ApiError> {
    if state.limiter.check(&addr.ip().to_string()) {
        Ok(())
    } else {
        Err(error(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests. Slow down.",
        ))
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub assistant: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: i64,
    pub pending_reminders: usize,
    pub conversation_entries: usize,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let ctx = state.dispatcher.context();
    Json(StatusResponse {
        status: "online",
        assistant: ctx.config.assistant_name.clone(),
        timestamp: Utc::now(),
        uptime_seconds: ctx.uptime_seconds(),
        pending_reminders: ctx.reminders.pending().len(),
        conversation_entries: ctx.history.len(),
    })
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct TextResponse {
    pub response: String,
    pub intent: IntentKind,
    pub confidence: f32,
}

/// Reply to intents whose voice handler would prompt for follow-up.
/// Returns None for intents that are safe to dispatch as-is.
async fn prompt_free_reply(ctx: &AssistantContext, intent: &Intent) -> Option<String> {
    match intent.kind {
        IntentKind::Reminder => Some(match remind::parse_inline_request(&intent.raw_text) {
            Some((what, minutes)) => remind::schedule_spoken(&ctx.reminders, &what, minutes),
            None => "Please phrase it in one request, like 'remind me to stretch in 20 minutes'."
                .to_string(),
        }),
        IntentKind::Email => {
            if ctx.config.sender_email.is_none() {
                return Some(
                    "Email isn't configured. Set a sender address to enable it.".to_string(),
                );
            }
            Some(match parse_email_request(&intent.raw_text) {
                Some(mail) => {
                    let recipient = mail.recipient.clone();
                    match ctx.mailer.send(mail).await {
                        Ok(()) => format!("Email sent successfully to {recipient}!"),
                        Err(_) => "Sorry, I couldn't send the email.".to_string(),
                    }
                }
                None => {
                    "Please include the address, subject, and message in one request.".to_string()
                }
            })
        }
        IntentKind::Note => match intent.entity("content") {
            Some(content) => {
                ctx.history.record(crate::core::Speaker::Note, content);
                Some("I've saved that note for you.".to_string())
            }
            None => Some("Please phrase it like 'note that the wifi password changed'.".to_string()),
        },
        _ => None,
    }
}

pub async fn text(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<TextRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    check_rate_limit(&state, &addr)?;

    let input = payload.text.trim();
    if input.is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "text is required"));
    }

    let ctx = state.dispatcher.context();
    let intent = state.dispatcher.classify(input);

    let response = match prompt_free_reply(&ctx, &intent).await {
        Some(reply) => {
            ctx.history.record_user(input);
            ctx.history.record_assistant(&reply);
            reply
        }
        None => state.dispatcher.respond(input).await,
    };

    Ok(Json(TextResponse {
        response,
        intent: intent.kind,
        confidence: intent.confidence,
    }))
}

pub async fn conversation(State(state): State<AppState>) -> Json<Vec<LogEntry>> {
    let ctx = state.dispatcher.context();
    Json(ctx.history.recent(CONVERSATION_LIMIT))
}

#[derive(Deserialize)]
pub struct ReminderRequest {
    pub text: String,
    pub offset_minutes: i64,
}

#[derive(Serialize)]
pub struct ReminderCreated {
    pub id: Uuid,
    pub due_at: DateTime<Utc>,
}

pub async fn create_reminder(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<ReminderRequest>,
) -> Result<(StatusCode, Json<ReminderCreated>), ApiError> {
    check_rate_limit(&state, &addr)?;

    let text = payload.text.trim();
    if text.is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "text is required"));
    }

    let ctx = state.dispatcher.context();
    let reminder = ctx
        .reminders
        .add_in_minutes(text, payload.offset_minutes)
        .map_err(|e| error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    info!("web client {addr} scheduled reminder {}", reminder.id);
    Ok((
        StatusCode::CREATED,
        Json(ReminderCreated {
            id: reminder.id,
            due_at: reminder.due_at,
        }),
    ))
}

pub async fn list_reminders(State(state): State<AppState>) -> Json<Vec<Reminder>> {
    let ctx = state.dispatcher.context();
    Json(ctx.reminders.pending())
}

#[derive(Serialize)]
pub struct SettingsResponse {
    pub assistant_name: String,
    pub wake_word: String,
    pub wake_mode_enabled: bool,
    pub weather_configured: bool,
    pub news_configured: bool,
    pub email_configured: bool,
}

pub async fn settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let ctx = state.dispatcher.context();
    Json(SettingsResponse {
        assistant_name: ctx.config.assistant_name.clone(),
        wake_word: ctx.config.wake_word.clone(),
        wake_mode_enabled: ctx.config.wake_mode_enabled,
        weather_configured: ctx.weather.is_configured(),
        news_configured: ctx.news.is_configured(),
        email_configured: ctx.config.sender_email.is_some(),
    })
}
