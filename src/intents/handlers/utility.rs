//! Notes and spoken arithmetic.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::Speaker;
use crate::intents::classifier::{Intent, IntentKind};
use crate::intents::context::AssistantContext;
use crate::intents::handler::IntentHandler;

/// Evaluate a spoken arithmetic expression. Word operators are accepted
/// ("12 plus 30", "6 times 7"); multiplication and division bind tighter
/// than addition and subtraction.
pub fn evaluate_expression(expression: &str) -> Option<f64> {
    let normalized = expression
        .to_lowercase()
        .replace("divided by", "/")
        .replace("multiplied by", "*")
        .replace("plus", "+")
        .replace("minus", "-")
        .replace("times", "*")
        .replace("over", "/");

    let mut tokens: Vec<String> = Vec::new();
    let mut number = String::new();
    for c in normalized.chars() {
        match c {
            '0'..='9' | '.' => number.push(c),
            '+' | '-' | '*' | '/' => {
                if !number.is_empty() {
                    tokens.push(std::mem::take(&mut number));
                }
                tokens.push(c.to_string());
            }
            ' ' => {
                if !number.is_empty() {
                    tokens.push(std::mem::take(&mut number));
                }
            }
            _ => return None,
        }
    }
    if !number.is_empty() {
        tokens.push(number);
    }

    // numbers and operators must alternate
    if tokens.is_empty() || tokens.len() % 2 == 0 {
        return None;
    }

    let mut values = vec![tokens[0].parse::<f64>().ok()?];
    let mut pending_ops: Vec<char> = Vec::new();
    for pair in tokens[1..].chunks(2) {
        let op = pair[0].chars().next()?;
        let value = pair[1].parse::<f64>().ok()?;
        match op {
            '*' => {
                let last = values.last_mut()?;
                *last *= value;
            }
            '/' => {
                if value == 0.0 {
                    return None;
                }
                let last = values.last_mut()?;
                *last /= value;
            }
            '+' | '-' => {
                pending_ops.push(op);
                values.push(value);
            }
            _ => return None,
        }
    }

    let mut result = values[0];
    for (op, value) in pending_ops.iter().zip(&values[1..]) {
        match op {
            '+' => result += value,
            _ => result -= value,
        }
    }
    Some(result)
}

fn format_result(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

pub struct UtilityHandler;

#[async_trait]
impl IntentHandler for UtilityHandler {
    fn intent_kinds(&self) -> &'static [IntentKind] {
        &[IntentKind::Note, IntentKind::Calculate]
    }

    fn name(&self) -> &'static str {
        "utility"
    }

    async fn handle(&self, ctx: Arc<AssistantContext>, intent: &Intent) -> Result<String> {
        let reply = match intent.kind {
            IntentKind::Note => {
                let content = match intent.entity("content") {
                    Some(content) => content.to_string(),
                    None => {
                        ctx.speech.say("What should I write down?").await?;
                        match ctx.input.listen().await? {
                            Some(text) if !text.trim().is_empty() => text,
                            _ => return Ok("I didn't catch that. Please try again.".to_string()),
                        }
                    }
                };
                ctx.history.record(Speaker::Note, &content);
                "I've saved that note for you.".to_string()
            }
            _ => {
                let expression = match intent.entity("expression") {
                    Some(e) => e,
                    None => return Ok("What would you like me to calculate?".to_string()),
                };
                match evaluate_expression(expression) {
                    Some(value) => format!("The result is {}", format_result(value)),
                    None => "I couldn't calculate that. Try something like '12 plus 30'."
                        .to_string(),
                }
            }
        };
        Ok(reply)
    }
}
