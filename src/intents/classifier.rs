//! # Intent Classifier
//!
//! Regex-based classification of a single utterance into an [`Intent`].
//! Every pattern is tried against the lowercased text; the highest
//! confidence wins, with earlier patterns winning ties. Anything that
//! matches nothing becomes [`IntentKind::Unknown`] at rock-bottom
//! confidence so the dispatcher can still answer.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// Everything the assistant knows how to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Greet,
    Time,
    Date,
    Help,
    Open,
    Play,
    Email,
    Reminder,
    Search,
    Wiki,
    Weather,
    News,
    Note,
    Calculate,
    Exit,
    Unknown,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Greet => "greet",
            IntentKind::Time => "time",
            IntentKind::Date => "date",
            IntentKind::Help => "help",
            IntentKind::Open => "open",
            IntentKind::Play => "play",
            IntentKind::Email => "email",
            IntentKind::Reminder => "reminder",
            IntentKind::Search => "search",
            IntentKind::Wiki => "wiki",
            IntentKind::Weather => "weather",
            IntentKind::News => "news",
            IntentKind::Note => "note",
            IntentKind::Calculate => "calculate",
            IntentKind::Exit => "exit",
            IntentKind::Unknown => "unknown",
        }
    }
}

/// A classified utterance: the winning kind, how sure the classifier is,
/// and any entities the winning pattern captured.
#[derive(Debug, Clone)]
pub struct Intent {
    pub kind: IntentKind,
    pub confidence: f32,
    pub entities: HashMap<String, String>,
    pub raw_text: String,
}

impl Intent {
    pub fn entity(&self, name: &str) -> Option<&str> {
        self.entities.get(name).map(String::as_str)
    }
}

/// One pattern: regex, target kind, confidence, and which capture groups
/// become which entities.
struct Pattern {
    regex: Regex,
    kind: IntentKind,
    confidence: f32,
    entities: &'static [(&'static str, usize)],
}

pub struct IntentClassifier {
    patterns: Vec<Pattern>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    pub fn new() -> Self {
        let mut patterns = Vec::new();
        let mut add = |pattern: &str,
                       kind: IntentKind,
                       confidence: f32,
                       entities: &'static [(&'static str, usize)]| {
            patterns.push(Pattern {
                // Patterns are compile-time literals; a failure here is a
                // bug in this table, not user input.
                regex: Regex::new(pattern).unwrap_or_else(|e| {
                    panic!("invalid intent pattern {pattern:?}: {e}");
                }),
                kind,
                confidence,
                entities,
            });
        };

        add(
            r"\b(hello|hi|hey|good morning|good afternoon|good evening)\b",
            IntentKind::Greet,
            0.9,
            &[],
        );
        add(
            r"\bwhat(?:'s| is)? the time\b|\btell me the time\b",
            IntentKind::Time,
            0.95,
            &[],
        );
        add(r"\b(time|current time)\b", IntentKind::Time, 0.8, &[]);
        add(
            r"\bwhat(?:'s| is)? (?:today's |the )?date\b|\bwhat day is it\b",
            IntentKind::Date,
            0.95,
            &[],
        );
        add(r"\b(date|today)\b", IntentKind::Date, 0.85, &[]);
        add(
            r"\b(help|what can you do|commands)\b",
            IntentKind::Help,
            0.9,
            &[],
        );
        add(
            r"\b(?:open|launch|go to)\s+(.+)",
            IntentKind::Open,
            0.8,
            &[("target", 1)],
        );
        add(
            r"\bplay\s+(.+?)\s+on youtube\b",
            IntentKind::Play,
            0.9,
            &[("query", 1)],
        );
        add(r"\bplay\s+(.+)", IntentKind::Play, 0.7, &[("query", 1)]);
        add(
            r"\b(?:send|write|compose)\s+(?:an?\s+)?email\b",
            IntentKind::Email,
            0.9,
            &[],
        );
        add(r"\bemail\s+(.+)", IntentKind::Email, 0.8, &[]);
        add(
            r"\bremind me\b|\bset (?:a )?reminder\b",
            IntentKind::Reminder,
            0.9,
            &[],
        );
        add(
            r"\bsearch (?:for )?(.+)",
            IntentKind::Search,
            0.9,
            &[("query", 1)],
        );
        add(
            r"\b(?:tell me (?:more )?about|what (?:is|are)|who (?:is|are))\s+(.+)",
            IntentKind::Wiki,
            0.95,
            &[("topic", 1)],
        );
        // Outranks the "what is ..." encyclopedia pattern
        add(
            r"\bwhat(?:'s| is) the weather(?: like)?(?: (?:in|for)\s+(.+))?",
            IntentKind::Weather,
            0.97,
            &[("city", 1)],
        );
        add(
            r"\bweather (?:in|for)\s+(.+)",
            IntentKind::Weather,
            0.9,
            &[("city", 1)],
        );
        add(r"\b(weather|temperature|forecast)\b", IntentKind::Weather, 0.7, &[]);
        add(r"\b(news|headlines)\b", IntentKind::News, 0.9, &[]);
        add(
            r"\b(?:take a note|note that|write down|remember that)\s*(.*)",
            IntentKind::Note,
            0.85,
            &[("content", 1)],
        );
        add(r"\b(note|remember)\b", IntentKind::Note, 0.7, &[]);
        add(
            r"\b(?:calculate|compute|what is)\s+(.+)",
            IntentKind::Calculate,
            0.9,
            &[("expression", 1)],
        );
        add(
            r"\b(goodbye|bye|exit|quit|stop listening)\b",
            IntentKind::Exit,
            0.9,
            &[],
        );

        IntentClassifier { patterns }
    }

    /// Classify one utterance. Never fails; unmatched text comes back as
    /// [`IntentKind::Unknown`] with confidence 0.1.
    pub fn classify(&self, text: &str) -> Intent {
        let normalized = text.trim().to_lowercase();

        let mut best: Option<(&Pattern, regex::Captures)> = None;
        for pattern in &self.patterns {
            if let Some(captures) = pattern.regex.captures(&normalized) {
                let beats = best
                    .as_ref()
                    .map(|(b, _)| pattern.confidence > b.confidence)
                    .unwrap_or(true);
                if beats {
                    best = Some((pattern, captures));
                }
            }
        }

        match best {
            Some((pattern, captures)) => {
                let mut entities = HashMap::new();
                for (name, group) in pattern.entities {
                    if let Some(m) = captures.get(*group) {
                        let value = m.as_str().trim();
                        if !value.is_empty() {
                            entities.insert((*name).to_string(), value.to_string());
                        }
                    }
                }
                Intent {
                    kind: pattern.kind,
                    confidence: pattern.confidence,
                    entities,
                    raw_text: normalized,
                }
            }
            None => Intent {
                kind: IntentKind::Unknown,
                confidence: 0.1,
                entities: HashMap::new(),
                raw_text: normalized,
            },
        }
    }
}
