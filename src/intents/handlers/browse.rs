//! Open websites, play YouTube videos, and run web searches.
//!
//! URL resolution is pure so it can be tested; the actual browser launch
//! goes through the platform opener and is fire-and-forget.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use tokio::process::Command;

use crate::intents::classifier::{Intent, IntentKind};
use crate::intents::context::AssistantContext;
use crate::intents::handler::IntentHandler;

/// Sites the assistant knows by name.
const SITES: &[(&str, &str)] = &[
    ("youtube", "https://www.youtube.com"),
    ("google", "https://www.google.com"),
    ("gmail", "https://mail.google.com"),
    ("github", "https://github.com"),
    ("wikipedia", "https://www.wikipedia.org"),
    ("reddit", "https://www.reddit.com"),
    ("twitter", "https://twitter.com"),
    ("maps", "https://maps.google.com"),
];

/// Turn a spoken target into a URL. Known site names map directly,
/// dotted hosts become https URLs, anything else becomes a web search.
pub fn resolve_open_target(target: &str) -> String {
    let target = target.trim().to_lowercase();

    if let Some((_, url)) = SITES.iter().find(|(name, _)| *name == target) {
        return (*url).to_string();
    }
    if target.contains('.') && !target.contains(' ') {
        if target.starts_with("http://") || target.starts_with("https://") {
            return target;
        }
        return format!("https://{target}");
    }
    search_url(&target)
}

pub fn search_url(query: &str) -> String {
    format!(
        "https://www.google.com/search?q={}",
        urlencode(query.trim())
    )
}

pub fn youtube_search_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencode(query.trim())
    )
}

/// Minimal percent-encoding for query strings.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Launch the platform browser on `url`. Failures are logged, never
/// surfaced to the user.
fn open_in_browser(url: &str) {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", url]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    match command.spawn() {
        Ok(_) => info!("opening {url}"),
        Err(e) => warn!("could not open browser for {url}: {e}"),
    }
}

pub struct BrowseHandler;

#[async_trait]
impl IntentHandler for BrowseHandler {
    fn intent_kinds(&self) -> &'static [IntentKind] {
        &[IntentKind::Open, IntentKind::Play, IntentKind::Search]
    }

    fn name(&self) -> &'static str {
        "browse"
    }

    async fn handle(&self, _ctx: Arc<AssistantContext>, intent: &Intent) -> Result<String> {
        let reply = match intent.kind {
            IntentKind::Open => {
                let target = match intent.entity("target") {
                    Some(t) => t,
                    None => return Ok("What would you like me to open?".to_string()),
                };
                open_in_browser(&resolve_open_target(target));
                format!("Opening {target}")
            }
            IntentKind::Play => {
                let query = match intent.entity("query") {
                    Some(q) => q,
                    None => return Ok("What would you like me to play?".to_string()),
                };
                open_in_browser(&youtube_search_url(query));
                format!("Searching YouTube for {query}")
            }
            _ => {
                let query = match intent.entity("query") {
                    Some(q) => q,
                    None => return Ok("What would you like me to search for?".to_string()),
                };
                open_in_browser(&search_url(query));
                format!("Searching for {query}")
            }
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_site_name() {
        assert_eq!(resolve_open_target("youtube"), "https://www.youtube.com");
        assert_eq!(resolve_open_target("GitHub"), "https://github.com");
    }

    #[test]
    fn test_dotted_host_gets_https() {
        assert_eq!(resolve_open_target("example.com"), "https://example.com");
        assert_eq!(
            resolve_open_target("https://example.com/x"),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_free_text_becomes_search() {
        assert_eq!(
            resolve_open_target("cute cat pictures"),
            "https://www.google.com/search?q=cute+cat+pictures"
        );
    }

    #[test]
    fn test_urlencode_reserved_characters() {
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn test_youtube_search_url() {
        assert_eq!(
            youtube_search_url("lofi beats"),
            "https://www.youtube.com/results?search_query=lofi+beats"
        );
    }
}
