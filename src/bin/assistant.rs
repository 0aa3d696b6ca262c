use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;

use aria::features::reminders::{Notifier, ReminderMonitor};
use aria::intents::IntentKind;
use aria::web::{self, AppState};
use aria::{AssistantContext, Config, ConsolePrompt, ConsoleVoice, SpeechChannel};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = Config::from_env()?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level),
    )
    .init();

    info!(
        "🤖 Starting {} v{}",
        config.assistant_name,
        env!("CARGO_PKG_VERSION")
    );

    let speech = SpeechChannel::new(Box::new(ConsoleVoice::new(&config.assistant_name)));
    let ctx = Arc::new(AssistantContext::new(
        config,
        speech.clone(),
        Arc::new(ConsolePrompt::new()),
    ));

    // Background reminder delivery over the same store and speech channel
    let monitor = ReminderMonitor::new(ctx.reminders.clone(), Notifier::new(speech.clone()))
        .with_poll_interval(Duration::from_millis(ctx.config.reminder_poll_ms));
    monitor.start();
    info!("⏰ Reminder monitor running");

    let state = AppState::new(ctx.clone());
    let dispatcher = state.dispatcher.clone();
    let bind_addr = ctx.config.web_bind_addr.clone();
    info!("🌐 Web interface on http://{bind_addr}");
    tokio::spawn(async move {
        if let Err(e) = web::serve(state, &bind_addr).await {
            error!("web interface failed: {e:#}");
        }
    });

    speech
        .say(&format!(
            "Hello! I'm {}. Say 'help' to hear what I can do.",
            ctx.config.assistant_name
        ))
        .await?;

    loop {
        let heard = match ctx.input.listen().await {
            Ok(Some(text)) => text,
            Ok(None) => break,
            Err(e) => {
                error!("voice input failed: {e:#}");
                continue;
            }
        };
        if heard.trim().is_empty() {
            continue;
        }

        let heard = if ctx.config.wake_mode_enabled {
            let wake = ctx.config.wake_word.to_lowercase();
            match heard.strip_prefix(&wake) {
                Some(rest) if !rest.trim().is_empty() => rest.trim().to_string(),
                Some(_) => {
                    speech.say("Yes?").await?;
                    continue;
                }
                None => continue,
            }
        } else {
            heard
        };

        let wants_exit = dispatcher.classify(&heard).kind == IntentKind::Exit;
        let reply = dispatcher.respond(&heard).await;
        speech.say(&reply).await?;
        if wants_exit {
            break;
        }
    }

    info!("👋 Shutting down");
    Ok(())
}
