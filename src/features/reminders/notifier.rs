//! # Reminder Notifier
//!
//! Delivers due reminders through the shared speech channel. Delivery is
//! serialized with every other utterance in the process: the channel lock
//! is held across the announcement and a short tail pause so back-to-back
//! reminders (or a foreground response) never talk over each other.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use log::info;
use std::time::Duration;

use crate::features::reminders::store::Reminder;
use crate::speech::SpeechChannel;

/// Pause held on the speech channel after each delivery, so the tail of an
/// announcement is not clipped by whatever speaks next.
const DELIVERY_TAIL_PAUSE: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct Notifier {
    speech: SpeechChannel,
}

impl Notifier {
    pub fn new(speech: SpeechChannel) -> Self {
        Notifier { speech }
    }

    /// Announce one due reminder.
    ///
    /// Device failures bubble up to the caller for logging; the reminder is
    /// consumed either way - there is no redelivery.
    pub async fn deliver(&self, reminder: &Reminder) -> Result<()> {
        let due_display = reminder.due_at.format("%H:%M:%S");
        info!(
            "Firing reminder {} (due {}): {}",
            reminder.id, due_display, reminder.text
        );

        self.speech
            .say_paced(&format!("Reminder: {}", reminder.text), DELIVERY_TAIL_PAUSE)
            .await?;

        info!("Delivered reminder {}", reminder.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::testing::{FlakyVoice, RecordingVoice};
    use chrono::Utc;
    use uuid::Uuid;

    fn reminder(text: &str) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            due_at: Utc::now(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_deliver_announces_reminder() {
        let voice = RecordingVoice::new();
        let notifier = Notifier::new(SpeechChannel::new(Box::new(voice.clone())));

        notifier.deliver(&reminder("water the plants")).await.unwrap();

        assert_eq!(voice.spoken(), vec!["Reminder: water the plants".to_string()]);
    }

    #[tokio::test]
    async fn test_deliver_surfaces_device_failure() {
        let (voice, recorded) = FlakyVoice::new(1);
        let notifier = Notifier::new(SpeechChannel::new(Box::new(voice)));

        assert!(notifier.deliver(&reminder("x")).await.is_err());
        assert!(recorded.spoken().is_empty());

        // Channel is released after the failure
        notifier.deliver(&reminder("y")).await.unwrap();
        assert_eq!(recorded.spoken(), vec!["Reminder: y".to_string()]);
    }
}
