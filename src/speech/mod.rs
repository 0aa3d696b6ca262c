//! # Speech I/O
//!
//! Collaborator traits for the voice channel plus console-backed
//! implementations. Real speech recognition and TTS synthesis live behind
//! these seams; the assistant core only ever talks to the traits.
//!
//! The single [`SpeechChannel`] instance is the one shared resource in the
//! process that requires mutual exclusion: only one utterance (foreground
//! response or reminder delivery) may be in progress at a time.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

/// Output side of the voice channel. May fail on device errors.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Input side of the voice channel.
///
/// `Ok(Some(text))` is a recognized utterance, `Ok(None)` means the input
/// source is exhausted (EOF / microphone gone) and the caller should stop.
#[async_trait]
pub trait VoiceInput: Send + Sync {
    async fn listen(&self) -> Result<Option<String>>;
}

/// Handle to the process-wide speech output, serialized by a mutex.
///
/// Every spoken utterance in the system goes through [`SpeechChannel::say`]
/// or [`SpeechChannel::say_paced`], so holding the internal lock is the
/// system-wide "someone is speaking" token.
#[derive(Clone)]
pub struct SpeechChannel {
    output: Arc<Mutex<Box<dyn SpeechOutput>>>,
}

impl SpeechChannel {
    pub fn new(output: Box<dyn SpeechOutput>) -> Self {
        SpeechChannel {
            output: Arc::new(Mutex::new(output)),
        }
    }

    /// Speak one utterance, waiting for any in-progress utterance first.
    pub async fn say(&self, text: &str) -> Result<()> {
        let output = self.output.lock().await;
        output.speak(text).await
    }

    /// Speak one utterance and keep the channel locked for `tail` afterwards.
    ///
    /// The pause is held under the lock so whatever speaks next cannot
    /// truncate the end of this utterance. The lock is released even when
    /// the device fails; the error is returned to the caller.
    pub async fn say_paced(&self, text: &str, tail: Duration) -> Result<()> {
        let output = self.output.lock().await;
        let result = output.speak(text).await;
        debug!("holding speech channel for {}ms tail pause", tail.as_millis());
        tokio::time::sleep(tail).await;
        result
    }
}

/// Console-backed speech output: prints `Name: text`.
pub struct ConsoleVoice {
    name: String,
}

impl ConsoleVoice {
    pub fn new(name: &str) -> Self {
        ConsoleVoice {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl SpeechOutput for ConsoleVoice {
    async fn speak(&self, text: &str) -> Result<()> {
        println!("{}: {}", self.name, text);
        Ok(())
    }
}

/// Console-backed input: reads one line from stdin per listen.
///
/// This is the original text-fallback mode; a microphone implementation
/// would satisfy the same trait.
pub struct ConsolePrompt {
    reader: Mutex<BufReader<tokio::io::Stdin>>,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        ConsolePrompt {
            reader: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceInput for ConsolePrompt {
    async fn listen(&self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.reader.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }
}
