pub mod listeners;
pub mod local;
#[cfg(test)]
pub mod scripted;

pub use listeners::{ListenerId, Listeners};

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEventKind {
    TimeUpdate,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Current playback offset in seconds.
    TimeUpdate(f64),
    Ended,
}

impl MediaEvent {
    pub fn kind(&self) -> MediaEventKind {
        match self {
            MediaEvent::TimeUpdate(_) => MediaEventKind::TimeUpdate,
            MediaEvent::Ended => MediaEventKind::Ended,
        }
    }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("audio file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read audio source: {0}")]
    Open(#[from] std::io::Error),

    #[error("cannot fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unsupported or corrupt audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("no audio source configured")]
    NoSource,
}

/// One playable audio stream plus its notification hub.
///
/// Offsets and durations are seconds as `f64`; an unknown duration is `NaN`
/// until the backend has read the stream's metadata.
pub trait MediaResource {
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn paused(&self) -> bool;

    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64) -> Result<(), MediaError>;
    fn duration(&self) -> f64;

    fn subscribe(&mut self, kind: MediaEventKind, tx: Sender<MediaEvent>) -> ListenerId;
    fn unsubscribe(&mut self, id: ListenerId) -> bool;

    /// Gives the backend a chance to emit notifications that have come due.
    fn poll(&mut self) {}
}
