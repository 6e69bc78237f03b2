//! # Media
//!
//! Playback plumbing behind [`VideoSpan`](crate::span::VideoSpan).
//!
//! The actual decoder is host-provided through [`PlaybackEngine`]. Engines
//! never call back into the player; the host forwards engine notifications
//! as [`PlaybackEvent`]s to [`MediaPlayer::handle_event`].
//!
//! ## Modules
//!
//! - **`player`**: [`MediaPlayer`] state machine (prepared/waiting, intent,
//!   surface presence, first-frame and completion listeners)

pub mod player;

pub use player::{MediaPlayer, MediaStatus, PlaybackIntent};

/// Errors reported by a [`PlaybackEngine`].
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("Invalid media source: {0}")]
    InvalidSource(String),
    #[error("Playback engine already released")]
    Released,
    #[error("Playback engine error: {0}")]
    Engine(String),
}

/// Notifications an engine delivers asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The loaded source is ready; dimensions are now known.
    Prepared,
    /// A previously requested `seek_to` finished.
    SeekComplete,
    /// Playback reached the end of the source.
    Completed,
}

/// A host multimedia engine.
///
/// `load` starts asynchronous preparation; readiness arrives later as
/// [`PlaybackEvent::Prepared`].
pub trait PlaybackEngine: Send {
    fn load(&mut self, uri: &str) -> Result<(), PlaybackError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek_to(&mut self, millis: u64);
    fn release(&mut self);
    fn is_playing(&self) -> bool;
    fn video_width(&self) -> u32;
    fn video_height(&self) -> u32;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::{PlaybackEngine, PlaybackError};

    /// Calls observed across every engine sharing the log.
    #[derive(Debug, Default)]
    pub(crate) struct EngineLog {
        pub created: usize,
        pub released: usize,
        pub loads: Vec<String>,
        pub plays: usize,
        pub pauses: usize,
        pub seeks: Vec<u64>,
    }

    pub(crate) struct FakeEngine {
        log: Arc<Mutex<EngineLog>>,
        pub fail_load: bool,
        playing: bool,
    }

    impl FakeEngine {
        pub(crate) fn new(log: Arc<Mutex<EngineLog>>) -> Self {
            log.lock().unwrap().created += 1;
            Self {
                log,
                fail_load: false,
                playing: false,
            }
        }
    }

    impl PlaybackEngine for FakeEngine {
        fn load(&mut self, uri: &str) -> Result<(), PlaybackError> {
            if self.fail_load {
                return Err(PlaybackError::InvalidSource(uri.to_string()));
            }
            self.log.lock().unwrap().loads.push(uri.to_string());
            Ok(())
        }

        fn play(&mut self) {
            self.playing = true;
            self.log.lock().unwrap().plays += 1;
        }

        fn pause(&mut self) {
            self.playing = false;
            self.log.lock().unwrap().pauses += 1;
        }

        fn seek_to(&mut self, millis: u64) {
            self.log.lock().unwrap().seeks.push(millis);
        }

        fn release(&mut self) {
            self.playing = false;
            self.log.lock().unwrap().released += 1;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }

        fn video_width(&self) -> u32 {
            640
        }

        fn video_height(&self) -> u32 {
            360
        }
    }
}
