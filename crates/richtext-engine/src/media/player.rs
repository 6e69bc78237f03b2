use std::fmt;

use super::{PlaybackEngine, PlaybackEvent};

/// Whether the current source has finished preparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Waiting,
    Prepared,
}

/// What the player should be doing once it can.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackIntent {
    Play,
    ShowFirstFrame,
    Stop,
}

type Listener = Box<dyn FnMut(&MediaPlayer) + Send>;

#[derive(Debug)]
struct MediaState {
    uri: String,
    status: MediaStatus,
    intent: PlaybackIntent,
    width: u32,
    height: u32,
}

impl MediaState {
    fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            status: MediaStatus::Waiting,
            intent: PlaybackIntent::ShowFirstFrame,
            width: 0,
            height: 0,
        }
    }
}

/// Drives a [`PlaybackEngine`] towards the requested [`PlaybackIntent`].
///
/// Playback only starts once the source is prepared and a surface is
/// present. Showing the first frame is done by starting playback, seeking
/// to zero and pausing again when the seek completes.
pub struct MediaPlayer {
    engine: Option<Box<dyn PlaybackEngine>>,
    media: MediaState,
    has_surface: bool,
    /// `Some(stop_after)` while a seek to the first frame is in flight.
    pending_seek: Option<bool>,
    on_first_frame: Option<Listener>,
    on_completion: Option<Listener>,
}

impl MediaPlayer {
    pub fn new(engine: Box<dyn PlaybackEngine>) -> Self {
        Self {
            engine: Some(engine),
            media: MediaState::new(""),
            has_surface: false,
            pending_seek: None,
            on_first_frame: None,
            on_completion: None,
        }
    }

    pub fn set_first_frame_listener(
        &mut self,
        listener: impl FnMut(&MediaPlayer) + Send + 'static,
    ) {
        self.on_first_frame = Some(Box::new(listener));
    }

    pub fn set_completion_listener(
        &mut self,
        listener: impl FnMut(&MediaPlayer) + Send + 'static,
    ) {
        self.on_completion = Some(Box::new(listener));
    }

    /// Loads `uri`.
    ///
    /// Returns `false` when `uri` is already the current source, when the
    /// player was released, or when the engine rejects the source. A rejected
    /// source leaves the player with an empty source.
    pub fn set_data(&mut self, uri: &str) -> bool {
        if self.media.uri == uri {
            return false;
        }
        let Some(engine) = self.engine.as_mut() else {
            log::debug!("set_data({uri}) on a released player");
            return false;
        };
        match engine.load(uri) {
            Ok(()) => {
                self.media = MediaState::new(uri);
                self.pending_seek = None;
                true
            }
            Err(e) => {
                log::debug!("failed to load {uri}: {e}");
                self.media = MediaState::new("");
                false
            }
        }
    }

    pub fn start(&mut self) {
        self.media.intent = PlaybackIntent::Play;
        self.sync();
    }

    pub fn pause(&mut self) {
        self.media.intent = PlaybackIntent::Stop;
        self.sync();
    }

    /// Releases the engine. Every later call is a no-op.
    pub fn release(&mut self) {
        self.media.status = MediaStatus::Waiting;
        self.media.intent = PlaybackIntent::Stop;
        self.pending_seek = None;
        if let Some(mut engine) = self.engine.take() {
            engine.release();
        }
    }

    pub fn attach_surface(&mut self) {
        self.has_surface = true;
        self.sync();
    }

    pub fn detach_surface(&mut self) {
        self.has_surface = false;
    }

    pub fn handle_event(&mut self, event: PlaybackEvent) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match event {
            PlaybackEvent::Prepared => {
                self.media.status = MediaStatus::Prepared;
                self.media.width = engine.video_width();
                self.media.height = engine.video_height();
                if self.media.intent != PlaybackIntent::Play {
                    self.media.intent = PlaybackIntent::ShowFirstFrame;
                }
                self.sync();
            }
            PlaybackEvent::SeekComplete => {
                let Some(stop_after) = self.pending_seek.take() else {
                    return;
                };
                if stop_after {
                    engine.pause();
                    self.media.intent = PlaybackIntent::Stop;
                }
                if let Some(mut listener) = self.on_first_frame.take() {
                    listener(self);
                    self.on_first_frame.get_or_insert(listener);
                }
            }
            PlaybackEvent::Completed => {
                if let Some(mut listener) = self.on_completion.take() {
                    listener(self);
                    self.on_completion.get_or_insert(listener);
                }
            }
        }
    }

    pub fn uri(&self) -> &str {
        &self.media.uri
    }

    pub fn status(&self) -> MediaStatus {
        self.media.status
    }

    pub fn intent(&self) -> PlaybackIntent {
        self.media.intent
    }

    pub fn is_prepared(&self) -> bool {
        self.media.status == MediaStatus::Prepared
    }

    pub fn has_surface(&self) -> bool {
        self.has_surface
    }

    pub fn is_released(&self) -> bool {
        self.engine.is_none()
    }

    pub fn is_playing(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.is_playing())
    }

    pub fn video_width(&self) -> u32 {
        self.media.width
    }

    pub fn video_height(&self) -> u32 {
        self.media.height
    }

    fn sync(&mut self) {
        let ready = self.is_prepared() && self.has_surface && !self.is_playing();
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match self.media.intent {
            PlaybackIntent::ShowFirstFrame | PlaybackIntent::Play if ready => {
                if self.pending_seek.is_some() {
                    return;
                }
                let stop_after = self.media.intent == PlaybackIntent::ShowFirstFrame;
                self.pending_seek = Some(stop_after);
                engine.play();
                engine.seek_to(0);
            }
            PlaybackIntent::Stop => engine.pause(),
            _ => {}
        }
    }
}

impl fmt::Debug for MediaPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaPlayer")
            .field("media", &self.media)
            .field("has_surface", &self.has_surface)
            .field("released", &self.engine.is_none())
            .finish()
    }
}

impl Drop for MediaPlayer {
    fn drop(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.release();
        }
    }
}
