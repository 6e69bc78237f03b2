use std::fmt;

use serde::{Deserialize, Serialize};

use crate::media::MediaPlayer;
use crate::span::lifecycle::{Surface, SurfaceId, ViewLifecycle};

/// An embedded video drawn over a placeholder unit.
///
/// Only the uri is part of the span's identity. The player is a runtime
/// resource acquired on attach and released on detach; it is never
/// serialized, cloned or compared.
#[derive(Serialize, Deserialize)]
pub struct VideoSpan {
    pub uri: String,
    #[serde(skip)]
    runtime: VideoRuntime,
}

#[derive(Default)]
struct VideoRuntime {
    attached_to: Option<SurfaceId>,
    player: Option<MediaPlayer>,
}

impl VideoSpan {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            runtime: VideoRuntime::default(),
        }
    }

    pub fn attached_to(&self) -> Option<SurfaceId> {
        self.runtime.attached_to
    }

    pub fn is_attached(&self) -> bool {
        self.runtime.attached_to.is_some()
    }

    /// The player while attached.
    pub fn player(&self) -> Option<&MediaPlayer> {
        self.runtime.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut MediaPlayer> {
        self.runtime.player.as_mut()
    }
}

impl Clone for VideoSpan {
    fn clone(&self) -> Self {
        Self::new(self.uri.clone())
    }
}

impl PartialEq for VideoSpan {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for VideoSpan {}

impl fmt::Debug for VideoSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoSpan")
            .field("uri", &self.uri)
            .field("attached_to", &self.runtime.attached_to)
            .finish()
    }
}

impl ViewLifecycle for VideoSpan {
    fn on_spanned_set_to_view(&mut self, surface: &dyn Surface) {
        log::trace!("video {} set to surface {:?}", self.uri, surface.id());
    }

    fn on_attached_to_view(&mut self, surface: &dyn Surface) -> bool {
        if let Some(current) = self.runtime.attached_to {
            log::warn!(
                "video {} already attached to {:?}, ignoring attach to {:?}",
                self.uri,
                current,
                surface.id()
            );
            return false;
        }

        let Some(engine) = surface.create_player() else {
            log::debug!("surface {:?} cannot play video", surface.id());
            return false;
        };

        let mut player = MediaPlayer::new(engine);
        if !player.set_data(&self.uri) {
            player.release();
            return false;
        }
        player.attach_surface();

        self.runtime.player = Some(player);
        self.runtime.attached_to = Some(surface.id());
        surface.invalidate();
        true
    }

    fn on_detached_from_view(&mut self, surface: &dyn Surface) {
        if self.runtime.attached_to != Some(surface.id()) {
            return;
        }
        if let Some(mut player) = self.runtime.player.take() {
            player.detach_surface();
            player.release();
        }
        self.runtime.attached_to = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::media::testing::{EngineLog, FakeEngine};
    use crate::media::PlaybackEngine;

    struct TestSurface {
        id: u64,
        log: Arc<Mutex<EngineLog>>,
        fail_load: bool,
        can_play: bool,
    }

    impl TestSurface {
        fn new(id: u64) -> Self {
            Self {
                id,
                log: Arc::default(),
                fail_load: false,
                can_play: true,
            }
        }
    }

    impl Surface for TestSurface {
        fn id(&self) -> SurfaceId {
            SurfaceId(self.id)
        }

        fn create_player(&self) -> Option<Box<dyn PlaybackEngine>> {
            if !self.can_play {
                return None;
            }
            let mut engine = FakeEngine::new(self.log.clone());
            engine.fail_load = self.fail_load;
            Some(Box::new(engine))
        }
    }

    #[test]
    fn attach_acquires_and_detach_releases() {
        let surface = TestSurface::new(1);
        let mut span = VideoSpan::new("http://x/v.mp4");

        assert!(span.on_attached_to_view(&surface));
        assert_eq!(span.attached_to(), Some(SurfaceId(1)));
        assert!(span.player().is_some());

        span.on_detached_from_view(&surface);
        assert!(!span.is_attached());
        assert!(span.player().is_none());

        let log = surface.log.lock().unwrap();
        assert_eq!(log.created, 1);
        assert_eq!(log.released, 1);
    }

    #[test]
    fn second_attach_is_rejected_without_acquiring() {
        let first = TestSurface::new(1);
        let second = TestSurface::new(2);
        let mut span = VideoSpan::new("http://x/v.mp4");

        assert!(span.on_attached_to_view(&first));
        assert!(!span.on_attached_to_view(&second));
        assert!(!span.on_attached_to_view(&first));

        assert_eq!(first.log.lock().unwrap().created, 1);
        assert_eq!(second.log.lock().unwrap().created, 0);
        assert_eq!(span.attached_to(), Some(SurfaceId(1)));
    }

    #[test]
    fn detach_without_attach_is_noop() {
        let surface = TestSurface::new(1);
        let mut span = VideoSpan::new("http://x/v.mp4");

        span.on_detached_from_view(&surface);
        span.on_detached_from_view(&surface);

        assert!(!span.is_attached());
        assert_eq!(surface.log.lock().unwrap().released, 0);
    }

    #[test]
    fn detach_from_other_surface_is_noop() {
        let first = TestSurface::new(1);
        let other = TestSurface::new(2);
        let mut span = VideoSpan::new("http://x/v.mp4");

        assert!(span.on_attached_to_view(&first));
        span.on_detached_from_view(&other);

        assert_eq!(span.attached_to(), Some(SurfaceId(1)));
        assert_eq!(first.log.lock().unwrap().released, 0);
    }

    #[test]
    fn reattach_after_detach_acquires_again() {
        let surface = TestSurface::new(1);
        let mut span = VideoSpan::new("http://x/v.mp4");

        for _ in 0..3 {
            assert!(span.on_attached_to_view(&surface));
            span.on_detached_from_view(&surface);
        }

        let log = surface.log.lock().unwrap();
        assert_eq!(log.created, 3);
        assert_eq!(log.released, 3);
    }

    #[test]
    fn failed_load_leaves_span_idle() {
        let mut surface = TestSurface::new(1);
        surface.fail_load = true;
        let mut span = VideoSpan::new("http://x/broken.mp4");

        assert!(!span.on_attached_to_view(&surface));
        assert!(!span.is_attached());
        assert!(span.player().is_none());

        let log = surface.log.lock().unwrap();
        assert_eq!(log.created, log.released);
    }

    #[test]
    fn surface_without_playback_rejects_attach() {
        let mut surface = TestSurface::new(1);
        surface.can_play = false;
        let mut span = VideoSpan::new("http://x/v.mp4");

        assert!(!span.on_attached_to_view(&surface));
        assert!(!span.is_attached());
    }

    #[test]
    fn clone_and_eq_ignore_runtime() {
        let surface = TestSurface::new(1);
        let mut span = VideoSpan::new("http://x/v.mp4");
        assert!(span.on_attached_to_view(&surface));

        let copy = span.clone();
        assert_eq!(copy, span);
        assert!(!copy.is_attached());
    }
}
