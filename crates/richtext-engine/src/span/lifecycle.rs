use crate::media::PlaybackEngine;

/// Identity of a displaying surface, used to pair attach/detach calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// The view a fragment is displayed on.
///
/// Implemented by the host UI. Surfaces call the [`ViewLifecycle`]
/// notifications of the spans they show, possibly from their own thread.
pub trait Surface {
    fn id(&self) -> SurfaceId;

    /// Creates a playback engine for a video span, or `None` when the
    /// surface cannot play media.
    fn create_player(&self) -> Option<Box<dyn PlaybackEngine>>;

    /// Asks the surface to redraw.
    fn invalidate(&self) {}
}

/// View-lifecycle notifications every span receives.
///
/// Attach and detach are paired per surface: a span is attached to at most
/// one surface at a time, and detaching a span that is not attached to the
/// given surface does nothing.
pub trait ViewLifecycle {
    /// The span was just applied to a displaying surface.
    fn on_spanned_set_to_view(&mut self, _surface: &dyn Surface) {}

    /// Returns `false` when the span could not attach (already attached
    /// elsewhere, or its resource failed to load).
    fn on_attached_to_view(&mut self, _surface: &dyn Surface) -> bool {
        true
    }

    fn on_detached_from_view(&mut self, _surface: &dyn Surface) {}
}
