use std::sync::{Arc, Mutex};

use richtext_engine::media::{PlaybackEngine, PlaybackError, PlaybackEvent};
use richtext_engine::span::{Surface, SurfaceId, ViewLifecycle};
use richtext_engine::{DefaultStyle, Fragment, HandlerRegistry, RichDocument, Span, compile_markup};
use rstest::rstest;

#[derive(Default)]
struct Resources {
    acquired: usize,
    released: usize,
}

impl Resources {
    fn live(&self) -> usize {
        self.acquired - self.released
    }
}

struct Engine {
    resources: Arc<Mutex<Resources>>,
    playing: bool,
}

impl PlaybackEngine for Engine {
    fn load(&mut self, uri: &str) -> Result<(), PlaybackError> {
        if uri.contains("broken") {
            return Err(PlaybackError::InvalidSource(uri.to_string()));
        }
        Ok(())
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek_to(&mut self, _millis: u64) {}

    fn release(&mut self) {
        self.resources.lock().unwrap().released += 1;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn video_width(&self) -> u32 {
        320
    }

    fn video_height(&self) -> u32 {
        240
    }
}

struct Screen {
    id: u64,
    resources: Arc<Mutex<Resources>>,
}

impl Screen {
    fn new(id: u64) -> Self {
        Self {
            id,
            resources: Arc::default(),
        }
    }
}

impl Surface for Screen {
    fn id(&self) -> SurfaceId {
        SurfaceId(self.id)
    }

    fn create_player(&self) -> Option<Box<dyn PlaybackEngine>> {
        self.resources.lock().unwrap().acquired += 1;
        Some(Box::new(Engine {
            resources: self.resources.clone(),
            playing: false,
        }))
    }
}

fn compiled(source: &str) -> RichDocument {
    compile_markup(
        source,
        Arc::new(DefaultStyle::default()),
        Arc::new(HandlerRegistry::standard()),
    )
}

fn video_fragment(source: &str) -> Fragment {
    compiled(source).into_fragments().remove(0)
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Attach,
    Detach,
}

#[rstest]
#[case::paired(&[Step::Attach, Step::Detach])]
#[case::double_attach(&[Step::Attach, Step::Attach, Step::Detach])]
#[case::detach_first(&[Step::Detach, Step::Attach, Step::Detach, Step::Detach])]
#[case::cycles(&[Step::Attach, Step::Detach, Step::Attach, Step::Detach, Step::Attach])]
fn never_holds_two_players(#[case] steps: &[Step]) {
    let screen = Screen::new(1);
    let mut fragment = video_fragment(r#"<video src="http://x/v.mp4"></video>"#);

    let mut attached = false;
    for step in steps {
        match step {
            Step::Attach => {
                let refused = fragment.attach_to(&screen);
                assert_eq!(refused, usize::from(attached));
                attached = true;
            }
            Step::Detach => {
                fragment.detach_from(&screen);
                attached = false;
            }
        }
        let resources = screen.resources.lock().unwrap();
        assert!(resources.live() <= 1);
        assert_eq!(resources.live(), usize::from(attached));
    }
}

#[test]
fn other_surface_cannot_steal_or_detach() {
    let first = Screen::new(1);
    let second = Screen::new(2);
    let mut fragment = video_fragment(r#"<video src="http://x/v.mp4"></video>"#);

    assert_eq!(fragment.attach_to(&first), 0);
    assert_eq!(fragment.attach_to(&second), 1);
    fragment.detach_from(&second);

    assert_eq!(first.resources.lock().unwrap().live(), 1);
    assert_eq!(second.resources.lock().unwrap().acquired, 0);

    fragment.detach_from(&first);
    assert_eq!(first.resources.lock().unwrap().live(), 0);
}

#[test]
fn broken_source_stays_idle() {
    let screen = Screen::new(1);
    let mut fragment = video_fragment(r#"<iframe src="http://x/broken"></iframe>"#);

    assert_eq!(fragment.attach_to(&screen), 1);
    let resources = screen.resources.lock().unwrap();
    assert_eq!(resources.acquired, 1);
    assert_eq!(resources.live(), 0);
}

#[test]
fn attached_player_follows_engine_events() {
    let screen = Screen::new(1);
    let mut fragment = video_fragment(r#"<video src="http://x/v.mp4"></video>"#);
    fragment.attach_to(&screen);

    let Span::Video(video) = &mut fragment.annotations[0].span else {
        panic!("expected a video span");
    };
    let player = video.player_mut().unwrap();
    player.handle_event(PlaybackEvent::Prepared);
    assert_eq!((player.video_width(), player.video_height()), (320, 240));
    player.handle_event(PlaybackEvent::SeekComplete);
    assert!(!player.is_playing());

    player.start();
    assert!(player.is_playing());
}

#[test]
fn text_spans_accept_any_surface() {
    let mut doc = compiled("<b>bold</b> <u>under</u>");
    let screen = Screen::new(1);
    for fragment in doc.fragments_mut() {
        assert_eq!(fragment.attach_to(&screen), 0);
        for annotation in &mut fragment.annotations {
            assert!(annotation.span.on_attached_to_view(&screen));
        }
        fragment.detach_from(&screen);
    }
    assert_eq!(screen.resources.lock().unwrap().acquired, 0);
}

#[test]
fn spans_can_move_between_threads() {
    let mut fragment = video_fragment(r#"<video src="http://x/v.mp4"></video>"#);
    let handle = std::thread::spawn(move || {
        let screen = Screen::new(9);
        let refused = fragment.attach_to(&screen);
        fragment.detach_from(&screen);
        (refused, screen.resources.lock().unwrap().live())
    });
    assert_eq!(handle.join().unwrap(), (0, 0));
}
