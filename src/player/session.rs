// src/player/session.rs
//
// Playback session state machine.
//
// One session per open player overlay. The view layer owns the actual
// media element or provider iframe and reports its lifecycle back here;
// the session decides what loading feedback means per strategy:
//
// - YouTube hands full control to the provider iframe, so the session is
//   Ready immediately; there is no readiness signal to wait for.
// - Direct files report real media events (can-play, stall, error).
// - Drive/Archive iframes race their load event against a timeout. A load
//   before the timer is success, unconditionally; no timing heuristics
//   beyond that. A timer that elapses first degrades the session: the
//   spinner is dismissed and the user is left with whatever the provider
//   rendered.
//
// Cancellation discipline: the timer is aborted on close and on re-open,
// and an epoch guard keeps a stale callback from ever touching a newer
// session.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::events::{EventBus, PlaybackClosed, PlaybackDegraded, PlaybackOpened, PlaybackReady};
use crate::player::resolver::{SourceResolver, VideoSource};

const PROVIDER_LOAD_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Loading,
    Ready,
    /// Loading feedback was dismissed without confirmed success; left to
    /// the user's judgment. Not terminal; closing re-enters Idle.
    Degraded,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a Drive/Archive iframe may load before the session
    /// degrades.
    pub provider_load_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            provider_load_timeout: Duration::from_secs(PROVIDER_LOAD_TIMEOUT_SECS),
        }
    }
}

struct SessionInner {
    state: PlaybackState,
    /// Bumped on every open/close; the timer callback checks it before
    /// acting so it can never affect a session other than the one that
    /// scheduled it.
    epoch: u64,
    source: Option<VideoSource>,
    title: Option<String>,
}

pub struct PlaybackSession {
    resolver: SourceResolver,
    event_bus: Arc<EventBus>,
    config: SessionConfig,
    inner: Arc<Mutex<SessionInner>>,
    timer_handle: Mutex<Option<JoinHandle<()>>>,
}

impl PlaybackSession {
    /// Must be created (and opened) inside a Tokio runtime; the provider
    /// timer is a spawned task.
    pub fn new(event_bus: Arc<EventBus>, config: SessionConfig) -> Self {
        Self {
            resolver: SourceResolver::new(),
            event_bus,
            config,
            inner: Arc::new(Mutex::new(SessionInner {
                state: PlaybackState::Idle,
                epoch: 0,
                source: None,
                title: None,
            })),
            timer_handle: Mutex::new(None),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.inner.lock().unwrap().state
    }

    pub fn current_source(&self) -> Option<VideoSource> {
        self.inner.lock().unwrap().source.clone()
    }

    pub fn title(&self) -> Option<String> {
        self.inner.lock().unwrap().title.clone()
    }

    /// Present a video to the session. An already-open session resets:
    /// pending timers are cancelled and the machine restarts from the new
    /// classification.
    pub fn open(&self, title: &str, url: &str) {
        self.cancel_timer();

        let source = self.resolver.classify(url);
        let strategy = source.strategy();
        let (epoch, start_timer) = {
            let mut inner = self.inner.lock().unwrap();
            inner.epoch += 1;
            inner.title = Some(title.to_string());
            inner.state = match source {
                // The embed is handed full control; no visibility into its
                // readiness, so nothing to wait for.
                VideoSource::YouTube { .. } => PlaybackState::Ready,
                _ => PlaybackState::Loading,
            };
            let start_timer = source.uses_provider_iframe();
            inner.source = Some(source);
            (inner.epoch, start_timer)
        };

        self.event_bus
            .emit(PlaybackOpened::new(title.to_string(), strategy.to_string()));
        if self.state() == PlaybackState::Ready {
            self.event_bus.emit(PlaybackReady::new(strategy.to_string()));
        }

        if start_timer {
            self.spawn_provider_timer(epoch, strategy);
        }
    }

    /// The provider iframe fired its load event. Before the timer elapses
    /// this is success, unconditionally.
    pub fn iframe_loaded(&self) {
        let strategy = {
            let mut inner = self.inner.lock().unwrap();
            let loading_iframe = inner.state == PlaybackState::Loading
                && inner
                    .source
                    .as_ref()
                    .map(|s| s.uses_provider_iframe())
                    .unwrap_or(false);
            if !loading_iframe {
                return;
            }
            inner.state = PlaybackState::Ready;
            inner.source.as_ref().map(|s| s.strategy()).unwrap_or("")
        };
        self.cancel_timer();
        self.event_bus.emit(PlaybackReady::new(strategy.to_string()));
    }

    /// The direct media element started loading or stalled into a
    /// re-buffer.
    pub fn media_loading(&self) {
        let mut inner = self.inner.lock().unwrap();
        if matches!(inner.source, Some(VideoSource::Direct { .. }))
            && matches!(inner.state, PlaybackState::Loading | PlaybackState::Ready)
        {
            inner.state = PlaybackState::Loading;
        }
    }

    /// The direct media element reported it can play.
    pub fn media_can_play(&self) {
        let became_ready = {
            let mut inner = self.inner.lock().unwrap();
            if matches!(inner.source, Some(VideoSource::Direct { .. }))
                && inner.state == PlaybackState::Loading
            {
                inner.state = PlaybackState::Ready;
                true
            } else {
                false
            }
        };
        if became_ready {
            self.event_bus.emit(PlaybackReady::new("direct".to_string()));
        }
    }

    /// The direct media element errored. No automatic retry: the error is
    /// logged and the loading indicator dismissed so the user is not
    /// blocked behind a spinner.
    pub fn media_error(&self, detail: &str) {
        let dismissed = {
            let mut inner = self.inner.lock().unwrap();
            if matches!(inner.source, Some(VideoSource::Direct { .. }))
                && inner.state == PlaybackState::Loading
            {
                inner.state = PlaybackState::Ready;
                true
            } else {
                false
            }
        };
        log::error!("Media element error during playback: {}", detail);
        if dismissed {
            self.event_bus.emit(PlaybackReady::new("direct".to_string()));
        }
    }

    /// User dismissal: back to Idle from any state, pending timer
    /// cancelled.
    pub fn close(&self) {
        self.cancel_timer();
        {
            let mut inner = self.inner.lock().unwrap();
            inner.epoch += 1;
            inner.state = PlaybackState::Idle;
            inner.source = None;
            inner.title = None;
        }
        self.event_bus.emit(PlaybackClosed::new());
    }

    fn spawn_provider_timer(&self, epoch: u64, strategy: &'static str) {
        let inner = Arc::clone(&self.inner);
        let event_bus = Arc::clone(&self.event_bus);
        let timeout = self.config.provider_load_timeout;

        let task = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;

            let degraded = {
                let mut guard = inner.lock().unwrap();
                if guard.epoch == epoch && guard.state == PlaybackState::Loading {
                    guard.state = PlaybackState::Degraded;
                    true
                } else {
                    false
                }
            };

            if degraded {
                log::warn!(
                    "{} embed produced no load event within {:?}; dismissing loading feedback",
                    strategy,
                    timeout
                );
                event_bus.emit(PlaybackDegraded::new(strategy.to_string()));
            }
        });

        let mut handle = self.timer_handle.lock().unwrap();
        *handle = Some(task);
    }

    fn cancel_timer(&self) {
        let mut handle = self.timer_handle.lock().unwrap();
        if let Some(task) = handle.take() {
            task.abort();
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
