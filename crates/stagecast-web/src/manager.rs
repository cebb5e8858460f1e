//! Public façade for the web display subsystem.
//!
//! `WebDisplayManager` composes the resolver, surface controller, load
//! lifecycle coordinator and zoom store, and owns the session state. All
//! state mutation happens in its dispatch loop, which consumes a single
//! channel fed by the host (show/hide), the browser engine (signals) and
//! internal timers (fade completions, zoom settle).

use std::path::{Path, PathBuf};

use tokio::sync::broadcast;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use stagecast_common::{DisplayEvent, DisplayEventBus, MediaItemId, MediaPhase, ScreenPosition};

use crate::address::ContentAddressResolver;
use crate::coordinator::LoadLifecycleCoordinator;
use crate::engine::{BrowserEngine, EngineSignal};
use crate::session::{SessionState, SessionToken};
use crate::surface::{DisplayRegion, FadeDirection, SurfaceController};
use crate::zoom::ZoomStore;

/// Everything that can mutate session state flows through this message
/// type, serializing mutations on the dispatch task.
#[derive(Debug)]
pub enum DisplayMsg {
    Show {
        path: PathBuf,
        item: MediaItemId,
        position: ScreenPosition,
    },
    Hide {
        path: PathBuf,
    },
    Engine(EngineSignal),
    ZoomSettled {
        token: SessionToken,
    },
    FadeFinished {
        token: SessionToken,
        direction: FadeDirection,
    },
}

/// Cheap cloneable handle for posting into the dispatch loop from other
/// tasks (engine callback threads, the host UI).
#[derive(Clone)]
pub struct WebDisplayHandle {
    tx: UnboundedSender<DisplayMsg>,
}

impl WebDisplayHandle {
    pub fn show_web(&self, path: impl Into<PathBuf>, item: MediaItemId, position: ScreenPosition) {
        self.post(DisplayMsg::Show {
            path: path.into(),
            item,
            position,
        });
    }

    pub fn hide_web(&self, path: impl Into<PathBuf>) {
        self.post(DisplayMsg::Hide { path: path.into() });
    }

    pub fn engine_signal(&self, signal: EngineSignal) {
        self.post(DisplayMsg::Engine(signal));
    }

    fn post(&self, msg: DisplayMsg) {
        if self.tx.send(msg).is_err() {
            warn!("display manager dispatch loop is gone, dropping message");
        }
    }
}

pub struct WebDisplayManager {
    resolver: ContentAddressResolver,
    coordinator: LoadLifecycleCoordinator,
    state: SessionState,
    bus: DisplayEventBus,
    tx: UnboundedSender<DisplayMsg>,
    rx: UnboundedReceiver<DisplayMsg>,
}

impl WebDisplayManager {
    pub fn new(
        engine: Box<dyn BrowserEngine>,
        region: Box<dyn DisplayRegion>,
        store: Box<dyn ZoomStore>,
        resolver: ContentAddressResolver,
        bus: DisplayEventBus,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let surface = SurfaceController::new(region);
        let coordinator =
            LoadLifecycleCoordinator::new(engine, surface, store, bus.clone(), tx.clone());
        Self {
            resolver,
            coordinator,
            state: SessionState::new(),
            bus,
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> WebDisplayHandle {
        WebDisplayHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DisplayEvent> {
        self.bus.subscribe()
    }

    /// Consume the dispatch channel until every sender (including the
    /// manager's own timer tasks) is gone.
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            self.dispatch(msg);
        }
    }

    fn dispatch(&mut self, msg: DisplayMsg) {
        match msg {
            DisplayMsg::Show {
                path,
                item,
                position,
            } => self.show_web(&path, item, position),
            DisplayMsg::Hide { path } => self.hide_web(&path),
            DisplayMsg::Engine(signal) => {
                self.coordinator.on_engine_signal(&mut self.state, signal)
            }
            DisplayMsg::ZoomSettled { token } => {
                self.coordinator.on_zoom_settled(&mut self.state, token)
            }
            DisplayMsg::FadeFinished { token, direction } => {
                self.coordinator
                    .on_fade_finished(&mut self.state, token, direction)
            }
        }
    }

    /// Start displaying web content. Returns immediately; the reveal
    /// completes asynchronously once the engine reports the load finished.
    ///
    /// An empty path is a silent no-op: no events, no state change.
    pub fn show_web(&mut self, path: &Path, item: MediaItemId, position: ScreenPosition) {
        if path.as_os_str().is_empty() {
            debug!("show_web called with empty path, ignoring");
            return;
        }

        self.state.begin_session(item.clone());
        info!(item = %item, path = %path.display(), "showing web content");

        self.coordinator.surface().set_screen_position(&position);
        self.coordinator.emit_media(item, MediaPhase::Starting);

        let address = match self.resolver.resolve(path) {
            Ok(address) => address,
            Err(e) => {
                warn!(error = %e, "could not resolve content address");
                return;
            }
        };
        self.state.current_address = Some(address.clone());
        self.coordinator.begin_navigation(&address);
    }

    /// Stop displaying web content: persist the current zoom, fade out,
    /// then hide the surface.
    ///
    /// The `path` argument is accepted but deliberately unused —
    /// persistence keys off the currently loaded address, not the
    /// argument.
    pub fn hide_web(&mut self, _path: &Path) {
        self.coordinator.begin_hide(&mut self.state);
    }

    /// Drain and dispatch everything already queued. Test-only stand-in
    /// for `run`.
    #[cfg(test)]
    fn pump(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.dispatch(msg);
        }
    }
}
