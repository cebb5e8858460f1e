//! Load lifecycle coordination — the load/fade state machine.
//!
//! Listens to browser-engine signals, suppresses duplicate "became
//! visible" transitions, restores the persisted zoom level before the
//! reveal fade, and emits high-level media-change notifications. All
//! handlers run on the dispatch task; signals and timer completions for a
//! superseded session are dropped by phase and token guards.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use stagecast_common::{DisplayEventBus, MediaClassification, MediaItemId, MediaPhase};

use crate::engine::{error_document, BrowserEngine, EngineSignal, ERR_ABORTED};
use crate::manager::DisplayMsg;
use crate::session::{LoadPhase, SessionState, SessionToken};
use crate::surface::{FadeDirection, SurfaceController};
use crate::zoom::ZoomStore;

/// Wait after applying a restored zoom level before fading in, so the
/// engine has time to visually apply the change. Without it the fade can
/// reveal an unzoomed frame.
pub const ZOOM_SETTLE: Duration = Duration::from_millis(500);

/// Zoom level used when no preference is recorded for an address.
pub const DEFAULT_ZOOM: f64 = 0.0;

pub struct LoadLifecycleCoordinator {
    engine: Box<dyn BrowserEngine>,
    surface: SurfaceController,
    store: Box<dyn ZoomStore>,
    bus: DisplayEventBus,
    tx: UnboundedSender<DisplayMsg>,
}

impl LoadLifecycleCoordinator {
    pub fn new(
        engine: Box<dyn BrowserEngine>,
        surface: SurfaceController,
        store: Box<dyn ZoomStore>,
        bus: DisplayEventBus,
        tx: UnboundedSender<DisplayMsg>,
    ) -> Self {
        Self {
            engine,
            surface,
            store,
            bus,
            tx,
        }
    }

    pub fn surface(&mut self) -> &mut SurfaceController {
        &mut self.surface
    }

    /// Reset the surface and hand the address to the engine. The reveal
    /// completes asynchronously through the signal handlers below.
    pub fn begin_navigation(&mut self, address: &str) {
        self.surface.reveal();
        self.engine.navigate(address);
    }

    pub fn on_engine_signal(&mut self, state: &mut SessionState, signal: EngineSignal) {
        match signal {
            EngineSignal::LoadingStateChanged { is_loading } => {
                self.on_loading_state_changed(state, is_loading)
            }
            EngineSignal::LoadError { code, url, text } => self.on_load_error(code, &url, &text),
            EngineSignal::StatusMessage { text, is_loading } => {
                // Loading-state messages take precedence over generic
                // status text.
                if !is_loading {
                    self.emit_progress(text);
                }
            }
            EngineSignal::FrameLoadStart { frame } => {
                self.emit_progress(format!("Loading frame {frame}..."));
            }
        }
    }

    fn on_loading_state_changed(&mut self, state: &mut SessionState, is_loading: bool) {
        if is_loading {
            if matches!(
                state.phase,
                LoadPhase::Idle | LoadPhase::Hiding | LoadPhase::Hidden
            ) {
                debug!("loading started with no active session, ignoring");
                return;
            }
            if state.phase == LoadPhase::Navigating {
                state.phase = LoadPhase::LoadInProgress;
            }
            self.emit_progress("Loading...");
            return;
        }

        if matches!(
            state.phase,
            LoadPhase::Idle | LoadPhase::Hiding | LoadPhase::Hidden
        ) {
            debug!("load completion with no active session, ignoring");
            return;
        }

        // Clear the loading indicator on every completion.
        self.emit_progress("");

        if state.revealed {
            debug!("already showing, ignoring sub-frame load completion");
            return;
        }
        state.revealed = true;
        state.phase = LoadPhase::LoadComplete;
        self.restore_zoom(state);
    }

    /// Look up the persisted zoom for the current address. On a hit the
    /// level is applied and the reveal waits out the settle delay; a miss
    /// or store failure resets to the default zoom and proceeds straight
    /// to the fade. Without the reset, a level restored in an earlier
    /// session would stay in effect and later be persisted under this
    /// session's address.
    fn restore_zoom(&mut self, state: &mut SessionState) {
        let address = match &state.current_address {
            Some(addr) => addr.clone(),
            None => {
                self.apply_zoom(DEFAULT_ZOOM);
                self.start_reveal_fade(state);
                return;
            }
        };

        match self.store.get_zoom(&address) {
            Ok(Some(level)) => {
                info!(address = %address, level, "restoring persisted zoom");
                self.apply_zoom(level);

                let tx = self.tx.clone();
                let token = state.token;
                tokio::spawn(async move {
                    tokio::time::sleep(ZOOM_SETTLE).await;
                    let _ = tx.send(DisplayMsg::ZoomSettled { token });
                });
            }
            Ok(None) => {
                debug!(address = %address, "no persisted zoom, using default");
                self.apply_zoom(DEFAULT_ZOOM);
                self.start_reveal_fade(state);
            }
            Err(e) => {
                warn!(address = %address, error = %e, "zoom lookup failed, using default");
                self.apply_zoom(DEFAULT_ZOOM);
                self.start_reveal_fade(state);
            }
        }
    }

    fn apply_zoom(&self, level: f64) {
        // Some engine builds drop a zoom assignment that lands while the
        // frame is still settling; apply it twice.
        self.engine.set_zoom_level(level);
        self.engine.set_zoom_level(level);
    }

    pub fn on_zoom_settled(&mut self, state: &mut SessionState, token: SessionToken) {
        if token != state.token || state.phase != LoadPhase::LoadComplete {
            debug!("stale zoom settle timer, ignoring");
            return;
        }
        self.start_reveal_fade(state);
    }

    fn start_reveal_fade(&mut self, state: &mut SessionState) {
        state.phase = LoadPhase::Revealed;
        self.surface.fade_in(&self.tx, state.token);
    }

    pub fn on_fade_finished(
        &mut self,
        state: &mut SessionState,
        token: SessionToken,
        direction: FadeDirection,
    ) {
        if token != state.token {
            debug!(?direction, "fade completion from a superseded session, ignoring");
            return;
        }
        match direction {
            FadeDirection::In if state.phase == LoadPhase::Revealed => {
                if let Some(item) = state.current_item.clone() {
                    self.emit_media(item, MediaPhase::Started);
                }
                self.surface.focus();
            }
            FadeDirection::Out if state.phase == LoadPhase::Hiding => {
                if let Some(item) = state.current_item.clone() {
                    self.emit_media(item, MediaPhase::Stopped);
                }
                self.surface.hide();
                state.phase = LoadPhase::Hidden;
            }
            _ => debug!(?direction, phase = ?state.phase, "fade completion out of phase, ignoring"),
        }
    }

    /// Drive the hide sequence: emit Stopping, persist the live zoom for
    /// the current address, then fade out. `Stopped` follows on the fade
    /// completion.
    pub fn begin_hide(&mut self, state: &mut SessionState) {
        if matches!(
            state.phase,
            LoadPhase::Idle | LoadPhase::Hiding | LoadPhase::Hidden
        ) {
            debug!(phase = ?state.phase, "hide requested with nothing to hide");
            return;
        }
        let Some(item) = state.current_item.clone() else {
            return;
        };

        self.emit_media(item, MediaPhase::Stopping);

        if let Some(address) = &state.current_address {
            let level = self.engine.zoom_level();
            if let Err(e) = self.store.put_zoom(address, level) {
                warn!(address = %address, error = %e, "failed to persist zoom");
            }
        }

        self.surface.cancel_active_transition();
        self.surface.fade_out(&self.tx, state.token);
        state.phase = LoadPhase::Hiding;
    }

    fn on_load_error(&mut self, code: i32, url: &str, text: &str) {
        if code == ERR_ABORTED {
            debug!(url = %url, "load aborted by user, suppressing");
            return;
        }
        warn!(url = %url, code, error = %text, "navigation failed, rendering error page");
        // The failed load still reports a finished transition through the
        // normal path; only the document content is replaced.
        self.engine.load_html(&error_document(url, text, code), url);
    }

    pub fn emit_media(&self, item: MediaItemId, phase: MediaPhase) {
        debug!(item = %item, ?phase, "media change");
        self.bus
            .publish_media(item, MediaClassification::Web, phase);
    }

    fn emit_progress(&self, description: impl Into<String>) {
        self.bus.publish_progress(description);
    }
}
