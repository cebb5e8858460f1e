//! Display surface visibility and fade transitions.
//!
//! The toolkit owns the actual opacity animation; the controller owns its
//! lifecycle: which transition is active, when its completion fires, and
//! the guarantee that a canceled transition never delivers a completion.
//! Completions are posted into the display dispatch channel tagged with
//! the session token, never invoked inline.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use stagecast_common::ScreenPosition;

use crate::manager::DisplayMsg;
use crate::session::SessionToken;

/// Base fade duration before scaling.
pub const BASE_FADE: Duration = Duration::from_millis(1000);

/// Fade-out: base scaled by 1.2.
pub const FADE_OUT: Duration = Duration::from_millis(1200);

/// Fade-in: base scaled by 1.2 twice. The reveal is deliberately slower
/// than the hide.
pub const FADE_IN: Duration = Duration::from_millis(1440);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// Toolkit seam for the rectangular display region.
///
/// `begin_opacity_animation` kicks off a toolkit-driven tween and returns
/// immediately; `cancel_animation` halts it wherever it is. Completion
/// timing is the controller's job.
pub trait DisplayRegion: Send {
    fn set_visible(&self, visible: bool);
    fn set_opacity(&self, opacity: f64);
    fn set_screen_position(&self, position: &ScreenPosition);
    fn focus(&self);
    fn begin_opacity_animation(&self, from: f64, to: f64, duration: Duration);
    fn cancel_animation(&self);
}

/// Owns visibility and opacity-transition behavior of the display region.
///
/// At most one transition is active at a time; starting a new one cancels
/// the old. Overlapping toolkit animations are undefined behavior in most
/// toolkits and are explicitly avoided here.
pub struct SurfaceController {
    region: Box<dyn DisplayRegion>,
    active: Option<JoinHandle<()>>,
}

impl SurfaceController {
    pub fn new(region: Box<dyn DisplayRegion>) -> Self {
        Self {
            region,
            active: None,
        }
    }

    /// Instant state reset used before navigation begins: no animation,
    /// fully transparent, but shown.
    pub fn reveal(&mut self) {
        self.cancel_active_transition();
        self.region.set_opacity(0.0);
        self.region.set_visible(true);
    }

    /// Animate opacity 0 -> 1 over [`FADE_IN`]. The completion is posted
    /// exactly once as [`DisplayMsg::FadeFinished`] when the animation
    /// runs to its natural end.
    pub fn fade_in(&mut self, tx: &UnboundedSender<DisplayMsg>, token: SessionToken) {
        self.start_fade(tx, token, FadeDirection::In, 0.0, 1.0, FADE_IN);
    }

    /// Animate opacity 1 -> 0 over [`FADE_OUT`]. The caller hides the
    /// surface after the completion arrives.
    pub fn fade_out(&mut self, tx: &UnboundedSender<DisplayMsg>, token: SessionToken) {
        self.start_fade(tx, token, FadeDirection::Out, 1.0, 0.0, FADE_OUT);
    }

    fn start_fade(
        &mut self,
        tx: &UnboundedSender<DisplayMsg>,
        token: SessionToken,
        direction: FadeDirection,
        from: f64,
        to: f64,
        duration: Duration,
    ) {
        self.cancel_active_transition();
        debug!(?direction, ?duration, "starting fade");
        self.region.begin_opacity_animation(from, to, duration);

        let tx = tx.clone();
        self.active = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = tx.send(DisplayMsg::FadeFinished { token, direction });
        }));
    }

    /// Halt any running transition without delivering its completion, and
    /// force opacity back to 0. Pending completions are for natural
    /// completion only.
    pub fn cancel_active_transition(&mut self) {
        if let Some(handle) = self.active.take() {
            if handle.is_finished() {
                return;
            }
            debug!("canceling in-flight transition");
            handle.abort();
            self.region.cancel_animation();
            self.region.set_opacity(0.0);
        }
    }

    pub fn set_screen_position(&self, position: &ScreenPosition) {
        self.region.set_screen_position(position);
    }

    pub fn hide(&self) {
        self.region.set_visible(false);
    }

    pub fn focus(&self) {
        self.region.focus();
    }
}
