//! Web display lifecycle for embedded web content in a presentation window.
//!
//! Coordinates the show/hide lifecycle of a single embedded web surface
//! (web pages and locally rendered PDF documents):
//! - Content address resolution (`pdf://` scheme vs. shortcut resolution)
//! - Fade-in/fade-out transitions synchronized with load completion
//! - Per-address zoom preference persistence across sessions
//! - High-level media-change and progress notifications for the host UI
//!
//! The browser engine, GUI toolkit and persistence engine are external
//! collaborators behind the [`BrowserEngine`], [`DisplayRegion`] and
//! [`ZoomStore`] traits.

pub mod address;
pub mod coordinator;
pub mod engine;
pub mod manager;
pub mod session;
pub mod surface;
pub mod zoom;

pub use address::{ContentAddressResolver, FileUrlResolver, ShortcutResolver, PDF_SCHEME};
pub use coordinator::{LoadLifecycleCoordinator, DEFAULT_ZOOM, ZOOM_SETTLE};
pub use engine::{BrowserEngine, EngineSignal, ERR_ABORTED};
pub use manager::{DisplayMsg, WebDisplayHandle, WebDisplayManager};
pub use session::{LoadPhase, SessionState, SessionToken};
pub use surface::{DisplayRegion, FadeDirection, SurfaceController, FADE_IN, FADE_OUT};
pub use zoom::{JsonZoomStore, MemoryZoomStore, ZoomStore};
