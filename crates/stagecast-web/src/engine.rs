//! Browser engine seam.
//!
//! The embedded rendering engine is an external collaborator; this module
//! defines the commands the coordinator issues to it and the signals it
//! reports back. Signals are posted into the display dispatch channel so
//! they reach session state on the UI-bound task, regardless of which
//! engine thread produced them.

use serde::{Deserialize, Serialize};

/// Error code engines report for a user-initiated abort (stopping a load,
/// navigating away). Matches the CEF/Chromium `ERR_ABORTED` value.
pub const ERR_ABORTED: i32 = -3;

/// Commands the coordinator issues to the embedded browser engine.
///
/// Implementations are expected to be cheap to call from the UI task;
/// `navigate` and `load_html` complete asynchronously and report back
/// through [`EngineSignal`]s.
pub trait BrowserEngine: Send {
    fn navigate(&self, address: &str);
    fn zoom_level(&self) -> f64;
    fn set_zoom_level(&self, level: f64);
    fn load_html(&self, body: &str, base_url: &str);
}

/// Asynchronous reports from the browser engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EngineSignal {
    /// The engine started or finished loading the current navigation.
    LoadingStateChanged { is_loading: bool },
    /// A navigation failed. `code` follows engine conventions
    /// (negative, `ERR_ABORTED` for user-initiated aborts).
    LoadError { code: i32, url: String, text: String },
    /// Generic status text (hover targets, connection state).
    StatusMessage { text: String, is_loading: bool },
    /// A frame began loading.
    FrameLoadStart { frame: String },
}

/// Minimal inline document rendered in place of a failed navigation.
pub(crate) fn error_document(url: &str, text: &str, code: i32) -> String {
    format!(
        "<html><head><title>Page load failed</title></head><body>\
         <h2>Failed to load {}</h2><p>{} (error {code})</p>\
         </body></html>",
        escape_html(url),
        escape_html(text),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
