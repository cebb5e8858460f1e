pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ResolveError, StoreError, WebDisplayError};
pub use events::{
    DisplayEvent, DisplayEventBus, MediaChangeEvent, MediaClassification, MediaPhase,
    ProgressEvent,
};
pub use id::MediaItemId;
pub use types::{Rect, ScreenPosition};

pub type Result<T> = std::result::Result<T, WebDisplayError>;
