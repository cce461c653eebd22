pub mod error;
pub mod summary;
pub mod tracking;

pub use error::{DocumentKind, PersistError, Result, TrackingError, ValidationError};
pub use summary::{default_output_path, strip_code_fence, validate_sections, SummaryDocument};
pub use tracking::{Tracker, TrackingEntry, TrackingReport};
