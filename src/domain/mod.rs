//! Domain value objects and types.
//!
//! Type-safe wrappers for the arguments tools accept: Folk identifiers, email
//! addresses and trigger times. Each validates at construction so malformed
//! input is rejected before a request reaches the Folk API.

pub mod email;
pub mod errors;
pub mod folk_id;
pub mod trigger_time;

pub use email::EmailAddress;
pub use errors::{require_text, ValidationError};
pub use folk_id::FolkId;
pub use trigger_time::TriggerTime;
