//! Pure domain model: the field record, its validation rules and the wire
//! payload. Nothing in here touches the terminal or the network.
pub mod payload;
pub mod record;
pub mod validation;

pub use payload::SubmissionPayload;
pub use record::{FieldId, FieldRecord};
pub use validation::{ValidationOutcome, validate};
