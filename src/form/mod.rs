pub mod codec;
pub mod modal;
pub mod validation;

pub use modal::{Field, SubmitOutcome, TimerModal};
pub use validation::{TimerFormData, ValidationError, check, validate};
