//! Quiz wizard core
//!
//! The step-gated state machine behind both the terminal UI and the
//! non-interactive command line mode.

pub mod configs;
pub mod state;
pub mod uploads;

pub use configs::{ConfigUpdate, QUANTITY_CHOICES, QuestionConfigList, next_quantity, prev_quantity};
pub use state::{Action, Effect, WizardError, WizardState, WizardStep};
pub use uploads::{UploadError, UploadList, read_upload};
