//! Reading flow: the form → submitting → result state machine.
//!
//! Each state owns exactly the data it needs, so "loading with a result" or
//! "result with a pending draft" cannot be represented. A failed submission
//! lands in `Failed`, which behaves like the form but carries a message for
//! the user.

use bytes::Bytes;
use thiserror::Error;

use crate::reading::models::ReadingResult;

/// A résumé file picked by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct CvUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Inputs captured by the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    pub birth_date: String,
    pub cv: Option<CvUpload>,
}

impl FormDraft {
    pub fn has_birth_date(&self) -> bool {
        !self.birth_date.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadingFlow {
    Form(FormDraft),
    Submitting(FormDraft),
    Result(ReadingResult),
    Failed { draft: FormDraft, message: String },
}

impl Default for ReadingFlow {
    fn default() -> Self {
        ReadingFlow::Form(FormDraft::default())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FlowError {
    #[error("birth date is required")]
    MissingBirthDate,

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

impl ReadingFlow {
    pub fn state_name(&self) -> &'static str {
        match self {
            ReadingFlow::Form(_) => "form",
            ReadingFlow::Submitting(_) => "submitting",
            ReadingFlow::Result(_) => "result",
            ReadingFlow::Failed { .. } => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ReadingFlow::Submitting(_))
    }

    /// Whether the submit control is enabled.
    pub fn submit_enabled(&self) -> bool {
        match self {
            ReadingFlow::Form(draft) | ReadingFlow::Failed { draft, .. } => draft.has_birth_date(),
            ReadingFlow::Submitting(_) | ReadingFlow::Result(_) => false,
        }
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        match self {
            ReadingFlow::Form(draft)
            | ReadingFlow::Submitting(draft)
            | ReadingFlow::Failed { draft, .. } => Some(draft),
            ReadingFlow::Result(_) => None,
        }
    }

    pub fn result(&self) -> Option<&ReadingResult> {
        match self {
            ReadingFlow::Result(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ReadingFlow::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Mutable access to an editable draft. Editing a failed flow clears the error.
    fn editable_draft(&mut self, action: &'static str) -> Result<&mut FormDraft, FlowError> {
        if let ReadingFlow::Failed { draft, .. } = self {
            let draft = std::mem::take(draft);
            *self = ReadingFlow::Form(draft);
        }
        match self {
            ReadingFlow::Form(draft) => Ok(draft),
            other => Err(FlowError::InvalidTransition {
                action,
                state: other.state_name(),
            }),
        }
    }

    pub fn set_birth_date(&mut self, birth_date: impl Into<String>) -> Result<(), FlowError> {
        self.editable_draft("edit birth date")?.birth_date = birth_date.into();
        Ok(())
    }

    pub fn attach_cv(&mut self, cv: CvUpload) -> Result<(), FlowError> {
        self.editable_draft("attach a CV")?.cv = Some(cv);
        Ok(())
    }

    pub fn clear_cv(&mut self) -> Result<(), FlowError> {
        self.editable_draft("clear the CV")?.cv = None;
        Ok(())
    }

    /// Form/Failed → Submitting. Returns the draft to send.
    pub fn submit(&mut self) -> Result<FormDraft, FlowError> {
        let draft = match self {
            ReadingFlow::Form(draft) | ReadingFlow::Failed { draft, .. } => draft,
            other => {
                return Err(FlowError::InvalidTransition {
                    action: "submit",
                    state: other.state_name(),
                })
            }
        };
        if !draft.has_birth_date() {
            return Err(FlowError::MissingBirthDate);
        }

        let draft = std::mem::take(draft);
        *self = ReadingFlow::Submitting(draft.clone());
        Ok(draft)
    }

    /// Submitting → Result.
    pub fn succeed(&mut self, reading: ReadingResult) -> Result<(), FlowError> {
        self.expect_submitting("show a result")?;
        *self = ReadingFlow::Result(reading);
        Ok(())
    }

    /// Submitting → Failed, keeping the inputs so the user can retry.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        let draft = std::mem::take(self.expect_submitting("report a failure")?);
        *self = ReadingFlow::Failed {
            draft,
            message: message.into(),
        };
        Ok(())
    }

    /// Result → empty Form.
    pub fn reset(&mut self) -> Result<(), FlowError> {
        match self {
            ReadingFlow::Result(_) => {
                *self = ReadingFlow::default();
                Ok(())
            }
            other => Err(FlowError::InvalidTransition {
                action: "start a new reading",
                state: other.state_name(),
            }),
        }
    }

    fn expect_submitting(&mut self, action: &'static str) -> Result<&mut FormDraft, FlowError> {
        match self {
            ReadingFlow::Submitting(draft) => Ok(draft),
            other => Err(FlowError::InvalidTransition {
                action,
                state: other.state_name(),
            }),
        }
    }
}
