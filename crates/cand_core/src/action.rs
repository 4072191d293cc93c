use crate::label::Label;
use crate::session::{Boundary, LabelingSession};

/// Every user action the viewer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Label as False and advance.
    Reject,
    /// Label as True and advance.
    Accept,
    /// Label as Maybe and advance.
    Uncertain,
    /// Step back one image.
    Undo,
    /// Step forward one image without labeling.
    Skip,
    PrevUnlabeled,
    NextUnlabeled,
    /// Write the output file.
    Export,
}

/// What the presenter still has to do after a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    ExportRequested,
}

impl Action {
    /// The label a classification action applies, if any.
    pub fn label(self) -> Option<Label> {
        match self {
            Action::Reject => Some(Label::False),
            Action::Accept => Some(Label::True),
            Action::Uncertain => Some(Label::Maybe),
            _ => None,
        }
    }

    pub fn apply(self, session: &mut LabelingSession) -> Result<Outcome, Boundary> {
        match self {
            Action::Reject | Action::Accept | Action::Uncertain => {
                let label = self.label().unwrap_or_default();
                session.label_and_advance(label)?;
            }
            Action::Undo => session.retreat()?,
            Action::Skip => session.advance()?,
            Action::PrevUnlabeled => session.seek_prev_unlabeled()?,
            Action::NextUnlabeled => session.seek_next_unlabeled()?,
            Action::Export => return Ok(Outcome::ExportRequested),
        }
        Ok(Outcome::Moved)
    }
}
