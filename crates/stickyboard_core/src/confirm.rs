//! Confirmation capability for destructive actions.

/// Prompt shown before a note is deleted.
pub const DELETE_NOTE_PROMPT: &str = "Are you sure you want to delete the note?";

/// Blocking yes/no decision supplied by the host.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Answers every prompt with the same decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl ConfirmPrompt for FixedAnswer {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}
