//! User intents forwarded from views to the store.

use crate::clock::Clock;
use crate::model::note::{Note, NoteId};
use crate::repo::NoteRepository;
use crate::service::note_store::{NoteStore, StoreError, StoreResult};
use crate::view::form::{FormSubmission, NoteForm};

/// Action raised by a card or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteIntent {
    Edit(NoteId),
    Delete(NoteId),
    TogglePin(NoteId),
}

/// Store response to an intent.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    /// Edit requested; the caller presents this prefilled form.
    OpenEditor(NoteForm),
    Deleted(Note),
    PinToggled(Note),
}

impl<R: NoteRepository, C: Clock> NoteStore<R, C> {
    /// Applies one view intent.
    pub fn apply(&mut self, intent: NoteIntent) -> StoreResult<IntentOutcome> {
        match intent {
            NoteIntent::Edit(id) => self
                .get(id)
                .map(|note| IntentOutcome::OpenEditor(NoteForm::for_note(note)))
                .ok_or(StoreError::NotFound(id)),
            NoteIntent::Delete(id) => self.delete(id).map(IntentOutcome::Deleted),
            NoteIntent::TogglePin(id) => self.toggle_pin(id).map(IntentOutcome::PinToggled),
        }
    }

    /// Persists a submitted form as a create or an update.
    pub fn apply_submission(&mut self, submission: FormSubmission) -> StoreResult<Note> {
        match submission {
            FormSubmission::Create(draft) => self.add(draft),
            FormSubmission::Update(note) => self.update(note),
        }
    }
}
