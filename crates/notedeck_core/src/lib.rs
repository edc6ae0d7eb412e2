//! Core domain logic for NoteDeck.
//! This crate is the single source of truth for note invariants; front ends
//! only render and forward intents.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::color::{
    decode, encode, parse_color, ColorChannels, ColorParseError, DisplayColor, NotePalette,
};
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError};
pub use repo::json_repo::JsonFileNoteRepository;
pub use repo::memory_repo::InMemoryNoteRepository;
pub use repo::{NoteRepository, RepoError, RepoResult};
pub use service::note_store::{
    filter_and_sort, DisplayMode, NoteStore, StoreError, StoreResult,
};
pub use view::form::{FormSubmission, NoteForm};
pub use view::intent::{IntentOutcome, NoteIntent};
pub use view::render::{render_board, render_card, render_row, RenderOptions};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
