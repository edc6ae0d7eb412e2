//! Command execution against the note store.
//!
//! # Responsibility
//! - Map parsed commands onto store intents and form submissions.
//! - Produce the text printed for each command.
//!
//! # Invariants
//! - Add/edit go through `NoteForm`, so blank title/content never reach
//!   the store.
//! - Output never depends on anything but the store and render options.

use crate::args::{palette_names, Command, NoteFields};
use log::info;
use notedeck_core::{
    core_version, encode, parse_color, render_board, Clock, ColorParseError, IntentOutcome,
    NoteForm, NoteId, NoteIntent, NoteRepository, NoteStore, RenderOptions, StoreError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

#[derive(Debug)]
pub enum CliError {
    Store(StoreError),
    Color(ColorParseError),
    /// The id prefix matched no note, or more than one.
    UnknownId(String),
    /// Title or content is blank after trimming.
    IncompleteNote,
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Color(err) => write!(f, "{err} (palette: {})", palette_names()),
            Self::UnknownId(prefix) => write!(f, "no unique note matches id `{prefix}`"),
            Self::IncompleteNote => write!(f, "a note needs a non-blank title and content"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Color(err) => Some(err),
            Self::UnknownId(_) | Self::IncompleteNote => None,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ColorParseError> for CliError {
    fn from(value: ColorParseError) -> Self {
        Self::Color(value)
    }
}

/// Runs one command and returns the text to print.
pub fn execute<R: NoteRepository, C: Clock>(
    store: &mut NoteStore<R, C>,
    command: Command,
    data_file: &Path,
    options: &RenderOptions,
) -> Result<String, CliError> {
    match command {
        Command::List(list) => {
            if let Some(mode) = list.mode() {
                store.set_display_mode(mode);
            }
            if let Some(filter) = list.filter {
                store.set_filter(filter);
            }
            let filtered = !store.filter().is_empty();
            Ok(render_board(
                &store.visible_notes(),
                store.display_mode(),
                options,
                filtered,
            ))
        }
        Command::Add(fields) => {
            let mut form = NoteForm::for_new();
            apply_fields(&mut form, fields)?;
            let submission = form.submit().ok_or(CliError::IncompleteNote)?;
            let note = store.apply_submission(submission)?;
            info!("event=cli_add module=cli status=ok id={}", note.id);
            Ok(format!("Created {}", short_id(note.id)))
        }
        Command::Edit { id, fields } => {
            let id = resolve_id(store, &id)?;
            let mut form = match store.apply(NoteIntent::Edit(id))? {
                IntentOutcome::OpenEditor(form) => form,
                _ => return Err(StoreError::NotFound(id).into()),
            };
            apply_fields(&mut form, fields)?;
            if !form.is_dirty() {
                return Ok(format!("No changes for {}", short_id(id)));
            }
            let submission = form.submit().ok_or(CliError::IncompleteNote)?;
            let note = store.apply_submission(submission)?;
            Ok(format!("Updated {}", short_id(note.id)))
        }
        Command::Pin { id } => {
            let id = resolve_id(store, &id)?;
            let note = store.toggle_pin(id)?;
            let state = if note.is_pinned { "Pinned" } else { "Unpinned" };
            Ok(format!("{state} {}", short_id(note.id)))
        }
        Command::Delete { id } => {
            let id = resolve_id(store, &id)?;
            let note = store.delete(id)?;
            Ok(format!("Deleted {}", short_id(note.id)))
        }
        Command::Categories => {
            let categories = store.categories();
            if categories.is_empty() {
                Ok("No categories yet.".to_string())
            } else {
                Ok(categories.join("\n"))
            }
        }
        Command::Path => Ok(data_file.display().to_string()),
        Command::Version => Ok(format!("notedeck {}", core_version())),
    }
}

fn apply_fields(form: &mut NoteForm, fields: NoteFields) -> Result<(), CliError> {
    let pinned = fields.pinned();
    if let Some(title) = fields.title {
        form.title = title;
    }
    if let Some(content) = fields.content {
        form.content = content;
    }
    if let Some(category) = fields.category {
        form.category = category;
    }
    if let Some(color) = fields.color {
        form.color = encode(parse_color(&color)?);
    }
    if let Some(pinned) = pinned {
        form.is_pinned = pinned;
    }
    Ok(())
}

fn resolve_id<R: NoteRepository, C: Clock>(
    store: &NoteStore<R, C>,
    prefix: &str,
) -> Result<NoteId, CliError> {
    store
        .find_by_prefix(prefix)
        .map(|note| note.id)
        .ok_or_else(|| CliError::UnknownId(prefix.to_string()))
}

fn short_id(id: NoteId) -> String {
    id.to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::{execute, CliError};
    use crate::args::Cli;
    use clap::Parser;
    use notedeck_core::{
        JsonFileNoteRepository, ManualClock, NoteId, NoteStore, RenderOptions, StoreError,
    };
    use std::path::{Path, PathBuf};

    struct Fixture {
        _dir: tempfile::TempDir,
        path: PathBuf,
        clock: ManualClock,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().expect("temp dir");
            let path = dir.path().join("notes.json");
            Self {
                _dir: dir,
                path,
                clock: ManualClock::new(1_700_000_000_000),
            }
        }

        fn run(&self, args: &[&str]) -> Result<String, CliError> {
            let argv = std::iter::once("notedeck").chain(args.iter().copied());
            let command = Cli::try_parse_from(argv)
                .expect("valid args")
                .into_command();
            let mut store = NoteStore::load(JsonFileNoteRepository::new(&self.path), &self.clock);
            self.clock.advance(1_000);
            execute(&mut store, command, Path::new(&self.path), &RenderOptions::default())
        }

        fn created_id(&self, args: &[&str]) -> String {
            let output = self.run(args).expect("add should succeed");
            output
                .strip_prefix("Created ")
                .expect("add output names the id")
                .to_string()
        }
    }

    #[test]
    fn add_list_pin_and_delete_flow() {
        let fixture = Fixture::new();
        fixture
            .run(&["add", "--title", "Shopping", "--content", "milk"])
            .expect("add shopping");
        let work = fixture.created_id(&["add", "-t", "Work", "-c", "deploy", "--category", "Job"]);

        let listed = fixture.run(&["list", "--list"]).expect("list");
        let lines: Vec<&str> = listed.lines().collect();
        assert!(lines[0].contains("Work"));
        assert!(lines[1].contains("Shopping"));

        fixture.run(&["pin", &work]).expect("pin");
        fixture
            .run(&["add", "-t", "Newest", "-c", "latest"])
            .expect("add newest");
        let listed = fixture.run(&["list", "--list"]).expect("list");
        assert!(listed.lines().next().unwrap_or("").starts_with("◆ Work"));

        assert_eq!(
            fixture.run(&["delete", &work]).expect("delete"),
            format!("Deleted {work}")
        );
        let listed = fixture.run(&["list", "--list"]).expect("list");
        assert!(!listed.contains("Work"));
    }

    #[test]
    fn blank_content_is_refused_before_reaching_store() {
        let fixture = Fixture::new();
        let err = fixture
            .run(&["add", "--title", "Only title", "--content", "   "])
            .expect_err("blank content must fail");
        assert!(matches!(err, CliError::IncompleteNote));
        assert!(!fixture.path.exists());
    }

    #[test]
    fn edit_updates_fields_and_reports_no_op() {
        let fixture = Fixture::new();
        let id = fixture.created_id(&["add", "-t", "Draft", "-c", "v1"]);

        assert_eq!(
            fixture.run(&["edit", &id, "--title", "Draft"]).expect("no-op edit"),
            format!("No changes for {id}")
        );
        fixture
            .run(&["edit", &id, "--content", "v2", "--color", "#336699"])
            .expect("edit");
        let listed = fixture.run(&["list", "--list", "--filter", "V2"]).expect("list");
        assert!(listed.contains("Draft"));
    }

    #[test]
    fn filter_without_matches_shows_placeholder() {
        let fixture = Fixture::new();
        fixture.run(&["add", "-t", "a", "-c", "b"]).expect("add");
        assert_eq!(
            fixture.run(&["list", "-f", "zzz"]).expect("list"),
            "No notes match the current filter."
        );
    }

    #[test]
    fn whitespace_filter_is_not_treated_as_empty() {
        let fixture = Fixture::new();
        fixture.run(&["add", "-t", "a", "-c", "b"]).expect("add");
        assert_eq!(
            fixture.run(&["list", "-f", " "]).expect("list"),
            "No notes match the current filter."
        );
    }

    #[test]
    fn unknown_id_and_color_are_reported() {
        let fixture = Fixture::new();
        assert!(matches!(
            fixture.run(&["pin", "deadbeef"]),
            Err(CliError::UnknownId(_))
        ));
        assert!(matches!(
            fixture.run(&["add", "-t", "a", "-c", "b", "--color", "mauve"]),
            Err(CliError::Color(_))
        ));
    }

    #[test]
    fn categories_and_path_commands() {
        let fixture = Fixture::new();
        assert_eq!(
            fixture.run(&["categories"]).expect("categories"),
            "No categories yet."
        );
        fixture
            .run(&["add", "-t", "a", "-c", "b", "--category", "Home"])
            .expect("add");
        assert_eq!(fixture.run(&["categories"]).expect("categories"), "Home");
        assert_eq!(
            fixture.run(&["path"]).expect("path"),
            fixture.path.display().to_string()
        );
    }

    #[test]
    fn store_errors_convert_into_cli_errors() {
        let err: CliError = StoreError::NotFound(NoteId::nil()).into();
        assert!(err.to_string().contains("note not found"));
    }
}
