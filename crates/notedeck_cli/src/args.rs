//! Command-line parsing.
//!
//! # Responsibility
//! - Declare the `notedeck` command surface and turn arguments into a typed
//!   `Command`.
//!
//! # Invariants
//! - Parsing has no side effects; it never opens the notes document.
//! - No subcommand means `list` with default options.

use clap::{Args, Parser, Subcommand};
use notedeck_core::{DisplayMode, NotePalette};

#[derive(Debug, Parser)]
#[command(name = "notedeck")]
#[command(version, about = "Sticky notes board in the terminal")]
#[command(after_help = "IDs may be abbreviated to any unique prefix.")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::List(ListArgs::default()))
    }
}

/// One CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show notes, pinned first
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create a note
    #[command(visible_alias = "new")]
    Add(NoteFields),

    /// Change fields of an existing note
    Edit {
        /// Note id or unique id prefix
        id: String,

        #[command(flatten)]
        fields: NoteFields,
    },

    /// Toggle the pinned flag
    Pin {
        /// Note id or unique id prefix
        id: String,
    },

    /// Remove a note
    #[command(visible_alias = "rm")]
    Delete {
        /// Note id or unique id prefix
        id: String,
    },

    /// List known categories
    Categories,

    /// Print the notes file path
    Path,

    /// Print the version
    Version,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ListArgs {
    /// Lay notes out as cards
    #[arg(long, conflicts_with = "list")]
    pub grid: bool,

    /// Lay notes out as one row per note
    #[arg(long)]
    pub list: bool,

    /// Only show notes whose title, content or category contain TEXT
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,
}

impl ListArgs {
    pub fn mode(&self) -> Option<DisplayMode> {
        match (self.grid, self.list) {
            (true, _) => Some(DisplayMode::Grid),
            (_, true) => Some(DisplayMode::List),
            _ => None,
        }
    }
}

/// Field values given through `--title`, `--content` and friends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct NoteFields {
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub content: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Palette name (yellow, orange, pink, purple, blue, green, gray, white)
    /// or #RRGGBB[AA]
    #[arg(long, value_name = "NAME|#HEX")]
    pub color: Option<String>,

    /// Pin the note
    #[arg(long, conflicts_with = "unpin")]
    pub pin: bool,

    /// Unpin the note
    #[arg(long)]
    pub unpin: bool,
}

impl NoteFields {
    /// Requested pinned state; `None` leaves it unchanged.
    pub fn pinned(&self) -> Option<bool> {
        match (self.pin, self.unpin) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Lists palette names for error output.
pub fn palette_names() -> String {
    NotePalette::ALL
        .iter()
        .map(|entry| entry.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, ListArgs, NoteFields};
    use clap::error::ErrorKind;
    use clap::Parser;
    use notedeck_core::DisplayMode;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("notedeck").chain(args.iter().copied()))
            .map(Cli::into_command)
    }

    #[test]
    fn no_arguments_lists_notes() {
        assert_eq!(parse(&[]).unwrap(), Command::List(ListArgs::default()));
    }

    #[test]
    fn list_accepts_mode_and_filter() {
        let Command::List(args) = parse(&["ls", "--list", "--filter", "work"]).unwrap() else {
            panic!("expected list");
        };
        assert_eq!(args.mode(), Some(DisplayMode::List));
        assert_eq!(args.filter.as_deref(), Some("work"));
    }

    #[test]
    fn grid_and_list_conflict() {
        let err = parse(&["list", "--grid", "--list"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn add_collects_fields() {
        assert_eq!(
            parse(&["add", "-t", "Title", "-c", "Body", "--color", "blue", "--pin"]).unwrap(),
            Command::Add(NoteFields {
                title: Some("Title".to_string()),
                content: Some("Body".to_string()),
                category: None,
                color: Some("blue".to_string()),
                pin: true,
                unpin: false,
            })
        );
    }

    #[test]
    fn edit_requires_leading_id() {
        let err = parse(&["edit", "--title", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let Command::Edit { id, fields } = parse(&["edit", "abc123", "--unpin"]).unwrap() else {
            panic!("expected edit");
        };
        assert_eq!(id, "abc123");
        assert_eq!(fields.pinned(), Some(false));
    }

    #[test]
    fn pin_and_unpin_conflict() {
        let err = parse(&["edit", "abc", "--pin", "--unpin"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn bad_input_is_rejected() {
        assert_eq!(
            parse(&["add", "--title"]).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(
            parse(&["pin", "abc", "extra"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert_eq!(
            parse(&["frobnicate"]).unwrap_err().kind(),
            ErrorKind::InvalidSubcommand
        );
    }
}
