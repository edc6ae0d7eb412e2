//! Text renderers for the note board.
//!
//! # Responsibility
//! - Render one note as a boxed card or a single-line row.
//! - Compose cards into a width-fitting grid, or rows into a list.
//!
//! # Invariants
//! - Every card has the same height, so grid rows line up.
//! - Without ANSI output, each rendered line is at most `width` characters.
//! - Renderers never mutate notes; they only read them.

use crate::model::color::decode;
use crate::model::note::Note;
use crate::service::note_store::DisplayMode;
use crate::view::preview::{preview_text, truncate, wrap};
use chrono::DateTime;

/// Fixed card width in characters, borders included.
pub const CARD_WIDTH: usize = 30;
/// Content lines shown on each card.
pub const CARD_PREVIEW_LINES: usize = 3;

const GRID_GAP: usize = 2;
const PIN_MARKER: &str = "◆";
const UNPINNED_MARKER: &str = " ";
const EMPTY_BOARD: &str = "No notes yet.";
const EMPTY_FILTERED_BOARD: &str = "No notes match the current filter.";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Rendering knobs shared by cards, rows and boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Total available width in characters.
    pub width: usize,
    /// Emit ANSI truecolor escapes for note colors.
    pub ansi: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 80,
            ansi: false,
        }
    }
}

/// Renders one note as card lines (top border first).
pub fn render_card(note: &Note, options: &RenderOptions) -> Vec<String> {
    let inner = CARD_WIDTH - 4;
    let mut body: Vec<String> = Vec::with_capacity(CARD_PREVIEW_LINES + 3);

    body.push(truncate(
        &format!("{} {}", pin_marker(note), note.title.trim()),
        inner,
    ));
    let mut preview = wrap(&preview_text(&note.content), inner, CARD_PREVIEW_LINES);
    preview.resize(CARD_PREVIEW_LINES, String::new());
    body.extend(preview);
    body.push(truncate(&category_label(note), inner));
    body.push(truncate(&format_timestamp(note.last_modified_at), inner));

    let (open, close) = color_escape(note, options);
    let horizontal = "─".repeat(CARD_WIDTH - 2);
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format!("{open}┌{horizontal}┐{close}"));
    for line in body {
        lines.push(format!(
            "{open}│{close} {}{} {open}│{close}",
            line,
            " ".repeat(inner - line.chars().count())
        ));
    }
    lines.push(format!("{open}└{horizontal}┘{close}"));
    lines
}

/// Renders one note as a single list row.
pub fn render_row(note: &Note, options: &RenderOptions) -> String {
    let mut row = format!("{} {}", pin_marker(note), note.title.trim());
    let category = note.category.trim();
    if !category.is_empty() {
        row.push_str(" · ");
        row.push_str(category);
    }
    row.push_str(" · ");
    row.push_str(&format_timestamp(note.last_modified_at));

    let preview = preview_text(&note.content);
    if !preview.is_empty() {
        row.push_str(" · ");
        row.push_str(&preview);
    }

    let row = truncate(&row, options.width);
    let (open, close) = color_escape(note, options);
    if open.is_empty() {
        row
    } else {
        format!("{open}▌{close}{row}")
    }
}

/// Renders the given notes in `mode`, in the order provided.
///
/// `filtered` selects the placeholder shown for an empty board.
pub fn render_board(
    notes: &[&Note],
    mode: DisplayMode,
    options: &RenderOptions,
    filtered: bool,
) -> String {
    if notes.is_empty() {
        return if filtered {
            EMPTY_FILTERED_BOARD
        } else {
            EMPTY_BOARD
        }
        .to_string();
    }

    match mode {
        DisplayMode::List => notes
            .iter()
            .map(|note| render_row(note, options))
            .collect::<Vec<_>>()
            .join("\n"),
        DisplayMode::Grid => render_grid(notes, options),
    }
}

/// Number of card columns that fit into `width`.
pub fn grid_columns(width: usize) -> usize {
    ((width + GRID_GAP) / (CARD_WIDTH + GRID_GAP)).max(1)
}

fn render_grid(notes: &[&Note], options: &RenderOptions) -> String {
    let columns = grid_columns(options.width);
    let gap = " ".repeat(GRID_GAP);
    let mut out: Vec<String> = Vec::new();

    for chunk in notes.chunks(columns) {
        let cards: Vec<Vec<String>> = chunk
            .iter()
            .map(|note| render_card(note, options))
            .collect();
        let height = cards.first().map_or(0, Vec::len);
        for row in 0..height {
            let line = cards
                .iter()
                .map(|card| card[row].as_str())
                .collect::<Vec<_>>()
                .join(gap.as_str());
            out.push(line);
        }
    }

    out.join("\n")
}

fn pin_marker(note: &Note) -> &'static str {
    if note.is_pinned {
        PIN_MARKER
    } else {
        UNPINNED_MARKER
    }
}

fn category_label(note: &Note) -> String {
    let category = note.category.trim();
    if category.is_empty() {
        String::new()
    } else {
        format!("#{category}")
    }
}

/// Formats epoch milliseconds as UTC `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|value| value.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn color_escape(note: &Note, options: &RenderOptions) -> (String, &'static str) {
    if !options.ansi {
        return (String::new(), "");
    }
    let [r, g, b] = decode(note.color).to_rgb8();
    (format!("\x1b[38;2;{r};{g};{b}m"), "\x1b[0m")
}
