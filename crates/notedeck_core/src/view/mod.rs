//! Presentational layer.
//!
//! # Responsibility
//! - Render notes as cards, rows and boards.
//! - Hold create/edit form state and validation.
//! - Forward user intents to the store.
//!
//! # Invariants
//! - Views hold no note state of their own beyond an open form.

pub mod form;
pub mod intent;
pub mod preview;
pub mod render;
