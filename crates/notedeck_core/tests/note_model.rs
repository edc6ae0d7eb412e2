use notedeck_core::{
    decode, encode, ColorChannels, DisplayColor, Note, NoteDraft, NotePalette, NoteValidationError,
};
use uuid::Uuid;

#[test]
fn from_draft_sets_identity_and_timestamps() {
    let draft = NoteDraft::new("Title", "Body")
        .with_category("Work")
        .pinned(true);
    let note = Note::from_draft(draft, 1_234);

    assert!(!note.id.is_nil());
    assert_eq!(note.title, "Title");
    assert_eq!(note.category, "Work");
    assert!(note.is_pinned);
    assert_eq!(note.created_at, 1_234);
    assert_eq!(note.last_modified_at, 1_234);
    assert_eq!(note.color, encode(NotePalette::Yellow.color()));
    assert!(note.validate().is_ok());
}

#[test]
fn validate_reports_each_invariant() {
    let mut note = Note::from_draft(NoteDraft::new("t", "c"), 10);

    note.last_modified_at = 5;
    assert_eq!(
        note.validate().unwrap_err(),
        NoteValidationError::ModifiedBeforeCreated {
            created: 10,
            modified: 5,
        }
    );

    note.last_modified_at = 10;
    note.color.opacity = -0.1;
    assert!(matches!(
        note.validate().unwrap_err(),
        NoteValidationError::ChannelOutOfRange {
            channel: "opacity",
            ..
        }
    ));

    note.color.opacity = 1.0;
    note.id = Uuid::nil();
    assert_eq!(note.validate().unwrap_err(), NoteValidationError::NilId);
}

#[test]
fn serialization_round_trips_through_json() {
    let mut note = Note::from_draft(NoteDraft::new("Trip", "pack bags"), 1_700_000_000_000);
    note.last_modified_at += 60_000;
    note.color = encode(DisplayColor::rgba(0.2, 0.4, 0.6, 0.8));

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["id"], note.id.to_string());
    assert_eq!(json["lastModifiedDate"], 1_700_000_060_000_i64);
    assert_eq!(json["color"]["blue"], 0.6);

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn missing_optional_fields_use_defaults() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "legacy",
        "content": "no pin or category keys",
        "color": { "red": 0.5, "green": 0.5, "blue": 0.5, "opacity": 1.0 },
        "createdDate": 1,
        "lastModifiedDate": 2
    });
    let note: Note = serde_json::from_value(value).unwrap();
    assert!(!note.is_pinned);
    assert!(note.category.is_empty());
}

#[test]
fn nil_id_fails_to_deserialize() {
    let value = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "title": "t",
        "content": "c",
        "color": { "red": 0.5, "green": 0.5, "blue": 0.5, "opacity": 1.0 },
        "isPinned": false,
        "category": "",
        "createdDate": 1,
        "lastModifiedDate": 1
    });
    let err = serde_json::from_value::<Note>(value).unwrap_err();
    assert!(err.to_string().contains("nil"), "unexpected error: {err}");
}

#[test]
fn color_codec_round_trips_every_palette_entry() {
    for entry in NotePalette::ALL {
        let channels = encode(entry.color());
        let again: ColorChannels = encode(decode(channels));
        assert_eq!(again, channels, "palette entry {}", entry.name());
        assert_eq!(NotePalette::from_name(entry.name()), Some(entry));
    }
}
