mod common;

use common::{clear_commands, commands, open_session, open_with_store, ScriptedConfirm};
use stickyboard_core::{
    MemoryKeyValueStore, NoteField, Palette, Position, RenderCommand, SessionError, Size,
    StoreError, DELETE_NOTE_PROMPT, NOTES_KEY,
};

#[test]
fn create_and_raise_share_one_increasing_z_sequence() {
    let (mut session, _) = open_session();

    let first = session.create_note(Position::new(10.0, 10.0)).unwrap();
    let second = session.create_note(Position::new(40.0, 40.0)).unwrap();
    assert_eq!(session.note(first).unwrap().z_index, 1);
    assert_eq!(session.note(second).unwrap().z_index, 2);

    assert_eq!(session.raise_note(first).unwrap(), 3);
    assert_eq!(session.next_z_index(), 4);

    session.create_board().unwrap();
    let other_board_note = session.create_note(Position::default()).unwrap();
    assert_eq!(session.note(other_board_note).unwrap().z_index, 4);
}

#[test]
fn z_counter_resumes_after_reopen() {
    let (mut session, confirm) = open_session();
    let id = session.create_note(Position::default()).unwrap();
    session.raise_note(id).unwrap();
    session.raise_note(id).unwrap();

    let reopened = open_with_store(session.into_store(), confirm);
    assert_eq!(reopened.next_z_index(), 4);
}

#[test]
fn create_note_uses_configured_defaults_and_hides_placeholder() {
    let (mut session, _) = open_session();
    clear_commands(&mut session);

    let id = session.create_note(Position::new(120.0, 80.0)).unwrap();

    let note = session.note(id).unwrap().clone();
    assert_eq!(note.position, Position::new(120.0, 80.0));
    assert_eq!(note.size, Size::new(300.0, 300.0));
    assert_eq!(note.palette, Palette::Green);
    assert!(note.title.is_empty() && note.body.is_empty());
    assert_eq!(
        commands(&session),
        vec![
            RenderCommand::Placeholder { visible: false },
            RenderCommand::AddNote(note),
        ]
    );
}

#[test]
fn move_note_clamps_to_surface_bounds() {
    let (mut session, _) = open_session();
    let id = session.create_note(Position::default()).unwrap();
    session.resize_note(id, Size::new(200.0, 250.0)).unwrap();

    let stored = session.move_note(id, Position::new(-50.0, 900.0)).unwrap();
    assert_eq!(stored, Position::new(0.0, 750.0));

    let written = session.store().raw(NOTES_KEY).unwrap();
    assert!(written.contains("\"cardTop\":\"0px\""));
    assert!(written.contains("\"cardLeft\":\"750px\""));

    let writes_before = session.store().write_count();
    let stored = session.move_note(id, Position::new(700.0, -3.0)).unwrap();
    assert_eq!(stored, Position::new(600.0, 0.0));
    assert_eq!(session.note(id).unwrap().position, stored);
    assert_eq!(session.store().write_count(), writes_before + 1);
    let written = session.store().raw(NOTES_KEY).unwrap();
    assert!(written.contains("\"cardTop\":\"600px\""));
    assert!(written.contains("\"cardLeft\":\"0px\""));

    for (top, left) in [(-1e6, -1e6), (1e6, 1e6), (321.5, 42.25)] {
        let stored = session.move_note(id, Position::new(top, left)).unwrap();
        assert!((0.0..=600.0).contains(&stored.top));
        assert!((0.0..=750.0).contains(&stored.left));
    }
}

#[test]
fn resize_note_persists_observed_size() {
    let (mut session, _) = open_session();
    let id = session.create_note(Position::new(20.0, 30.0)).unwrap();
    let writes_before = session.store().write_count();
    clear_commands(&mut session);

    session.resize_note(id, Size::new(180.5, 240.0)).unwrap();

    assert_eq!(session.note(id).unwrap().size, Size::new(180.5, 240.0));
    assert_eq!(session.note(id).unwrap().position, Position::new(20.0, 30.0));
    assert_eq!(session.store().write_count(), writes_before + 1);
    let written = session.store().raw(NOTES_KEY).unwrap();
    assert!(written.contains("\"noteHeight\":\"180.5px\""));
    assert!(written.contains("\"noteWidth\":\"240px\""));
    assert!(matches!(
        commands(&session).as_slice(),
        [RenderCommand::UpdateNote(note)] if note.size == Size::new(180.5, 240.0)
    ));
}

#[test]
fn text_edits_persist_without_touching_geometry() {
    let (mut session, _) = open_session();
    let id = session.create_note(Position::new(5.0, 6.0)).unwrap();
    let before = session.note(id).unwrap().clone();

    session
        .update_note_field(id, NoteField::Title, "Groceries")
        .unwrap();
    session
        .update_note_field(id, NoteField::Body, "milk\neggs")
        .unwrap();

    let after = session.note(id).unwrap();
    assert_eq!(after.title, "Groceries");
    assert_eq!(after.body, "milk\neggs");
    assert_eq!(after.position, before.position);
    assert_eq!(after.z_index, before.z_index);
    let stored = session.store().raw(NOTES_KEY).unwrap();
    assert!(stored.contains("\"noteTitle\":\"Groceries\""));
}

#[test]
fn recolor_changes_palette_only() {
    let (mut session, _) = open_session();
    let id = session.create_note(Position::new(30.0, 30.0)).unwrap();
    let before = session.note(id).unwrap().clone();

    session.recolor_note(id, Palette::Orange).unwrap();

    let after = session.note(id).unwrap();
    assert_eq!(after.palette, Palette::Orange);
    assert_eq!(after.position, before.position);
    assert_eq!(after.size, before.size);
    assert_eq!(after.z_index, before.z_index);
    assert!(session
        .store()
        .raw(NOTES_KEY)
        .unwrap()
        .contains("\"cardPalette\":\"orange\""));
}

#[test]
fn declined_delete_keeps_note() {
    let confirm = ScriptedConfirm::answering(false);
    let mut session = open_with_store(MemoryKeyValueStore::new(), confirm.clone());
    let id = session.create_note(Position::default()).unwrap();
    let writes_before = session.store().write_count();
    clear_commands(&mut session);

    assert!(!session.delete_note(id).unwrap());

    assert!(session.note(id).is_some());
    assert_eq!(session.store().write_count(), writes_before);
    assert_eq!(confirm.prompts(), vec![DELETE_NOTE_PROMPT.to_string()]);
    assert!(commands(&session).is_empty());
}

#[test]
fn confirmed_delete_of_last_note_shows_placeholder() {
    let (mut session, confirm) = open_session();
    let id = session.create_note(Position::default()).unwrap();
    clear_commands(&mut session);

    assert!(session.delete_note(id).unwrap());

    assert!(session.note(id).is_none());
    assert_eq!(confirm.prompts(), vec![DELETE_NOTE_PROMPT.to_string()]);
    assert_eq!(
        commands(&session),
        vec![
            RenderCommand::RemoveNote(id),
            RenderCommand::Placeholder { visible: true },
        ]
    );
    assert_eq!(session.store().raw(NOTES_KEY), Some("[]"));
}

#[test]
fn deleting_one_of_two_notes_keeps_placeholder_hidden() {
    let (mut session, _) = open_session();
    let first = session.create_note(Position::default()).unwrap();
    let second = session.create_note(Position::default()).unwrap();
    clear_commands(&mut session);

    session.delete_note(first).unwrap();

    assert_eq!(
        commands(&session).last(),
        Some(&RenderCommand::Placeholder { visible: false })
    );
    assert_eq!(session.active_notes()[0].note_id, second);
}

#[test]
fn unknown_note_is_reported_without_prompting() {
    let (mut session, confirm) = open_session();
    let stranger = uuid::Uuid::new_v4();

    assert!(matches!(
        session.delete_note(stranger),
        Err(SessionError::NoteNotFound(id)) if id == stranger
    ));
    assert!(confirm.prompts().is_empty());
    assert!(matches!(
        session.raise_note(stranger),
        Err(SessionError::NoteNotFound(_))
    ));
    assert!(matches!(
        session.move_note(stranger, Position::default()),
        Err(SessionError::NoteNotFound(_))
    ));
    assert_eq!(session.next_z_index(), 1);
}

#[test]
fn invalid_size_is_rejected() {
    let (mut session, _) = open_session();
    let id = session.create_note(Position::default()).unwrap();

    let err = session.resize_note(id, Size::new(-1.0, 10.0)).unwrap_err();
    assert!(matches!(err, SessionError::InvalidGeometry { note_id, .. } if note_id == id));
    assert_eq!(session.note(id).unwrap().size, Size::default());
}

#[test]
fn failed_write_surfaces_store_error_and_skips_render() {
    let store = MemoryKeyValueStore::with_quota(200);
    let mut session = open_with_store(store, ScriptedConfirm::answering(true));
    clear_commands(&mut session);

    let err = session.create_note(Position::default()).unwrap_err();

    assert!(matches!(
        err,
        SessionError::Store(StoreError::QuotaExceeded { ref key, limit_bytes: 200 }) if key == NOTES_KEY
    ));
    assert!(commands(&session).is_empty());
    assert_eq!(session.notes().len(), 1);
    assert!(session.store().raw(NOTES_KEY).is_none());
}
