mod common;

use common::{
    active_note_titles, clear_commands, commands, open_session, open_with_store, test_config,
    ScriptedConfirm,
};
use stickyboard_core::{
    BoardFilter, BoardSession, ConfigError, KeyValueStore, MemoryKeyValueStore, NoteField,
    Position, RecordingRenderer, RenameOutcome, RenderCommand, SessionConfig, SessionError, Surface,
    BLANK_BOARD_NAME_WARNING, BOARDS_KEY, NOTES_KEY,
};

#[test]
fn empty_store_bootstraps_one_active_default_board() {
    let (session, _) = open_session();

    assert_eq!(session.boards().len(), 1);
    let board = session.active_board().unwrap();
    assert_eq!(board.board_name, "board 1");
    assert!(board.active);
    assert!(session.store().raw(BOARDS_KEY).unwrap().contains("board 1"));

    let rendered = commands(&session);
    assert!(matches!(rendered[0], RenderCommand::BoardList { .. }));
    assert!(matches!(rendered[1], RenderCommand::ShowBoard { ref notes, .. } if notes.is_empty()));
    assert_eq!(rendered[2], RenderCommand::Placeholder { visible: true });
}

#[test]
fn reopening_keeps_boards_without_new_bootstrap() {
    let (mut session, confirm) = open_session();
    session.create_board().unwrap();
    let store = session.into_store();

    let reopened = open_with_store(store, confirm);
    let names: Vec<_> = reopened
        .boards()
        .iter()
        .map(|board| board.board_name.as_str())
        .collect();
    assert_eq!(names, vec!["board 1", "board 2"]);
    assert_eq!(reopened.active_board().unwrap().board_name, "board 2");
}

#[test]
fn create_board_deactivates_others_and_shows_empty_board() {
    let (mut session, _) = open_session();
    clear_commands(&mut session);

    let created = session.create_board().unwrap();

    assert_eq!(session.active_board().unwrap().board_id, created);
    assert_eq!(session.boards().iter().filter(|b| b.active).count(), 1);
    assert_eq!(session.boards()[1].board_name, "board 2");
    assert!(commands(&session).contains(&RenderCommand::Placeholder { visible: true }));
}

#[test]
fn rename_cascades_to_notes_of_that_board_only() {
    let (mut session, _) = open_session();
    session.rename_active_board("Work").unwrap();
    let work_note = session.create_note(Position::new(100.0, 100.0)).unwrap();

    session.create_board().unwrap();
    session.rename_active_board("Home").unwrap();
    let home_note = session.create_note(Position::new(10.0, 10.0)).unwrap();

    let work_id = session.boards()[0].board_id;
    session.select_board(work_id).unwrap();
    let outcome = session.rename_active_board("Projects").unwrap();

    assert_eq!(
        outcome,
        RenameOutcome::Renamed {
            board_id: work_id,
            new_name: "Projects".to_string(),
            notes_updated: 1,
        }
    );
    assert_eq!(session.note(work_note).unwrap().board_name, "Projects");
    assert_eq!(session.note(home_note).unwrap().board_name, "Home");

    let stored_notes = session.store().raw(NOTES_KEY).unwrap();
    assert!(stored_notes.contains("\"boardName\":\"Projects\""));
    assert!(!stored_notes.contains("\"boardName\":\"Work\""));
}

#[test]
fn rename_writes_both_collections_in_one_store_call() {
    let (mut session, _) = open_session();
    session.create_note(Position::default()).unwrap();
    let writes_before = session.store().write_count();

    session.rename_active_board("Ideas").unwrap();

    assert_eq!(session.store().write_count(), writes_before + 1);
    assert!(session.store().raw(BOARDS_KEY).unwrap().contains("Ideas"));
    assert!(session.store().raw(NOTES_KEY).unwrap().contains("Ideas"));
}

#[test]
fn blank_rename_reverts_field_and_warns() {
    let (mut session, _) = open_session();
    session.rename_active_board("Work").unwrap();
    let note = session.create_note(Position::default()).unwrap();
    let writes_before = session.store().write_count();
    clear_commands(&mut session);

    let outcome = session.rename_active_board("   \t").unwrap();

    assert_eq!(
        outcome,
        RenameOutcome::Rejected {
            current_name: "Work".to_string()
        }
    );
    assert_eq!(session.active_board().unwrap().board_name, "Work");
    assert_eq!(session.note(note).unwrap().board_name, "Work");
    assert_eq!(session.store().write_count(), writes_before);
    assert_eq!(
        commands(&session),
        vec![
            RenderCommand::BoardNameField("Work".to_string()),
            RenderCommand::Warn(BLANK_BOARD_NAME_WARNING.to_string()),
        ]
    );
}

#[test]
fn deleting_board_keeps_its_notes_and_activates_first_remaining() {
    let (mut session, _) = open_session();
    session.rename_active_board("First").unwrap();
    let first_note = session.create_note(Position::default()).unwrap();
    session
        .update_note_field(first_note, NoteField::Title, "on first")
        .unwrap();

    session.create_board().unwrap();
    session.rename_active_board("Second").unwrap();
    session.create_note(Position::default()).unwrap();
    clear_commands(&mut session);

    let next_active = session.delete_active_board().unwrap();

    assert_eq!(next_active, Some(session.boards()[0].board_id));
    assert_eq!(session.boards().len(), 1);
    assert_eq!(session.notes().len(), 2);
    assert_eq!(session.orphan_count(), 1);
    assert_eq!(active_note_titles(&session), vec!["on first".to_string()]);

    let shown = commands(&session).into_iter().find_map(|command| match command {
        RenderCommand::ShowBoard { board, notes } => Some((board, notes)),
        _ => None,
    });
    let (board, notes) = shown.unwrap();
    assert_eq!(board.board_name, "First");
    assert_eq!(notes.len(), 1);
}

#[test]
fn orphans_reappear_when_a_board_regains_their_name() {
    let (mut session, _) = open_session();
    session.rename_active_board("Garden").unwrap();
    let orphan = session.create_note(Position::default()).unwrap();
    session.create_board().unwrap();

    let garden_id = session.boards()[0].board_id;
    session.select_board(garden_id).unwrap();
    session.delete_active_board().unwrap();
    assert_eq!(session.orphan_count(), 1);

    let outcome = session.rename_active_board("Garden").unwrap();
    assert!(matches!(outcome, RenameOutcome::Renamed { .. }));
    assert_eq!(session.orphan_count(), 0);
    assert_eq!(session.active_notes()[0].note_id, orphan);
}

#[test]
fn deleting_last_board_leaves_empty_state() {
    let (mut session, _) = open_session();
    let note = session.create_note(Position::default()).unwrap();
    clear_commands(&mut session);

    assert_eq!(session.delete_active_board().unwrap(), None);
    assert!(session.active_board().is_none());
    assert!(session.note(note).is_some());
    assert!(commands(&session).contains(&RenderCommand::ClearSurface));

    assert!(matches!(
        session.create_note(Position::default()),
        Err(SessionError::NoActiveBoard)
    ));
    assert!(matches!(
        session.delete_active_board(),
        Err(SessionError::NoActiveBoard)
    ));
}

#[test]
fn select_board_renders_exactly_its_notes_and_clears_search() {
    let (mut session, _) = open_session();
    for title in ["a1", "a2"] {
        let id = session.create_note(Position::default()).unwrap();
        session.update_note_field(id, NoteField::Title, title).unwrap();
    }
    session.create_board().unwrap();
    let b_note = session.create_note(Position::default()).unwrap();
    session.update_note_field(b_note, NoteField::Title, "b1").unwrap();

    session.filter_boards("board");
    clear_commands(&mut session);
    let first = session.boards()[0].board_id;
    session.select_board(first).unwrap();

    assert_eq!(session.search_text(), "");
    assert_eq!(active_note_titles(&session), vec!["a1", "a2"]);
    let rendered = commands(&session);
    assert_eq!(rendered[0], RenderCommand::ClearBoardSearch);
    let shown: Vec<_> = rendered
        .iter()
        .find_map(|command| match command {
            RenderCommand::ShowBoard { notes, .. } => {
                Some(notes.iter().map(|n| n.title.clone()).collect::<Vec<String>>())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(shown, vec!["a1", "a2"]);
    assert!(rendered.contains(&RenderCommand::Placeholder { visible: false }));
}

#[test]
fn select_unknown_board_fails_without_changes() {
    let (mut session, _) = open_session();
    let active = session.active_board().unwrap().board_id;
    let stranger = uuid::Uuid::new_v4();

    let err = session.select_board(stranger).unwrap_err();
    assert!(matches!(err, SessionError::BoardNotFound(id) if id == stranger));
    assert_eq!(session.active_board().unwrap().board_id, active);
}

#[test]
fn filter_boards_reports_not_found_and_renders_list() {
    let (mut session, _) = open_session();
    session.rename_active_board("Work").unwrap();
    session.create_board().unwrap();
    session.rename_active_board("Homework").unwrap();
    session.create_board().unwrap();
    session.rename_active_board("Travel").unwrap();
    clear_commands(&mut session);

    let filter = session.filter_boards("WORK");
    let names: Vec<_> = filter
        .boards()
        .iter()
        .map(|b| b.board_name.clone())
        .collect();
    assert_eq!(names, vec!["Work", "Homework"]);
    assert_eq!(session.search_text(), "WORK");

    assert_eq!(session.filter_boards("nothing"), BoardFilter::NotFound);
    assert_eq!(
        commands(&session).last(),
        Some(&RenderCommand::BoardList {
            boards: Vec::new(),
            not_found: true
        })
    );
    assert_eq!(session.filter_boards("").boards().len(), 3);
}

#[test]
fn persisted_boards_with_no_active_flag_are_repaired() {
    let mut store = MemoryKeyValueStore::new();
    let first = uuid::Uuid::new_v4();
    let second = uuid::Uuid::new_v4();
    store
        .set(
            BOARDS_KEY,
            &format!(
                r#"[{{"boardId":"{first}","boardName":"A","activeBoard":false}},{{"boardId":"{second}","boardName":"B","activeBoard":false}}]"#
            ),
        )
        .unwrap();

    let session = open_with_store(store, ScriptedConfirm::answering(true));
    assert_eq!(session.active_board().unwrap().board_id, first);
    assert!(session
        .store()
        .raw(BOARDS_KEY)
        .unwrap()
        .contains(r#""activeBoard":true"#));
}

#[test]
fn open_rejects_invalid_config() {
    for (surface, bad_field) in [
        (Surface::new(f64::NAN, 800.0), "surface.width"),
        (Surface::new(1000.0, -1.0), "surface.height"),
    ] {
        let config = SessionConfig {
            surface,
            ..test_config()
        };
        let result = BoardSession::open(
            MemoryKeyValueStore::new(),
            RecordingRenderer::new(),
            ScriptedConfirm::answering(true),
            config,
        );

        assert!(matches!(
            result,
            Err(SessionError::InvalidConfig(ConfigError::InvalidValue { field, .. }))
                if field == bad_field
        ));
    }
}
