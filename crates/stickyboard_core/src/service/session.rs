//! Board session: the single owner of board/note state.
//!
//! # Responsibility
//! - Load boards and notes from a `KeyValueStore` and bootstrap a default
//!   board when none exist.
//! - Expose every board/note use-case, persisting after each mutation and
//!   describing the visual result through a `RenderAdapter`.
//! - Carry the session-wide state (z-order counter, active board, board
//!   search text) explicitly instead of as globals.
//!
//! # Invariants
//! - Each mutating call saves the affected collection before returning `Ok`.
//! - Rename writes boards and notes in one atomic `set_many`.
//! - Render commands are emitted only after the write succeeded. On a failed
//!   write the in-memory change is kept and the next successful save stores it.
//! - Note text never reaches the log.

use crate::config::{ConfigError, SessionConfig};
use crate::confirm::{ConfirmPrompt, DELETE_NOTE_PROMPT};
use crate::geometry::{Position, Size, Surface};
use crate::model::board::{Board, BoardId, BoardNameError};
use crate::model::note::{Note, NoteField, NoteId, Palette};
use crate::render::{RenderAdapter, RenderCommand};
use crate::service::board_service::{BoardFilter, BoardManager, BoardServiceError};
use crate::service::note_service::{NoteManager, NoteServiceError};
use crate::store::records::{BoardRecord, NoteRecord};
use crate::store::{
    encode_collection, load_collection, save_collection, KeyValueStore, StoreError, BOARDS_KEY,
    NOTES_KEY,
};
use log::{debug, error, info, trace, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Warning surfaced when a rename is rejected.
pub const BLANK_BOARD_NAME_WARNING: &str = "Board name cannot be empty";

/// Errors returned by session use-cases.
#[derive(Debug)]
pub enum SessionError {
    /// Operation needs an active board but none exists.
    NoActiveBoard,
    /// Target board does not exist.
    BoardNotFound(BoardId),
    /// Board name is blank after trim.
    InvalidBoardName(BoardNameError),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Observed note size is negative or not finite.
    InvalidGeometry { note_id: NoteId, size: Size },
    /// Session config failed validation.
    InvalidConfig(ConfigError),
    /// Durable write or read failed.
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveBoard => write!(f, "no active board"),
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::InvalidBoardName(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidGeometry { note_id, size } => write!(
                f,
                "invalid size {}x{} for note {note_id}",
                size.width, size.height
            ),
            Self::InvalidConfig(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidBoardName(err) => Some(err),
            Self::InvalidConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ConfigError> for SessionError {
    fn from(value: ConfigError) -> Self {
        Self::InvalidConfig(value)
    }
}

impl From<NoteServiceError> for SessionError {
    fn from(value: NoteServiceError) -> Self {
        match value {
            NoteServiceError::NoteNotFound(id) => Self::NoteNotFound(id),
            NoteServiceError::InvalidGeometry { note_id, size } => {
                Self::InvalidGeometry { note_id, size }
            }
        }
    }
}

impl From<BoardServiceError> for SessionError {
    fn from(value: BoardServiceError) -> Self {
        match value {
            BoardServiceError::BoardNotFound(id) => Self::BoardNotFound(id),
            BoardServiceError::NoActiveBoard => Self::NoActiveBoard,
            BoardServiceError::InvalidName(err) => Self::InvalidBoardName(err),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Outcome of a rename request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Board and dependent notes now carry `new_name`.
    Renamed {
        board_id: BoardId,
        new_name: String,
        notes_updated: usize,
    },
    /// Blank input; the name field was reverted to `current_name`.
    Rejected { current_name: String },
}

/// Loaded board/note state bound to its store, renderer and prompt.
pub struct BoardSession<S, R, C> {
    store: S,
    renderer: R,
    confirm: C,
    config: SessionConfig,
    boards: BoardManager,
    notes: NoteManager,
    search_text: String,
}

impl<S, R, C> BoardSession<S, R, C>
where
    S: KeyValueStore,
    R: RenderAdapter,
    C: ConfirmPrompt,
{
    /// Loads persisted state, repairs it, and renders the active board.
    ///
    /// # Side effects
    /// - Creates and saves `board 1` when the store holds no boards.
    /// - Saves repaired active flags and re-linked legacy/orphan notes.
    /// - Emits the board list and the active board's notes.
    pub fn open(store: S, renderer: R, confirm: C, config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        let board_records: Vec<BoardRecord> = load_collection(&store, BOARDS_KEY)?;
        let note_records: Vec<NoteRecord> = load_collection(&store, NOTES_KEY)?;

        let mut session = Self {
            store,
            renderer,
            confirm,
            config,
            boards: BoardManager::new(board_records.into_iter().map(Board::from).collect()),
            notes: NoteManager::new(note_records.into_iter().map(Note::from).collect()),
            search_text: String::new(),
        };

        let mut boards_dirty = session.boards.ensure_single_active();
        if session.boards.is_empty() {
            let board = session.boards.create();
            info!(
                "event=board_bootstrap module=session status=ok board_id={}",
                board.board_id
            );
            boards_dirty = true;
        }

        let mut relinked = session.notes.reattach_orphans(session.boards.boards());
        if let Some(active) = session.boards.active().cloned() {
            relinked += session.notes.adopt_unassigned(&active);
        }

        match (boards_dirty, relinked > 0) {
            (true, true) => session.persist_all()?,
            (true, false) => session.persist_boards()?,
            (false, true) => session.persist_notes()?,
            (false, false) => {}
        }

        info!(
            "event=session_open module=session status=ok boards={} notes={} relinked={} next_z_index={}",
            session.boards.len(),
            session.notes.len(),
            relinked,
            session.notes.z_order().peek()
        );

        session.render_board_list();
        session.render_active_board();
        Ok(session)
    }

    pub fn boards(&self) -> &[Board] {
        self.boards.boards()
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.notes()
    }

    pub fn note(&self, note_id: NoteId) -> Option<&Note> {
        self.notes.get(note_id)
    }

    pub fn active_board(&self) -> Option<&Board> {
        self.boards.active()
    }

    /// Notes of the active board in insertion order.
    pub fn active_notes(&self) -> Vec<&Note> {
        match self.boards.active() {
            Some(board) => self.notes.on_board(board.board_id).collect(),
            None => Vec::new(),
        }
    }

    /// Notes whose board no longer exists.
    pub fn orphan_count(&self) -> usize {
        self.notes.orphan_count(self.boards.boards())
    }

    /// Value the next create or raise will assign.
    pub fn next_z_index(&self) -> i64 {
        self.notes.z_order().peek()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn surface(&self) -> Surface {
        self.config.surface
    }

    /// Updates the clamp rectangle after the host surface was resized.
    pub fn set_surface(&mut self, surface: Surface) {
        self.config.surface = surface;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Consumes the session, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Creates `board {count+1}`, makes it active and shows it.
    pub fn create_board(&mut self) -> SessionResult<BoardId> {
        let board_id = self.boards.create().board_id;
        let relinked = self.notes.reattach_orphans(self.boards.boards());
        self.persist_after_board_change(relinked)?;

        info!(
            "event=board_create module=session status=ok board_id={board_id} boards={} relinked={relinked}",
            self.boards.len()
        );
        self.render_board_list();
        self.render_active_board();
        Ok(board_id)
    }

    /// Renames the active board and every note on it in one write.
    ///
    /// A blank `new_name` is not an error: the name field is reverted, a
    /// warning is shown and `Rejected` is returned.
    pub fn rename_active_board(&mut self, new_name: &str) -> SessionResult<RenameOutcome> {
        let rename = match self.boards.rename_active(new_name) {
            Ok(rename) => rename,
            Err(BoardServiceError::InvalidName(_)) => {
                let current_name = self
                    .boards
                    .active()
                    .map(|board| board.board_name.clone())
                    .ok_or(SessionError::NoActiveBoard)?;
                warn!("event=board_rename module=session status=rejected reason=blank_name");
                self.renderer
                    .apply(RenderCommand::BoardNameField(current_name.clone()));
                self.renderer
                    .apply(RenderCommand::Warn(BLANK_BOARD_NAME_WARNING.to_string()));
                return Ok(RenameOutcome::Rejected { current_name });
            }
            Err(err) => return Err(err.into()),
        };

        let notes_updated = self
            .notes
            .rename_board(rename.board_id, rename.new_name.as_str());
        let relinked = self.notes.reattach_orphans(self.boards.boards());
        self.persist_all()?;

        info!(
            "event=board_rename module=session status=ok board_id={} notes_updated={notes_updated} relinked={relinked}",
            rename.board_id
        );
        self.renderer
            .apply(RenderCommand::BoardNameField(rename.new_name.clone()));
        self.render_board_list();
        if relinked > 0 {
            self.render_active_board();
        }
        Ok(RenameOutcome::Renamed {
            board_id: rename.board_id,
            new_name: rename.new_name,
            notes_updated,
        })
    }

    /// Deletes the active board. Its notes stay stored as orphans.
    ///
    /// Returns the newly active board, if any remains.
    pub fn delete_active_board(&mut self) -> SessionResult<Option<BoardId>> {
        let removed = self.boards.remove_active()?;
        let relinked = self.notes.reattach_orphans(self.boards.boards());
        self.persist_after_board_change(relinked)?;

        let next_active = self.boards.active().map(|board| board.board_id);
        info!(
            "event=board_delete module=session status=ok board_id={} orphaned_notes={} next_active={}",
            removed.board_id,
            self.notes.count_on_board(removed.board_id),
            next_active.map_or_else(|| "none".to_string(), |id| id.to_string())
        );
        self.render_board_list();
        self.render_active_board();
        Ok(next_active)
    }

    /// Activates `board_id`, clears the board search and re-renders.
    pub fn select_board(&mut self, board_id: BoardId) -> SessionResult<()> {
        self.boards.select(board_id)?;
        self.persist_boards()?;

        debug!("event=board_select module=session status=ok board_id={board_id}");
        self.search_text.clear();
        self.renderer.apply(RenderCommand::ClearBoardSearch);
        self.render_board_list();
        self.render_active_board();
        Ok(())
    }

    /// Searches boards by name and renders the filtered list.
    pub fn filter_boards(&mut self, query: &str) -> BoardFilter {
        self.search_text = query.to_string();
        let filter = self.boards.filter(query);
        self.renderer.apply(RenderCommand::BoardList {
            boards: filter.boards().to_vec(),
            not_found: filter.is_not_found(),
        });
        filter
    }

    /// Creates an empty note on the active board at `position`.
    pub fn create_note(&mut self, position: Position) -> SessionResult<NoteId> {
        let board = self
            .boards
            .active()
            .cloned()
            .ok_or(SessionError::NoActiveBoard)?;
        let note = self
            .notes
            .create(
                &board,
                position,
                self.config.default_note_size,
                self.config.default_palette,
            )
            .clone();
        self.persist_notes()?;

        info!(
            "event=note_create module=session status=ok note_id={} board_id={} z_index={}",
            note.note_id, board.board_id, note.z_index
        );
        let note_id = note.note_id;
        self.renderer
            .apply(RenderCommand::Placeholder { visible: false });
        self.renderer.apply(RenderCommand::AddNote(note));
        Ok(note_id)
    }

    /// Replaces the title or body text of a note.
    pub fn update_note_field(
        &mut self,
        note_id: NoteId,
        field: NoteField,
        value: impl Into<String>,
    ) -> SessionResult<()> {
        let note = self.notes.update_field(note_id, field, value)?.clone();
        self.persist_notes()?;

        trace!(
            "event=note_edit module=session status=ok note_id={note_id} field={field:?} chars={}",
            match field {
                NoteField::Title => note.title.chars().count(),
                NoteField::Body => note.body.chars().count(),
            }
        );
        self.renderer.apply(RenderCommand::UpdateNote(note));
        Ok(())
    }

    /// Moves a note, clamped to the surface. Returns the stored position.
    pub fn move_note(&mut self, note_id: NoteId, position: Position) -> SessionResult<Position> {
        let surface = self.config.surface;
        let note = self.notes.move_to(note_id, position, surface)?.clone();
        self.persist_notes()?;

        trace!(
            "event=note_move module=session status=ok note_id={note_id} top={} left={}",
            note.position.top,
            note.position.left
        );
        let stored = note.position;
        self.renderer.apply(RenderCommand::UpdateNote(note));
        Ok(stored)
    }

    /// Stores an observed note size.
    pub fn resize_note(&mut self, note_id: NoteId, size: Size) -> SessionResult<()> {
        let note = self.notes.resize(note_id, size)?.clone();
        self.persist_notes()?;

        trace!(
            "event=note_resize module=session status=ok note_id={note_id} height={} width={}",
            size.height,
            size.width
        );
        self.renderer.apply(RenderCommand::UpdateNote(note));
        Ok(())
    }

    /// Brings a note to the front. Returns its new z-index.
    pub fn raise_note(&mut self, note_id: NoteId) -> SessionResult<i64> {
        let note = self.notes.raise(note_id)?.clone();
        self.persist_notes()?;

        debug!(
            "event=note_raise module=session status=ok note_id={note_id} z_index={}",
            note.z_index
        );
        let z_index = note.z_index;
        self.renderer.apply(RenderCommand::UpdateNote(note));
        Ok(z_index)
    }

    pub fn recolor_note(&mut self, note_id: NoteId, palette: Palette) -> SessionResult<()> {
        let note = self.notes.recolor(note_id, palette)?.clone();
        self.persist_notes()?;

        debug!(
            "event=note_recolor module=session status=ok note_id={note_id} palette={}",
            palette.as_str()
        );
        self.renderer.apply(RenderCommand::UpdateNote(note));
        Ok(())
    }

    /// Deletes a note after the confirmation prompt agrees.
    ///
    /// Returns `false` when the user declined; nothing changes then.
    pub fn delete_note(&mut self, note_id: NoteId) -> SessionResult<bool> {
        if self.notes.get(note_id).is_none() {
            return Err(SessionError::NoteNotFound(note_id));
        }
        if !self.confirm.confirm(DELETE_NOTE_PROMPT) {
            debug!("event=note_delete module=session status=declined note_id={note_id}");
            return Ok(false);
        }

        self.notes.remove(note_id)?;
        self.persist_notes()?;

        info!("event=note_delete module=session status=ok note_id={note_id}");
        self.renderer.apply(RenderCommand::RemoveNote(note_id));
        self.render_placeholder();
        Ok(true)
    }

    fn persist_after_board_change(&mut self, relinked: usize) -> SessionResult<()> {
        if relinked > 0 {
            self.persist_all()
        } else {
            self.persist_boards()
        }
    }

    fn persist_boards(&mut self) -> SessionResult<()> {
        let records: Vec<BoardRecord> = self.boards.boards().iter().map(BoardRecord::from).collect();
        save_collection(&mut self.store, BOARDS_KEY, &records)
            .map_err(|err| store_failure(BOARDS_KEY, err))
    }

    fn persist_notes(&mut self) -> SessionResult<()> {
        let records: Vec<NoteRecord> = self.notes.notes().iter().map(NoteRecord::from).collect();
        save_collection(&mut self.store, NOTES_KEY, &records)
            .map_err(|err| store_failure(NOTES_KEY, err))
    }

    fn persist_all(&mut self) -> SessionResult<()> {
        let boards: Vec<BoardRecord> = self.boards.boards().iter().map(BoardRecord::from).collect();
        let notes: Vec<NoteRecord> = self.notes.notes().iter().map(NoteRecord::from).collect();
        let entries = [
            (BOARDS_KEY, encode_collection(BOARDS_KEY, &boards)?),
            (NOTES_KEY, encode_collection(NOTES_KEY, &notes)?),
        ];
        self.store
            .set_many(&entries)
            .map_err(|err| store_failure("boards+notes", err))
    }

    fn render_board_list(&mut self) {
        self.renderer.apply(RenderCommand::BoardList {
            boards: self.boards.boards().to_vec(),
            not_found: false,
        });
    }

    fn render_active_board(&mut self) {
        let Some(board) = self.boards.active().cloned() else {
            self.renderer.apply(RenderCommand::ClearSurface);
            return;
        };
        let notes: Vec<Note> = self.notes.on_board(board.board_id).cloned().collect();
        let empty = notes.is_empty();
        self.renderer.apply(RenderCommand::ShowBoard { board, notes });
        self.renderer
            .apply(RenderCommand::Placeholder { visible: empty });
    }

    fn render_placeholder(&mut self) {
        let visible = self
            .boards
            .active()
            .is_some_and(|board| self.notes.count_on_board(board.board_id) == 0);
        self.renderer.apply(RenderCommand::Placeholder { visible });
    }
}

fn store_failure(key: &str, err: StoreError) -> SessionError {
    error!("event=store_write module=session status=error key={key} error={err}");
    SessionError::Store(err)
}
