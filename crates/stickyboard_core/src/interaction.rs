//! Pointer interaction state machine.
//!
//! # Responsibility
//! - Translate host input callbacks (press, move, release, click,
//!   double-click, size observation) into session use-cases.
//! - Track the active drag gesture.
//!
//! # Invariants
//! - Drag deltas are measured from the previous pointer sample, never from
//!   the drag origin.
//! - A note is raised when its drag starts, before any movement.
//! - Each move completes (clamp + persist) before the next one is handled.

use crate::confirm::ConfirmPrompt;
use crate::geometry::{apply_delta, pointer_delta, Point, Position, Size};
use crate::model::note::NoteId;
use crate::render::RenderAdapter;
use crate::service::session::{BoardSession, SessionResult};
use crate::store::KeyValueStore;
use log::debug;

/// Gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        note_id: NoteId,
        last_pointer: Point,
        moved: bool,
    },
    /// Last event was a size observation for `note_id`.
    Resizing { note_id: NoteId },
}

/// Where a double-click landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoubleClickTarget {
    /// Empty board surface at the given pointer.
    Surface(Point),
    /// An existing note; never creates anything.
    Note(NoteId),
}

/// Drives a `BoardSession` from raw input events.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
    suppress_click: Option<NoteId>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging { .. })
    }

    /// Press on a note's drag handle: raise it and start dragging.
    pub fn on_drag_handle_down<S, R, C>(
        &mut self,
        session: &mut BoardSession<S, R, C>,
        note_id: NoteId,
        pointer: Point,
    ) -> SessionResult<()>
    where
        S: KeyValueStore,
        R: RenderAdapter,
        C: ConfirmPrompt,
    {
        session.raise_note(note_id)?;
        self.state = InteractionState::Dragging {
            note_id,
            last_pointer: pointer,
            moved: false,
        };
        self.suppress_click = None;
        debug!("event=drag_start module=interaction status=ok note_id={note_id}");
        Ok(())
    }

    /// Pointer move. Returns the stored position while dragging.
    pub fn on_pointer_move<S, R, C>(
        &mut self,
        session: &mut BoardSession<S, R, C>,
        pointer: Point,
    ) -> SessionResult<Option<Position>>
    where
        S: KeyValueStore,
        R: RenderAdapter,
        C: ConfirmPrompt,
    {
        let InteractionState::Dragging {
            note_id,
            last_pointer,
            moved,
        } = self.state
        else {
            return Ok(None);
        };

        let Some(current) = session.note(note_id).map(|note| note.position) else {
            self.state = InteractionState::Idle;
            return Ok(None);
        };
        let delta = pointer_delta(last_pointer, pointer);
        let result = session.move_note(note_id, apply_delta(current, delta));
        // A failed write keeps the in-memory move, so the pointer sample
        // must advance either way.
        let stored = session.note(note_id).map_or(current, |note| note.position);
        self.state = InteractionState::Dragging {
            note_id,
            last_pointer: pointer,
            moved: moved || stored != current,
        };
        result.map(Some)
    }

    /// Pointer release ends any drag.
    pub fn on_pointer_up(&mut self) {
        if let InteractionState::Dragging { note_id, moved, .. } = self.state {
            if moved {
                self.suppress_click = Some(note_id);
            }
            debug!("event=drag_end module=interaction status=ok note_id={note_id} moved={moved}");
        }
        self.state = InteractionState::Idle;
    }

    /// Click on a note body. Raises it unless it concludes a real drag.
    ///
    /// Returns the new z-index when the note was raised.
    pub fn on_click<S, R, C>(
        &mut self,
        session: &mut BoardSession<S, R, C>,
        note_id: NoteId,
    ) -> SessionResult<Option<i64>>
    where
        S: KeyValueStore,
        R: RenderAdapter,
        C: ConfirmPrompt,
    {
        if self.suppress_click.take() == Some(note_id) {
            return Ok(None);
        }
        session.raise_note(note_id).map(Some)
    }

    /// Double-click. Creates a note only when it landed on the surface.
    pub fn on_double_click<S, R, C>(
        &mut self,
        session: &mut BoardSession<S, R, C>,
        target: DoubleClickTarget,
    ) -> SessionResult<Option<NoteId>>
    where
        S: KeyValueStore,
        R: RenderAdapter,
        C: ConfirmPrompt,
    {
        match target {
            DoubleClickTarget::Surface(pointer) => session
                .create_note(Position::at_pointer(pointer))
                .map(Some),
            DoubleClickTarget::Note(_) => Ok(None),
        }
    }

    /// Size observation reported by the renderer for a note element.
    pub fn on_size_observed<S, R, C>(
        &mut self,
        session: &mut BoardSession<S, R, C>,
        note_id: NoteId,
        size: Size,
    ) -> SessionResult<()>
    where
        S: KeyValueStore,
        R: RenderAdapter,
        C: ConfirmPrompt,
    {
        if session.note(note_id).is_some_and(|note| note.size == size) {
            return Ok(());
        }
        session.resize_note(note_id, size)?;
        if !self.is_dragging() {
            self.state = InteractionState::Resizing { note_id };
        }
        Ok(())
    }
}
