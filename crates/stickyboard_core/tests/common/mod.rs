#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use stickyboard_core::{
    BoardSession, ConfirmPrompt, KeyValueStore, MemoryKeyValueStore, RecordingRenderer,
    RenderCommand, SessionConfig, StoreError, StoreResult, Surface,
};

pub type TestSession<S = MemoryKeyValueStore> = BoardSession<S, RecordingRenderer, ScriptedConfirm>;

/// Confirmation prompt whose answer tests can change after handing it over.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirm {
    answer: Rc<Cell<bool>>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        let confirm = Self::default();
        confirm.set_answer(answer);
        confirm
    }

    pub fn set_answer(&self, answer: bool) {
        self.answer.set(answer);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl ConfirmPrompt for ScriptedConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer.get()
    }
}

/// In-memory store whose writes can be made to fail after it was handed over.
#[derive(Debug, Clone, Default)]
pub struct SwitchableStore {
    inner: MemoryKeyValueStore,
    failing: Rc<Cell<bool>>,
}

impl SwitchableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that toggles write failures on every clone of this store.
    pub fn switch(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.failing)
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.inner.raw(key)
    }

    fn check_writable(&self, key: &str) -> StoreResult<()> {
        if self.failing.get() {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                limit_bytes: 0,
            });
        }
        Ok(())
    }
}

impl KeyValueStore for SwitchableStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.check_writable(key)?;
        self.inner.set(key, value)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> StoreResult<()> {
        let first_key = entries.first().map_or("", |(key, _)| *key);
        self.check_writable(first_key)?;
        self.inner.set_many(entries)
    }
}

pub fn test_config() -> SessionConfig {
    SessionConfig {
        surface: Surface::new(1000.0, 800.0),
        ..SessionConfig::default()
    }
}

pub fn open_with_store<S: KeyValueStore>(store: S, confirm: ScriptedConfirm) -> TestSession<S> {
    BoardSession::open(store, RecordingRenderer::new(), confirm, test_config()).unwrap()
}

pub fn open_session() -> (TestSession, ScriptedConfirm) {
    let confirm = ScriptedConfirm::answering(true);
    let session = open_with_store(MemoryKeyValueStore::new(), confirm.clone());
    (session, confirm)
}

/// Drops recorded commands so assertions only see what follows.
pub fn clear_commands<S: KeyValueStore>(session: &mut TestSession<S>) {
    session.renderer_mut().take();
}

pub fn commands<S: KeyValueStore>(session: &TestSession<S>) -> Vec<RenderCommand> {
    session.renderer().commands().to_vec()
}

pub fn active_note_titles<S: KeyValueStore>(session: &TestSession<S>) -> Vec<String> {
    session
        .active_notes()
        .into_iter()
        .map(|note| note.title.clone())
        .collect()
}
