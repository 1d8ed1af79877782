//! Process-wide session.
//!
//! A single shared [`Session`] behind a read-write lock, for programs that
//! parse their command line once at startup and query it from anywhere.
//! Queries may run concurrently with each other but not with [`parse`].
//! They return owned strings because the next [`parse`] replaces the session.

use parking_lot::{const_rwlock, RwLock};

use crate::args::{MemoryCapabilities, Session, StorageMode};

struct GlobalState {
    storage: StorageMode,
    session: Option<Session>,
}

static STATE: RwLock<GlobalState> = const_rwlock(GlobalState {
    storage: StorageMode::Static,
    session: None,
});

/// Select the storage mode used by the next [`parse`].
///
/// Dynamic storage is chosen only when all three capabilities are present.
pub fn configure_memory(caps: MemoryCapabilities) {
    STATE.write().storage = StorageMode::from_capabilities(caps);
}

/// Replace the process-wide session with a parse of `args`.
pub fn parse<I, S>(args: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut state = STATE.write();
    let storage = state.storage;
    if state.session.as_ref().map(Session::storage) != Some(storage) {
        state.session = Some(Session::with_storage(storage));
    }
    if let Some(session) = state.session.as_mut() {
        session.parse(args);
    }
}

/// Run `f` against the current session, if one exists.
///
/// The session stays read-locked while `f` runs, so `f` must not call back
/// into this module.
pub fn with_session<R>(f: impl FnOnce(&Session) -> R) -> Option<R> {
    STATE.read().session.as_ref().map(f)
}

pub fn program_name() -> Option<String> {
    with_session(|s| s.program_name().map(String::from)).flatten()
}

pub fn positional_count() -> usize {
    with_session(Session::positional_count).unwrap_or(0)
}

pub fn positional(index: usize) -> Option<String> {
    with_session(|s| s.positional(index).map(String::from)).flatten()
}

pub fn has_flag(name: &str) -> bool {
    with_session(|s| s.has_flag(name)).unwrap_or(false)
}

pub fn param(name: &str) -> Option<String> {
    with_session(|s| s.param(name).map(String::from)).flatten()
}

/// Drop the process-wide session and everything it loaded.
///
/// A static-storage session holds no heap memory and is left as is.
pub fn release() {
    let mut state = STATE.write();
    if state
        .session
        .as_ref()
        .is_some_and(|s| s.storage() == StorageMode::Static)
    {
        return;
    }
    state.session = None;
}
