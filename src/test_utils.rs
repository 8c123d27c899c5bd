//! Shared test doubles for the tracker's two collaborator boundaries.

#![cfg(test)]

use crate::bridge::Invoker;
use crate::editor::{EditorApplication, EditorId};
use crate::error::{InvokeError, TrackerError};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};

struct FakeEditor {
    path: String,
    dirty: bool,
}

#[derive(Default)]
struct FakeEditorAppState {
    available: bool,
    next_id: u64,
    editors: HashMap<EditorId, FakeEditor>,
    active: Option<EditorId>,
    global_listeners: usize,
    editor_listeners: HashSet<EditorId>,
}

/// In-memory editor application double. Listener registrations are recorded
/// so tests can assert subscriptions are paired 1:1 with open/close.
pub struct FakeEditorApp {
    state: Mutex<FakeEditorAppState>,
}

impl FakeEditorApp {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeEditorAppState {
                available: true,
                ..FakeEditorAppState::default()
            }),
        })
    }

    /// A host that cannot be reached: enumeration fails and attach is
    /// expected to leave the tracker detached.
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeEditorAppState::default()),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeEditorAppState> {
        self.state.lock().expect("FakeEditorApp mutex poisoned")
    }

    pub fn open(&self, path: &str) -> EditorId {
        let mut state = self.lock();
        state.next_id += 1;
        let id = EditorId(state.next_id);
        state.editors.insert(
            id,
            FakeEditor {
                path: path.to_string(),
                dirty: false,
            },
        );
        id
    }

    pub fn close(&self, editor: EditorId) {
        let mut state = self.lock();
        state.editors.remove(&editor);
        if state.active == Some(editor) {
            state.active = None;
        }
    }

    pub fn rename(&self, editor: EditorId, path: &str) {
        if let Some(fake) = self.lock().editors.get_mut(&editor) {
            fake.path = path.to_string();
        }
    }

    pub fn set_dirty(&self, editor: EditorId, dirty: bool) {
        if let Some(fake) = self.lock().editors.get_mut(&editor) {
            fake.dirty = dirty;
        }
    }

    pub fn set_active(&self, editor: EditorId) {
        self.lock().active = Some(editor);
    }

    pub fn has_global_listener(&self) -> bool {
        self.lock().global_listeners > 0
    }

    pub fn has_editor_listener(&self, editor: EditorId) -> bool {
        self.lock().editor_listeners.contains(&editor)
    }

    pub fn editor_listener_count(&self) -> usize {
        self.lock().editor_listeners.len()
    }
}

impl EditorApplication for FakeEditorApp {
    fn list_open_editors(&self) -> Result<Vec<EditorId>, TrackerError> {
        let state = self.lock();
        if !state.available {
            return Err(TrackerError::HostUnavailable);
        }
        let mut editors: Vec<EditorId> = state.editors.keys().copied().collect();
        editors.sort();
        Ok(editors)
    }

    fn active_editor(&self) -> Option<EditorId> {
        self.lock().active
    }

    fn path(&self, editor: EditorId) -> Option<String> {
        self.lock().editors.get(&editor).map(|e| e.path.clone())
    }

    fn is_dirty(&self, editor: EditorId) -> Option<bool> {
        self.lock().editors.get(&editor).map(|e| e.dirty)
    }

    fn add_global_listener(&self) {
        self.lock().global_listeners += 1;
    }

    fn remove_global_listener(&self) {
        let mut state = self.lock();
        state.global_listeners = state.global_listeners.saturating_sub(1);
    }

    fn add_editor_listener(&self, editor: EditorId) {
        self.lock().editor_listeners.insert(editor);
    }

    fn remove_editor_listener(&self, editor: EditorId) {
        self.lock().editor_listeners.remove(&editor);
    }
}

/// Coerce a concrete fixture handle to the trait object the tracker takes.
/// `Arc::clone` alone cannot do this at the call site: the expected
/// `Arc<dyn EditorApplication>` fixes its generic parameter before the
/// unsized coercion gets a chance to apply.
pub fn as_app(app: &Arc<FakeEditorApp>) -> Arc<dyn EditorApplication> {
    let concrete: Arc<FakeEditorApp> = Arc::clone(app);
    concrete
}

/// See [`as_app`]; same coercion for the invoker boundary.
pub fn as_invoker(invoker: &Arc<RecordingInvoker>) -> Arc<dyn Invoker> {
    let concrete: Arc<RecordingInvoker> = Arc::clone(invoker);
    concrete
}

/// Invoker double that records every invocation, optionally failing each
/// call until told otherwise.
pub struct RecordingInvoker {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    fail: Mutex<bool>,
}

impl RecordingInvoker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: Mutex::new(false),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: Mutex::new(true),
        })
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().expect("RecordingInvoker mutex poisoned") = fail;
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls
            .lock()
            .expect("RecordingInvoker mutex poisoned")
            .clone()
    }
}

impl Invoker for RecordingInvoker {
    fn invoke(&self, function: &str, args: &[String]) -> Result<(), InvokeError> {
        if *self.fail.lock().expect("RecordingInvoker mutex poisoned") {
            return Err(InvokeError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "simulated invocation failure",
            )));
        }
        self.calls
            .lock()
            .expect("RecordingInvoker mutex poisoned")
            .push((function.to_string(), args.to_vec()));
        Ok(())
    }
}
