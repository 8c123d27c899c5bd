use crate::bridge::Invoker;
use crate::constants::UNTITLED_PREFIX;
use crate::editor::{EditorApplication, EditorEvent, EditorId};
use crate::error::TrackerError;
use log::{debug, error, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// The two outbound notification kinds, each with at most one registered
/// callback identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    FrontChanged,
    FileSaved,
}

#[derive(Default)]
struct CallbackRegistry {
    front_changed: Option<String>,
    file_saved: Option<String>,
}

impl CallbackRegistry {
    fn set(&mut self, kind: NotificationKind, function: Option<String>) {
        match kind {
            NotificationKind::FrontChanged => self.front_changed = function,
            NotificationKind::FileSaved => self.file_saved = function,
        }
    }

    fn get(&self, kind: NotificationKind) -> Option<&str> {
        match kind {
            NotificationKind::FrontChanged => self.front_changed.as_deref(),
            NotificationKind::FileSaved => self.file_saved.as_deref(),
        }
    }
}

/// Live registration linking one open editor to the tracker. Created when an
/// editor opens, disposed exactly once when it closes or the tracker
/// detaches; disposal deregisters synchronously rather than waiting for the
/// handle to be dropped.
struct Subscription {
    app: Arc<dyn EditorApplication>,
    editor: EditorId,
    disposed: bool,
}

impl Subscription {
    fn new(app: Arc<dyn EditorApplication>, editor: EditorId) -> Self {
        app.add_editor_listener(editor);
        Self {
            app,
            editor,
            disposed: false,
        }
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.app.remove_editor_listener(self.editor);
            self.disposed = true;
        }
    }
}

/// Tracks which file is frontmost in the host editor and notifies registered
/// callbacks on genuine changes.
///
/// The tracker de-duplicates the host's noisy activation stream: activating
/// the file that is already frontmost, or renaming it to its current name,
/// produces nothing. Placeholder buffers (never-saved `untitled…` names)
/// update the tracked state but are never forwarded, so a later activation
/// of a real file still fires.
///
/// Single-threaded by design: all entry points are expected to be called
/// from the host's event dispatch thread.
pub struct FrontFileTracker {
    app: Option<Arc<dyn EditorApplication>>,
    invoker: Arc<dyn Invoker>,
    subscriptions: HashMap<EditorId, Subscription>,
    last_front_path: String,
    callbacks: CallbackRegistry,
}

impl FrontFileTracker {
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self {
            app: None,
            invoker,
            subscriptions: HashMap::new(),
            last_front_path: String::new(),
            callbacks: CallbackRegistry::default(),
        }
    }

    /// Attach to an editor application and begin tracking.
    ///
    /// Enumerates the editors currently open and subscribes to each, then
    /// seeds the front-file state from whichever editor the host reports as
    /// active — without emitting a notification for that initial state.
    /// On [`TrackerError::HostUnavailable`] the tracker remains detached.
    pub fn attach(&mut self, app: Arc<dyn EditorApplication>) -> Result<(), TrackerError> {
        if self.app.is_some() {
            self.detach();
        }

        let open = app.list_open_editors()?;
        app.add_global_listener();
        for editor in open {
            self.subscriptions
                .insert(editor, Subscription::new(Arc::clone(&app), editor));
        }

        if let Some(active) = app.active_editor() {
            self.last_front_path = app.path(active).unwrap_or_default();
            debug!("initial front editor file: {}", self.last_front_path);
        }

        self.app = Some(app);
        Ok(())
    }

    /// Stop tracking and dispose every live subscription.
    ///
    /// No-op when already detached.
    pub fn detach(&mut self) {
        let Some(app) = self.app.take() else {
            return;
        };
        app.remove_global_listener();
        for (_, mut subscription) in self.subscriptions.drain() {
            subscription.dispose();
        }
        self.last_front_path.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.app.is_some()
    }

    /// Register the callback identifier for a notification kind, replacing
    /// any previous registration. `None` clears it; an unset kind drops its
    /// notifications.
    pub fn set_callback(&mut self, kind: NotificationKind, function: Option<&str>) {
        self.callbacks.set(kind, function.map(str::to_string));
    }

    /// Host entry point: a new editor was opened.
    pub fn on_editor_opened(&mut self, editor: EditorId) {
        let Some(app) = &self.app else {
            return;
        };
        let subscription = Subscription::new(Arc::clone(app), editor);
        if let Some(mut previous) = self.subscriptions.insert(editor, subscription) {
            previous.dispose();
        }
    }

    /// Host entry point: an editor was closed.
    pub fn on_editor_closed(&mut self, editor: EditorId) {
        if let Some(mut subscription) = self.subscriptions.remove(&editor) {
            subscription.dispose();
        }
    }

    /// Host entry point: a per-editor event.
    ///
    /// Events for editors without a live subscription (closed, or opened
    /// before a re-attach) are dropped without error.
    pub fn on_editor_event(&mut self, editor: EditorId, event: EditorEvent) {
        let Some(app) = self.app.clone() else {
            return;
        };
        if !self.subscriptions.contains_key(&editor) {
            debug!("event {event:?} for untracked editor {editor:?}; dropping");
            return;
        }
        if event != EditorEvent::DebugModeChanged {
            // debug-mode changes are too noisy; suppress them.
            debug!("editor {editor:?}: {event:?}");
        }

        match event {
            EditorEvent::Activated | EditorEvent::Renamed => {
                // The host may have forgotten the editor while our
                // subscription is still live; without a path there is no
                // front-file transition to report.
                if let Some(path) = app.path(editor) {
                    self.new_front_file(path);
                }
            }
            EditorEvent::Closed => {
                self.on_editor_closed(editor);
            }
            EditorEvent::DirtyStateChanged => {
                // A transition to clean means the file was just saved.
                if app.is_dirty(editor) == Some(false) {
                    if let Some(path) = app.path(editor) {
                        self.fire_file_saved(&path);
                    }
                }
            }
            EditorEvent::AutosaveOptionsChanged
            | EditorEvent::DebugModeChanged
            | EditorEvent::Autosaved => {}
            EditorEvent::Other(name) => {
                warn!("unrecognized editor event: {name}: {editor:?}");
            }
        }
    }

    fn new_front_file(&mut self, path: String) {
        if path == self.last_front_path {
            // No change; no need to raise an event
            return;
        }
        self.last_front_path = path.clone();
        if path.starts_with(UNTITLED_PREFIX) {
            // Placeholder buffer: track it so the next real file still
            // registers as a change, but never forward it.
            return;
        }
        self.fire_front_file_changed(&path);
    }

    fn fire_front_file_changed(&self, path: &str) {
        self.fire_file_event(NotificationKind::FrontChanged, path);
    }

    fn fire_file_saved(&self, path: &str) {
        self.fire_file_event(NotificationKind::FileSaved, path);
    }

    fn fire_file_event(&self, kind: NotificationKind, path: &str) {
        let Some(function) = self.callbacks.get(kind) else {
            return;
        };
        if let Err(err) = self.invoker.invoke(function, &[path.to_string()]) {
            error!("callback {function} failed for {kind:?} ({path}): {err}");
        }
    }
}
