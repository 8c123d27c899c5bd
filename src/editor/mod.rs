use crate::error::TrackerError;

/// Opaque identity of one open document in the host editor.
///
/// The host assigns identities; the tracker never interprets them beyond
/// equality and hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(pub u64);

/// Per-editor events delivered by the host's dispatch thread.
///
/// The host's native event stream is string-keyed; unrecognized names map to
/// `Other` so the tracker can report them without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    Activated,
    Renamed,
    Closed,
    DirtyStateChanged,
    AutosaveOptionsChanged,
    DebugModeChanged,
    Autosaved,
    Other(String),
}

impl EditorEvent {
    /// Map a host event name to its variant. Unknown names become `Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ACTIVATED" => Self::Activated,
            "RENAMED" => Self::Renamed,
            "CLOSED" => Self::Closed,
            "DIRTY_STATE_CHANGED" => Self::DirtyStateChanged,
            "AUTOSAVE_OPTIONS_CHANGED" => Self::AutosaveOptionsChanged,
            "DEBUG_MODE_CHANGED" => Self::DebugModeChanged,
            "AUTOSAVED" => Self::Autosaved,
            other => Self::Other(other.to_string()),
        }
    }
}

/// The host editor application, injected at attach time.
///
/// Queries are pull-based; event delivery is push-based and single-threaded:
/// the host calls the tracker's `on_editor_opened` / `on_editor_closed` /
/// `on_editor_event` entry points synchronously on its dispatch thread.
/// The listener registration methods exist so the host knows whether anyone
/// is interested; a well-behaved host stops delivering events once the
/// corresponding listener is removed.
pub trait EditorApplication {
    /// Enumerate all currently open editors.
    ///
    /// Errors with [`TrackerError::HostUnavailable`] when no host connection
    /// exists; callers retry later.
    fn list_open_editors(&self) -> Result<Vec<EditorId>, TrackerError>;

    /// The editor the host currently reports as frontmost, if any.
    fn active_editor(&self) -> Option<EditorId>;

    /// Display path for an editor; `None` once the host has forgotten it.
    fn path(&self, editor: EditorId) -> Option<String>;

    /// Dirty flag for an editor; `None` once the host has forgotten it.
    fn is_dirty(&self, editor: EditorId) -> Option<bool>;

    fn add_global_listener(&self);
    fn remove_global_listener(&self);

    fn add_editor_listener(&self, editor: EditorId);
    fn remove_editor_listener(&self, editor: EditorId);
}
