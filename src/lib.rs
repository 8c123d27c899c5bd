//! Tracks which file is frontmost in a host editor application and raises
//! de-duplicated notifications — "front file changed" and "file saved" — to
//! externally registered callbacks.
//!
//! The host editor and the outbound invocation channel are both injected
//! collaborators ([`editor::EditorApplication`] and [`bridge::Invoker`]),
//! so the tracker itself stays a pure, single-threaded state machine.

pub mod bridge;
pub mod constants;
pub mod editor;
pub mod error;
#[cfg(test)]
mod test_utils;
pub mod tracker;

pub use bridge::{BridgeMessage, FrameInvoker, Invoker};
pub use editor::{EditorApplication, EditorEvent, EditorId};
pub use error::{InvokeError, TrackerError};
pub use tracker::{FrontFileTracker, NotificationKind};
