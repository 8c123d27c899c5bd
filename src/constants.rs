/// Prefix the host assigns to editor buffers that have never been saved to a
/// real file location ("untitled1", "untitled2", ...). Activations of such
/// placeholder buffers update tracking state but are never forwarded.
pub const UNTITLED_PREFIX: &str = "untitled";

/// Maximum bridge frame size in bytes (1 MiB), matching the host bridge's
/// message limit.
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;
