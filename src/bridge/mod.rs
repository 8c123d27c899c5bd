use crate::constants::MAX_FRAME_SIZE;
use crate::error::InvokeError;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::sync::Mutex;

/// Messages exchanged with the invocation host.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum BridgeMessage {
    #[serde(rename = "invoke")]
    Invoke { function: String, args: Vec<String> },
}

/// Outbound invocation boundary.
///
/// Invocations are fire-and-forget from the tracker's point of view: the
/// tracker logs failures and keeps going, so implementations should report
/// errors rather than retry internally.
pub trait Invoker {
    fn invoke(&self, function: &str, args: &[String]) -> Result<(), InvokeError>;
}

/// `Invoker` that frames each invocation as a length-prefixed JSON message
/// on a byte stream (stdout pipe, socket, file).
pub struct FrameInvoker<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> FrameInvoker<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the invoker and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, InvokeError> {
        self.writer
            .into_inner()
            .map_err(|_| InvokeError::LockPoisoned)
    }

    fn write_message(&self, message: &BridgeMessage) -> Result<(), InvokeError> {
        let json = serde_json::to_vec(message)?;
        if json.len() > MAX_FRAME_SIZE {
            return Err(InvokeError::FrameTooLarge {
                len: json.len(),
                max: MAX_FRAME_SIZE,
            });
        }
        // The frame cap keeps this conversion from overflowing.
        let len =
            u32::try_from(json.len()).map_err(|_| InvokeError::FrameTooLarge {
                len: json.len(),
                max: MAX_FRAME_SIZE,
            })?;

        let mut writer = self.writer.lock().map_err(|_| InvokeError::LockPoisoned)?;
        // The bridge protocol specifies little-endian byte order
        writer.write_all(&len.to_le_bytes())?;
        writer.write_all(&json)?;
        writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Invoker for FrameInvoker<W> {
    fn invoke(&self, function: &str, args: &[String]) -> Result<(), InvokeError> {
        self.write_message(&BridgeMessage::Invoke {
            function: function.to_string(),
            args: args.to_vec(),
        })
    }
}

/// Decode one length-prefixed JSON frame, enforcing the same size cap as the
/// outbound path.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<BridgeMessage, InvokeError> {
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = u32::from_le_bytes(len_bytes);
    let len = usize::try_from(len).map_err(|_| InvokeError::FrameTooLarge {
        len: usize::MAX,
        max: MAX_FRAME_SIZE,
    })?;

    if len > MAX_FRAME_SIZE {
        return Err(InvokeError::FrameTooLarge {
            len,
            max: MAX_FRAME_SIZE,
        });
    }

    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;
    Ok(serde_json::from_slice(&buffer)?)
}
