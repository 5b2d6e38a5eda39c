//! Length-prefixed message framing over blocking streams.
//!
//! Frame layout:
//!
//! ```text
//! +----------------+----------------------------+
//! | length: u32 BE | serialized message payload |
//! +----------------+----------------------------+
//! ```

use std::io::{self, Read};

use parking_lot::Mutex;
use serde::{Deserialize, Deserializer};
use tracing::{trace, warn};

use super::codec;
use super::error::TransportError;
use super::message::Message;
use crate::ports::FrameSink;

/// Width of the length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Largest accepted payload. Larger messages must be chunked by the caller.
pub const MAX_MESSAGE_SIZE: usize = 4_000_000;

/// Framing limits.
///
/// The ceiling can be lowered but never raised above [`MAX_MESSAGE_SIZE`],
/// whether the config is built in code or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    #[serde(deserialize_with = "clamped_size")]
    max_message_size: usize,
}

fn clamped_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let size = usize::deserialize(deserializer)?;
    Ok(size.min(MAX_MESSAGE_SIZE))
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }
}

impl FrameConfig {
    /// Config with a lower payload ceiling; values above the protocol
    /// ceiling are clamped to it.
    pub fn with_max_message_size(max_message_size: usize) -> Self {
        Self {
            max_message_size: max_message_size.min(MAX_MESSAGE_SIZE),
        }
    }

    /// Payload ceiling in bytes (default and maximum: 4,000,000).
    pub fn max_message_size(&self) -> usize {
        self.max_message_size.min(MAX_MESSAGE_SIZE)
    }

    /// Validate a decoded length prefix.
    pub fn check_len(&self, size: u32) -> Result<usize, TransportError> {
        let size = size as usize;
        let max = self.max_message_size();
        if size == 0 {
            return Err(TransportError::EmptyMessage);
        }
        if size > max {
            return Err(TransportError::MessageTooLarge { size, max });
        }
        Ok(size)
    }
}

/// Encode `message` into a complete frame (length prefix included).
pub fn encode_frame(message: &Message, config: &FrameConfig) -> Result<Vec<u8>, TransportError> {
    let payload = codec::encode_with_limit(message, config.max_message_size())?;

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_LEN + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Write one frame to a sink the caller already holds exclusively.
///
/// A buffered sink is flushed first when the frame would not fit in its
/// remaining capacity. Partial writes are retried until every byte is
/// accepted or the sink reports an error.
pub fn write_message<W: FrameSink + ?Sized>(
    sink: &mut W,
    message: &Message,
    config: &FrameConfig,
) -> Result<(), TransportError> {
    let frame = encode_frame(message, config)?;
    write_frame(sink, &frame, message.opcode)
}

/// Write one frame under the connection's write lock.
///
/// Frames from concurrent senders sharing `writer` are never interleaved and
/// go out in lock acquisition order.
pub fn send_message<W: FrameSink>(
    writer: &Mutex<W>,
    message: &Message,
    config: &FrameConfig,
) -> Result<(), TransportError> {
    // Encode before taking the lock so senders only serialize on the I/O.
    let frame = encode_frame(message, config)?;

    let mut sink = writer.lock();
    write_frame(&mut *sink, &frame, message.opcode)
}

pub(crate) fn write_frame<W: FrameSink + ?Sized>(
    sink: &mut W,
    frame: &[u8],
    opcode: u16,
) -> Result<(), TransportError> {
    sink.make_room(frame.len())?;
    sink.write_all(frame).map_err(|err| {
        warn!(error = %err, "stream: failed to write entire buffer");
        err
    })?;

    trace!(bytes = frame.len(), opcode, "frame written");
    Ok(())
}

/// Read one frame and decode it into a validated [`Message`].
///
/// Blocks until a whole frame has arrived. End of stream before the first
/// header byte is a clean close ([`TransportError::is_closed`]); end of
/// stream anywhere later is [`TransportError::Truncated`]. Closing the
/// stream from another thread surfaces as [`TransportError::Io`].
pub fn receive_message<R: Read + ?Sized>(
    reader: &mut R,
    config: &FrameConfig,
) -> Result<Message, TransportError> {
    let mut header = [0u8; LENGTH_PREFIX_LEN];
    let read = read_full(reader, &mut header)?;
    check_header_read(read)?;

    let size = config.check_len(u32::from_be_bytes(header)).map_err(|err| {
        warn!(error = %err, "rejecting frame");
        err
    })?;

    let mut payload = vec![0u8; size];
    let read = read_full(reader, &mut payload)?;
    check_payload_read(read, size)?;

    Message::from_bytes(&payload).map_err(|err| {
        warn!(error = %err, size, "rejecting message");
        err
    })
}

/// Fill `buf` until it is full or the stream ends; returns the bytes read.
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// Classify a short header read.
pub(crate) fn check_header_read(read: usize) -> Result<(), TransportError> {
    match read {
        0 => Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
        LENGTH_PREFIX_LEN => Ok(()),
        _ => {
            let err = TransportError::Truncated {
                expected: LENGTH_PREFIX_LEN,
                received: read,
            };
            warn!(error = %err, "rejecting frame");
            Err(err)
        }
    }
}

/// Classify a short payload read.
pub(crate) fn check_payload_read(read: usize, size: usize) -> Result<(), TransportError> {
    if read < size {
        let err = TransportError::Truncated {
            expected: size,
            received: read,
        };
        warn!(error = %err, "rejecting frame");
        return Err(err);
    }
    Ok(())
}

/// Decode a single frame held in memory.
pub fn decode_frame(frame: &[u8], config: &FrameConfig) -> Result<Message, TransportError> {
    let mut reader = frame;
    receive_message(&mut reader, config)
}
