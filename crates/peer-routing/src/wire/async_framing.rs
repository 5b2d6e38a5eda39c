//! Length-prefixed message framing over tokio streams.
//!
//! Same frame layout and limits as the blocking [`framing`](super::framing)
//! module.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{trace, warn};

use super::error::TransportError;
use super::framing::{
    check_header_read, check_payload_read, encode_frame, FrameConfig, LENGTH_PREFIX_LEN,
};
use super::message::Message;

/// Write one frame under the connection's write lock and flush it.
pub async fn send_message_async<W: AsyncWrite + Unpin>(
    writer: &Mutex<W>,
    message: &Message,
    config: &FrameConfig,
) -> Result<(), TransportError> {
    let frame = encode_frame(message, config)?;

    let mut sink = writer.lock().await;
    if let Err(err) = sink.write_all(&frame).await {
        warn!(error = %err, "stream: failed to write entire buffer");
        return Err(err.into());
    }
    sink.flush().await?;

    trace!(bytes = frame.len(), opcode = message.opcode, "frame written");
    Ok(())
}

/// Read one frame and decode it into a validated [`Message`].
///
/// End of stream is classified the same way as in
/// [`receive_message`](super::receive_message).
pub async fn receive_message_async<R: AsyncRead + Unpin>(
    reader: &mut R,
    config: &FrameConfig,
) -> Result<Message, TransportError> {
    let mut header = [0u8; LENGTH_PREFIX_LEN];
    let read = read_full(reader, &mut header).await?;
    check_header_read(read)?;

    let size = config.check_len(u32::from_be_bytes(header)).map_err(|err| {
        warn!(error = %err, "rejecting frame");
        err
    })?;

    let mut payload = vec![0u8; size];
    let read = read_full(reader, &mut payload).await?;
    check_payload_read(read, size)?;

    Message::from_bytes(&payload).map_err(|err| {
        warn!(error = %err, size, "rejecting message");
        err
    })
}

async fn read_full<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
