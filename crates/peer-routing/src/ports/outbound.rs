//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces this crate **requires** from its host: a
//! fixed-output hash for deriving ids, and byte sinks for the write path.

use std::io::{self, BufWriter, Write};
use std::net::TcpStream;

/// Fixed-output hash used to derive an identity's id from its public key.
///
/// Every identity that shares a routing table must be produced by the same
/// hasher, otherwise ids differ in length and peers are silently ignored.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct Sha256Hasher;
///
/// impl IdentityHasher for Sha256Hasher {
///     fn hash(&self, public_key: &[u8]) -> Vec<u8> {
///         sha2::Sha256::digest(public_key).to_vec()
///     }
/// }
/// ```
pub trait IdentityHasher: Send + Sync {
    /// Hash a public key into an id.
    fn hash(&self, public_key: &[u8]) -> Vec<u8>;

    /// Length in bytes of every id this hasher produces.
    fn output_len(&self) -> usize;
}

/// A byte sink that frames can be written to.
///
/// Buffered sinks report their spare capacity so the framing layer can
/// flush pending bytes before a frame that would not fit. Unbuffered sinks
/// keep the defaults.
pub trait FrameSink: Write {
    /// Bytes held in an internal buffer, not yet handed to the OS.
    fn buffered(&self) -> usize {
        0
    }

    /// Bytes the internal buffer can still take without flushing.
    ///
    /// `None` for unbuffered sinks.
    fn available(&self) -> Option<usize> {
        None
    }

    /// Flush pending bytes if a `frame_len` byte frame would not fit.
    fn make_room(&mut self, frame_len: usize) -> io::Result<()> {
        match self.available() {
            Some(available) if self.buffered() > 0 && available < frame_len => self.flush(),
            _ => Ok(()),
        }
    }
}

impl<W: Write> FrameSink for BufWriter<W> {
    fn buffered(&self) -> usize {
        self.buffer().len()
    }

    fn available(&self) -> Option<usize> {
        Some(self.capacity() - self.buffer().len())
    }
}

impl FrameSink for TcpStream {}

impl FrameSink for Vec<u8> {}

impl FrameSink for io::Cursor<Vec<u8>> {}
