//! Blocking peer connection over any byte stream.

use std::io::{self, BufReader, BufWriter, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use parking_lot::Mutex;
use tracing::debug;

use crate::ports::FrameSink;
use crate::wire::framing::write_frame;
use crate::wire::{encode_frame, receive_message, FrameConfig, Message, TransportError};

/// One side of a framed connection.
///
/// Sending takes the write lock, so any number of threads may send through
/// a shared reference. Receiving takes the read lock; frames are read by one
/// thread at a time.
pub struct PeerConnection<R = BufReader<TcpStream>, W = BufWriter<TcpStream>> {
    reader: Mutex<R>,
    writer: Mutex<W>,
    config: FrameConfig,
    peer_addr: Option<SocketAddr>,
    stream: Option<TcpStream>,
}

impl PeerConnection {
    /// Split a TCP stream into a buffered read half and a buffered write half.
    pub fn from_tcp(stream: TcpStream, config: FrameConfig) -> io::Result<Self> {
        stream.set_nodelay(true)?;
        let peer_addr = stream.peer_addr().ok();

        let reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream.try_clone()?);

        debug!(peer = ?peer_addr, "connection opened");
        Ok(Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
            config,
            peer_addr,
            stream: Some(stream),
        })
    }

    /// Open a TCP connection to `address`.
    pub fn connect(address: &str, config: FrameConfig) -> io::Result<Self> {
        Self::from_tcp(TcpStream::connect(address)?, config)
    }
}

impl<R: Read, W: FrameSink> PeerConnection<R, W> {
    /// Wrap an arbitrary reader and writer.
    pub fn new(reader: R, writer: W, config: FrameConfig) -> Self {
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
            config,
            peer_addr: None,
            stream: None,
        }
    }

    /// Remote endpoint, when the connection runs over TCP.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer_addr
    }

    /// Framing limits in effect.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Send one message and flush it to the stream.
    ///
    /// The frame is written and flushed under a single hold of the write
    /// lock.
    pub fn send(&self, message: &Message) -> Result<(), TransportError> {
        let frame = encode_frame(message, &self.config)?;

        let mut writer = self.writer.lock();
        write_frame(&mut *writer, &frame, message.opcode)?;
        writer.flush()?;
        Ok(())
    }

    /// Block until the next message arrives.
    pub fn receive(&self) -> Result<Message, TransportError> {
        let mut reader = self.reader.lock();
        receive_message(&mut *reader, &self.config)
    }

    /// Shut down both directions of the underlying TCP stream.
    ///
    /// A thread blocked in [`receive`](Self::receive) wakes up with an I/O
    /// error. Connections not built from TCP are unaffected.
    pub fn shutdown(&self) -> io::Result<()> {
        match &self.stream {
            Some(stream) => {
                debug!(peer = ?self.peer_addr, "connection shut down");
                match stream.shutdown(Shutdown::Both) {
                    Err(err) if err.kind() != io::ErrorKind::NotConnected => Err(err),
                    _ => Ok(()),
                }
            }
            None => Ok(()),
        }
    }

    /// Take the writer back, e.g. to inspect what was sent.
    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }
}
