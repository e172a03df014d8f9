//! Client connection handling
//!
//! One client owns one Unix-socket connection to the agent. A dedicated
//! transport thread performs the connect, then reads chunks, reassembles
//! them into lines, and hands complete lines to a channel the caller
//! drains with `receive`. Transport errors raised on that thread are
//! queued and surfaced on the caller's next `send` or `receive`.
//!
//! All suspension points are event-driven: `await_ready` waits on a
//! condvar signalled by the transport thread, `receive` blocks on the
//! line channel, and `send` blocks in the kernel write path. Nothing
//! sleeps and rechecks.

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::{Condvar, Mutex};

use crate::config::Config;
use crate::error::{AssuanError, Result};
use crate::protocol::{LineReassembler, LINE_TERMINATOR};

/// Connection lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection attempt yet
    Disconnected,

    /// Transport thread is establishing the connection
    Connecting,

    /// Connection established, exchanges may proceed
    Connected,

    /// Closed locally; every further operation fails
    Closed,
}

/// Client for one agent connection
///
/// The protocol is strictly half-duplex: callers must consume every
/// response line belonging to one exchange before sending the next
/// command. That sequencing is the caller's responsibility; the client
/// only orders lines within the connection.
///
/// No operation takes a timeout. A caller that needs one races the
/// blocked call against an external timer and invokes `close`, which
/// unblocks any pending `receive` with a closed error.
pub struct AssuanClient {
    shared: Arc<Shared>,

    /// Consumer side of the line channel fed by the transport thread
    lines_rx: Receiver<Vec<u8>>,
}

/// State shared with the transport thread
struct Shared {
    config: Config,

    /// Connection state flag, waited on via the condvar
    state: Mutex<ConnectionState>,
    state_changed: Condvar,

    /// Write half of the socket once connected
    writer: Mutex<Option<UnixStream>>,

    /// Producer side of the line channel; handed to the transport thread
    /// by `connect` so channel disconnect tracks thread exit
    lines_tx: Mutex<Option<Sender<Vec<u8>>>>,

    /// Transport errors awaiting observation by the next send/receive
    pending_errors: Mutex<VecDeque<AssuanError>>,
}

impl AssuanClient {
    /// Create a disconnected client
    pub fn new(config: Config) -> Self {
        let (lines_tx, lines_rx) = channel::unbounded();

        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(ConnectionState::Disconnected),
                state_changed: Condvar::new(),
                writer: Mutex::new(None),
                lines_tx: Mutex::new(Some(lines_tx)),
                pending_errors: Mutex::new(VecDeque::new()),
            }),
            lines_rx,
        }
    }

    /// Connect with default config and wait until ready (convenience)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let client = Self::new(Config::default());
        client.connect(path)?;
        client.await_ready()?;
        Ok(client)
    }

    /// Start connecting to the agent socket at `path`
    ///
    /// Returns once the transport thread is launched; the connection is
    /// established asynchronously. Use `await_ready` to wait for it. A
    /// client connects at most once, even if the attempt fails; there is
    /// no reconnect.
    pub fn connect(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();

        // The producer is only present before the first attempt.
        let lines_tx = match self.shared.lines_tx.lock().as_ref() {
            Some(tx) => tx.clone(),
            None => return Err(AssuanError::AlreadyConnected),
        };

        {
            let mut state = self.shared.state.lock();
            match *state {
                ConnectionState::Disconnected => *state = ConnectionState::Connecting,
                ConnectionState::Closed => return Err(AssuanError::Closed),
                _ => return Err(AssuanError::AlreadyConnected),
            }
        }

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("assuan-transport".to_string())
            .spawn(move || transport_main(shared, path, lines_tx));

        if let Err(e) = spawned {
            // Roll back so the failure is visible immediately rather
            // than as a connection that never becomes ready.
            *self.shared.state.lock() = ConnectionState::Disconnected;
            self.shared.state_changed.notify_all();
            return Err(AssuanError::Io(e));
        }

        // Hand-off complete: drop the stored producer so channel
        // disconnect tracks the transport thread's lifetime.
        self.shared.lines_tx.lock().take();

        Ok(())
    }

    /// Wait until the connection is established
    ///
    /// Suspends on the state condvar; the transport thread wakes it when
    /// the connect completes or fails. A failed connect returns the
    /// queued transport error.
    pub fn await_ready(&self) -> Result<()> {
        let mut state = self.shared.state.lock();
        while *state == ConnectionState::Connecting {
            self.shared.state_changed.wait(&mut state);
        }
        let outcome = *state;
        drop(state);

        match outcome {
            ConnectionState::Connected => Ok(()),
            ConnectionState::Closed => Err(AssuanError::Closed),
            _ => match self.take_pending_error() {
                Some(err) => Err(err),
                None => Err(AssuanError::NotConnected),
            },
        }
    }

    /// Send one encoded request line
    ///
    /// Any pending transport error is surfaced first. The line must not
    /// contain the terminator; it is appended here. The call blocks
    /// until the kernel accepts the write, so socket backpressure is
    /// respected rather than buffered away.
    pub fn send(&self, line: &[u8]) -> Result<()> {
        if let Some(err) = self.take_pending_error() {
            return Err(err);
        }
        self.check_connected()?;

        let mut framed = Vec::with_capacity(line.len() + 1);
        framed.extend_from_slice(line);
        framed.push(LINE_TERMINATOR);

        let mut writer = self.shared.writer.lock();
        let stream = writer.as_mut().ok_or(AssuanError::NotConnected)?;
        stream.write_all(&framed)?;
        stream.flush()?;

        tracing::trace!("Sent line ({} bytes)", line.len());
        Ok(())
    }

    /// Receive the oldest complete line from the peer
    ///
    /// Any pending transport error is surfaced first. Blocks until the
    /// transport thread delivers a line; there is no timeout, so an
    /// unresponsive peer suspends the caller until `close` is invoked
    /// from another thread.
    pub fn receive(&self) -> Result<Vec<u8>> {
        if let Some(err) = self.take_pending_error() {
            return Err(err);
        }
        self.check_connected()?;

        match self.lines_rx.recv() {
            Ok(line) => Ok(line),
            Err(_) => {
                // Transport thread is gone; report why.
                if let Some(err) = self.take_pending_error() {
                    return Err(err);
                }
                match self.state() {
                    ConnectionState::Closed => Err(AssuanError::Closed),
                    _ => Err(AssuanError::NotConnected),
                }
            }
        }
    }

    /// Close the connection
    ///
    /// Idempotent. Shuts the socket down, which wakes the transport
    /// thread and thereby unblocks any caller suspended in `receive`.
    /// Every subsequent operation fails with a closed error.
    pub fn close(&self) -> Result<()> {
        {
            let mut state = self.shared.state.lock();
            if *state == ConnectionState::Closed {
                return Ok(());
            }
            *state = ConnectionState::Closed;
            self.shared.state_changed.notify_all();
        }

        if let Some(stream) = self.shared.writer.lock().take() {
            // Both halves share the socket; shutdown interrupts the
            // transport thread's blocking read.
            let _ = stream.shutdown(Shutdown::Both);
        }

        // If connect was never called the producer is still parked
        // here; dropping it keeps receive from blocking forever.
        self.shared.lines_tx.lock().take();

        tracing::debug!("Client closed");
        Ok(())
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        *self.shared.state.lock()
    }

    /// Pop the oldest unobserved transport error, if any
    fn take_pending_error(&self) -> Option<AssuanError> {
        self.shared.pending_errors.lock().pop_front()
    }

    fn check_connected(&self) -> Result<()> {
        match self.state() {
            ConnectionState::Connected => Ok(()),
            ConnectionState::Closed => Err(AssuanError::Closed),
            _ => Err(AssuanError::NotConnected),
        }
    }
}

impl Drop for AssuanClient {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

// =============================================================================
// Transport Thread
// =============================================================================

/// Entry point of the transport thread
///
/// Establishes the connection, publishes the write half, flips the state
/// to Connected, then runs the read loop until the connection dies.
fn transport_main(shared: Arc<Shared>, path: PathBuf, lines_tx: Sender<Vec<u8>>) {
    let stream = match UnixStream::connect(&path) {
        Ok(stream) => stream,
        Err(e) => {
            shared.push_error(AssuanError::Transport(format!(
                "connect to {} failed: {}",
                path.display(),
                e
            )));
            shared.set_state(ConnectionState::Disconnected);
            return;
        }
    };

    // Separate read handle; the write half lives behind the client's lock.
    let read_stream = match stream.try_clone() {
        Ok(clone) => clone,
        Err(e) => {
            shared.push_error(AssuanError::Transport(format!(
                "failed to clone stream: {}",
                e
            )));
            shared.set_state(ConnectionState::Disconnected);
            return;
        }
    };

    {
        let mut state = shared.state.lock();
        if *state == ConnectionState::Closed {
            // close() won the race while we were connecting.
            return;
        }
        *shared.writer.lock() = Some(stream);
        *state = ConnectionState::Connected;
        shared.state_changed.notify_all();
    }

    tracing::debug!("Connected to agent at {}", path.display());
    read_loop(&shared, read_stream, lines_tx);
    tracing::debug!("Transport thread exiting");
}

/// Read chunks, reassemble lines, feed the line channel
///
/// Exits on EOF, read error, or framing error; the channel sender drops
/// with it, which wakes any receiver blocked on the channel.
fn read_loop(shared: &Shared, mut stream: UnixStream, lines_tx: Sender<Vec<u8>>) {
    let mut reassembler = LineReassembler::with_limit(shared.config.max_line_len);
    let mut chunk = vec![0u8; shared.config.read_buffer_size];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => {
                // After a local close this EOF is the expected wakeup,
                // not a peer failure.
                if shared.current_state() != ConnectionState::Closed {
                    shared.push_error(AssuanError::Transport(
                        "connection closed by peer".to_string(),
                    ));
                }
                return;
            }
            Ok(n) => match reassembler.feed(&chunk[..n]) {
                Ok(lines) => {
                    for line in lines {
                        tracing::trace!("Received line ({} bytes)", line.len());
                        if lines_tx.send(line).is_err() {
                            // Client side dropped; nobody is listening.
                            return;
                        }
                    }
                }
                Err(e) => {
                    shared.push_error(e);
                    return;
                }
            },
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                if shared.current_state() != ConnectionState::Closed {
                    shared.push_error(AssuanError::Transport(e.to_string()));
                }
                return;
            }
        }
    }
}

impl Shared {
    fn current_state(&self) -> ConnectionState {
        *self.state.lock()
    }

    fn set_state(&self, new_state: ConnectionState) {
        let mut state = self.state.lock();
        // Closed is terminal; never regress out of it.
        if *state != ConnectionState::Closed {
            *state = new_state;
        }
        self.state_changed.notify_all();
    }

    fn push_error(&self, err: AssuanError) {
        tracing::warn!("Transport error queued: {}", err);
        self.pending_errors.lock().push_back(err);
    }
}
