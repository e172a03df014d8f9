//! Network Module
//!
//! Unix-socket client transport.
//!
//! ## Architecture
//! - One connection per client, no pooling or multiplexing
//! - Dedicated transport thread: connect, read, reassemble, deliver
//! - Callers block on channel/condvar waits, woken by transport events

mod client;

pub use client::{AssuanClient, ConnectionState};
