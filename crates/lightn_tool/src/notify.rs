//! Runtime notifications
//!
//! A running engine instance listens on a TCP port for short text messages from the tools, for
//! example to reload a resource that was just converted. There's no response or framing, the
//! message is the whole stream.

use crate::config::RuntimeEndpoint;
use log::*;
use std::{
    io::{self, Write},
    net::TcpStream,
};

/// Sends `message` to the engine at `endpoint`.
pub fn send_message(endpoint: &RuntimeEndpoint, message: &str) -> io::Result<()> {
    trace!("Connecting to {}:{}", endpoint.host, endpoint.port);
    let mut stream = TcpStream::connect((endpoint.host.as_str(), endpoint.port))?;
    stream.write_all(message.as_bytes())?;
    stream.flush()
}

/// Like [`send_message`], except failures are only logged. The engine not running is a perfectly
/// normal situation for the tools.
pub fn notify_runtime(endpoint: &RuntimeEndpoint, message: &str) -> bool {
    match send_message(endpoint, message) {
        Ok(()) => {
            debug!("Sent `{message}` to {}:{}", endpoint.host, endpoint.port);
            true
        }
        Err(err) => {
            warn!(
                "Couldn't notify the runtime at {}:{}: {err}",
                endpoint.host, endpoint.port
            );
            false
        }
    }
}
