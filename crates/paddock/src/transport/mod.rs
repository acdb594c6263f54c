//! # Chat Transports
//!
//! A transport moves [`Inbound`] updates in and [`Outbound`] replies out.
//! The runtime is generic over [`ChatTransport`]:
//!
//! - [`TelegramTransport`]: Bot API long polling
//! - [`ConsoleTransport`]: one local user on stdin/stdout

pub mod console;
pub mod telegram;

use paddock_shared::{Inbound, Outbound};

use crate::error::TransportError;

pub use console::ConsoleTransport;
pub use telegram::TelegramTransport;

/// A chat platform connection.
#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    /// Waits for the next batch of updates.
    ///
    /// Returns `Ok(None)` once the transport has closed for good.
    ///
    /// # Errors
    ///
    /// Transient failures; the caller backs off and polls again.
    async fn poll(&mut self) -> Result<Option<Vec<Inbound>>, TransportError>;

    /// Delivers one reply.
    ///
    /// # Errors
    ///
    /// The reply could not be delivered.
    async fn send(&mut self, message: &Outbound) -> Result<(), TransportError>;

    /// Tells the platform a button press was received.
    ///
    /// # Errors
    ///
    /// The acknowledgement could not be delivered.
    async fn acknowledge(&mut self, callback_id: &str) -> Result<(), TransportError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
