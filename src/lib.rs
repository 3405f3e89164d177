//! # Nulz Mail Client
//! Asynchronous wrapper around the nulz mail disposable email HTTP API, providing simple methods to create, poll, and delete temporary inboxes from Rust using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who need throwaway addresses in integration tests, demos, or automation scripts without running mail infrastructure: configure with [`ClientBuilder`], obtain an address, wait for messages ([`Client::wait_for_message`]), then discard the inbox when done.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`, so ensure the chosen Tokio features (`rt-multi-thread` or `current_thread`) are available in your application. Authentication is an API key passed to the builder or read from `NULZ_API_KEY`.
//!
//! ## Out of scope
//! Not a general-purpose mail client, SMTP sender, or durable mailbox, and not a mail parser: [`Client::wait_for_message`] returns the raw message without extracting verification codes from it. It only proxies the nulz mail service and inherits its availability, spam filtering, and retention limits.
//!
//! ## Errors
//! All network calls surface transport failures as [`Error::Http`] and non-2xx statuses as [`Error::Api`], which carries the HTTP status plus the code/message the server put under its `error` key. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use nulzmail_client::{Client, WaitOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nulzmail_client::Error> {
//!     let client = Client::new()?;
//!     let inbox = client.create_inbox().await?;
//!     println!("Created: {}", inbox.address);
//!
//!     let msg = client.wait_for_message(&inbox.id, WaitOptions::default()).await?;
//!     println!("From: {}, Subject: {}", msg.from_addr, msg.subject);
//!
//!     client.delete_inbox(&inbox.id).await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod wait;

pub use client::{random_prefix, Client, ClientBuilder};
pub use error::Error;
pub use models::{Inbox, Message, MessageSummary, MessagesPage};
pub use wait::WaitOptions;

/// Result type alias for nulz mail operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
