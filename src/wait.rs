//! Polling helper that waits for a message to arrive in an inbox.

use crate::error::Error;
use crate::models::Message;
use crate::{Client, Result};
use std::time::Duration;
use tokio::time::{sleep, Instant};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Options for [`Client::wait_for_message`].
///
/// Zero durations fall back to the defaults (2 second poll interval,
/// 60 second timeout).
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Delay between empty polls.
    pub poll_interval: Duration,
    /// Overall deadline for a message to appear.
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

impl Client {
    /// Wait until the inbox holds at least one message and return it.
    ///
    /// Lists the inbox every [`WaitOptions::poll_interval`] until a message
    /// appears, then fetches the newest one by id and returns it. When that
    /// fetch fails the listing entry is returned instead, without bodies.
    /// This does not inspect message content; extracting a verification code
    /// from the subject or body is up to the caller.
    ///
    /// Once [`WaitOptions::timeout`] elapses with the inbox still empty, the
    /// call fails with a synthetic 408 [`Error::Api`]; see
    /// [`Error::is_wait_timeout`]. To abandon the wait early, drop the
    /// future (e.g. via `tokio::select!` or `tokio::time::timeout`); it only
    /// suspends in a cancel-safe sleep.
    ///
    /// # Arguments
    /// * `inbox_id` - Identifier from [`Inbox`](crate::Inbox)
    /// * `options` - Poll interval and deadline; `WaitOptions::default()`
    ///   polls every 2 seconds for up to a minute
    ///
    /// # Examples
    /// ```no_run
    /// # use nulzmail_client::{Client, WaitOptions};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), nulzmail_client::Error> {
    /// let client = Client::new()?;
    /// let inbox = client.create_inbox().await?;
    /// let msg = client.wait_for_message(&inbox.id, WaitOptions::default()).await?;
    /// println!("{}: {}", msg.from_addr, msg.subject);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn wait_for_message(&self, inbox_id: &str, options: WaitOptions) -> Result<Message> {
        let poll_interval = if options.poll_interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            options.poll_interval
        };
        let timeout = if options.timeout.is_zero() {
            DEFAULT_WAIT_TIMEOUT
        } else {
            options.timeout
        };

        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let page = self.list_messages(inbox_id, None).await?;
            tracing::debug!(
                inbox_id,
                count = page.messages.len(),
                "polled inbox for messages"
            );

            // Newest message first; fall back to the listing entry when the
            // full fetch fails.
            if let Some(summary) = page.messages.into_iter().next() {
                return match self.get_message(&summary.id).await {
                    Ok(full) => Ok(full),
                    Err(err) => {
                        tracing::debug!(
                            message_id = %summary.id,
                            error = %err,
                            "full fetch failed, returning listing entry"
                        );
                        Ok(Message::from(summary))
                    }
                };
            }

            sleep(poll_interval).await;
        }

        Err(Error::wait_timeout())
    }
}
