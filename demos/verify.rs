//! Create an inbox and wait for the first incoming message.
//!
//! Needs `NULZ_API_KEY` in the environment. Set `RUST_LOG=debug` to watch
//! the poll loop.

use nulzmail_client::{Client, WaitOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if std::env::var("NULZ_API_KEY").unwrap_or_default().is_empty() {
        eprintln!("set NULZ_API_KEY");
        std::process::exit(1);
    }

    let client = Client::new()?;

    let inbox = client.create_inbox().await?;
    println!("Inbox: {}", inbox.address);

    // Quick check: anything already waiting in the inbox?
    let page = client.list_messages(&inbox.id, None).await?;
    println!("Messages in inbox: {}", page.messages.len());
    if let Some(first) = page.messages.first() {
        println!("First subject: {}", first.subject);
    }

    let msg = client
        .wait_for_message(&inbox.id, WaitOptions::default())
        .await?;
    println!("From: {} Subject: {}", msg.from_addr, msg.subject);

    Ok(())
}
