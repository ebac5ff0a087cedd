//! LineKV CLI
//!
//! Interactive front end: prompt, send the typed line, print the one-line
//! response. Ends when stdin is closed or can no longer be read, or when the
//! server connection fails.

use anyhow::Context;
use linekv::client::Client;
use linekv::{DEFAULT_HOST, DEFAULT_PORT};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const PROMPT: &[u8] = b"Enter command (e.g., GET key or SET key value): ";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let addr = format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT);
    let mut client = Client::connect(&addr)
        .await
        .with_context(|| format!("failed to connect to LineKV server at {}", addr))?;

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(PROMPT).await?;
        stdout.flush().await?;

        let mut line = String::new();
        match stdin.read_line(&mut line).await {
            Ok(0) => {
                println!();
                return Ok(());
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                return Ok(());
            }
        }

        match client.send(&line).await {
            Ok(response) => {
                println!("Server response: {}", String::from_utf8_lossy(&response))
            }
            Err(e) => {
                eprintln!("Error talking to server: {}", e);
                return Ok(());
            }
        }
    }
}
