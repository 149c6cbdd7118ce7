//! Interactive chat session over stdin
//!
//! Drives the same command router a chat-bot frontend would: each input
//! line produces zero or more reply lines. Storage failures degrade to a
//! generic message and the session continues.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::error;

use tally_core::{ChatSession, Database};

pub fn cmd_chat(db: &Database) -> Result<()> {
    let user = std::env::var("USER").ok();
    let mut session = ChatSession::new(db.clone(), user);

    println!("💬 Tally chat. Type /start for the menu, Ctrl-D to quit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match session.handle(&line) {
            Ok(replies) => {
                for reply in replies {
                    println!("{}", reply);
                }
            }
            Err(e) => {
                error!(error = %e, "Chat command failed");
                println!("⚠️ Something went wrong. Please try again.");
            }
        }
    }

    println!("Bye!");
    Ok(())
}
