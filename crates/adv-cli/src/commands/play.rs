use std::io::{self, BufRead, Write};
use std::path::Path;

use adv_fiction::FictionSession;
use adv_save::{SaveConfig, SaveStore};
use colored::Colorize;

pub fn run(path: &Path, config: &SaveConfig, load: Option<&str>) -> Result<(), String> {
    let loaded = super::load_world(path)?;
    let mut session =
        FictionSession::new(loaded.world, loaded.name).with_saves(SaveStore::from_config(config));

    if let Some(slot) = load {
        session
            .load_slot(slot)
            .map_err(|e| format!("cannot resume from '{slot}': {e}"))?;
    }

    println!("{}", format!("=== {} ===", session.world_name()).bold());
    println!("Type 'help' for commands, 'quit' to exit.\n");
    println!("{}\n", session.look());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        match session.process(&line) {
            Ok(reply) => {
                if !reply.text.is_empty() {
                    println!("{}\n", reply.text);
                }
                if reply.quit {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    println!("Adventure complete. Total turns: {}", session.turns());
    Ok(())
}
