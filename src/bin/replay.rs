//! Replay a recorded conversation through a personality core.
//!
//! Reads one JSON interaction per line, feeds each to the core, saves the
//! learning history and prints the resulting profile as JSON.
//!
//! # Usage
//!
//! ```bash
//! replay interactions.jsonl [persona.yaml]
//! ```
//!
//! Each line looks like
//! `{"content": "valeu!", "type": "user_message", "metadata": {"user_satisfaction": "high"}}`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: log filter (default: "info")

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{bail, Context};
use kairo_persona::{Interaction, PersonalityConfig, PersonalityCore};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        bail!("usage: replay <interactions.jsonl> [config.yaml]");
    };
    let config = match args.next() {
        Some(path) => PersonalityConfig::from_yaml_file(&path)
            .with_context(|| format!("loading config {}", path))?,
        None => PersonalityConfig::default(),
    };

    let mut core = PersonalityCore::new(config).context("building personality core")?;
    core.initialize();

    let file = File::open(&input).with_context(|| format!("opening {}", input))?;
    let mut replayed = 0usize;
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", input))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Interaction>(&line) {
            Ok(interaction) => {
                core.analyze_interaction(&interaction);
                replayed += 1;
            }
            Err(e) => log::warn!("Skipping line {}: {}", number + 1, e),
        }
    }
    log::info!("Replayed {} interactions", replayed);

    let report = serde_json::json!({
        "summary": core.personality_summary(),
        "traits": core.current_traits(),
        "communication_style": core.communication_style(),
        "response_modifiers": core.response_modifiers(),
        "learning_progress": core.learning_progress(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    core.shutdown();
    Ok(())
}
