//! Declarative option table example.
//!
//! Demonstrates loading an option set from a JSON table with
//! [`OptionSet::from_json`] and evaluating arguments without touching the
//! process: every [`Outcome`] variant is handled explicitly and the resolved
//! values serialize straight back to JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argcanon-demos --example json_table -- --tag=a --tag=b input.txt
//! cargo run -p argcanon-demos --example json_table -- --mode fast
//! ```

use argcanon_core::OptionSet;
use argcanon_parse::{Command, Outcome};

const OPTION_TABLE: &str = r#"[
    {
        "name": "mode",
        "type": "string",
        "short": "m",
        "description": "processing mode",
        "schema": { "enum": ["fast", "thorough"] },
        "default": "fast"
    },
    {
        "name": "tag",
        "type": "string",
        "multiple": true,
        "aliases": ["label"],
        "description": "tags attached to the run"
    },
    {
        "name": "dry-run",
        "type": "boolean",
        "description": "report what would happen without doing it"
    }
]"#;

fn main() {
    let options = OptionSet::from_json(OPTION_TABLE).unwrap();
    let command = Command::new(options)
        .usage("json_table [options] [files...]")
        .strict(true);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match command.evaluate(&args) {
        Outcome::Success(resolved) => {
            println!("{}", serde_json::to_string_pretty(&resolved).unwrap());
        }
        Outcome::Help { text } => print!("{text}"),
        Outcome::Rejected { messages, .. } => {
            for message in messages {
                eprintln!("rejected: {message}");
            }
            std::process::exit(1);
        }
    }
}
