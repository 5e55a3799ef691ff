//! Greeting command example.
//!
//! Demonstrates the builder API end to end: option declarations with aliases,
//! shorts, choices, and defaults, then [`Command::parse_or_exit`] on the
//! process arguments. Help and validation failures print and exit on their
//! own; the happy path falls through with the resolved values.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argcanon-demos --example greet -- --name Ada
//! cargo run -p argcanon-demos --example greet -- -n Ada --colour=green --shout
//! cargo run -p argcanon-demos --example greet -- --help
//! ```

use argcanon_core::{OptionSet, OptionSpec};
use argcanon_parse::Command;

fn main() {
    let options = OptionSet::builder()
        .option(
            OptionSpec::string("name")
                .with_short('n')
                .required()
                .with_placeholder("who")
                .with_description("name of the person to greet"),
        )
        .option(
            OptionSpec::string("color")
                .with_short('c')
                .with_alias("colour")
                .with_choices(&["red", "green", "blue"])
                .with_default("green")
                .with_placeholder("name")
                .with_description("highlight color for the greeting"),
        )
        .option(
            OptionSpec::flag("shout")
                .with_short('s')
                .with_description("print the greeting in upper case"),
        )
        .build()
        .unwrap();

    let command = Command::new(options)
        .usage("greet [options]")
        .examples("greet --name Ada\ngreet -n Ada --colour=blue --shout");

    let resolved = command.parse_env();

    let name = resolved.values["name"].as_str().unwrap_or("world");
    let color = resolved.values["color"].to_string();
    let mut greeting = format!("hello {name} (in {color})");
    if resolved.values.get("shout").and_then(|v| v.as_bool()) == Some(true) {
        greeting = greeting.to_uppercase();
    }

    println!("{greeting}");
}
