//! Alias-resolving argument parsing with schema validation and generated
//! help.
//!
//! This crate wraps a deliberately primitive token scanner with the layers a
//! real command line needs: alias spellings folding onto canonical options,
//! value validation against per-option rules, and help output rendered from
//! the same declarations. The pipeline runs in fixed stages:
//!
//! 1. [`scan`](scan::scan) — split the raw argument list into ordered option
//!    and positional tokens. Aliases are unknown names at this stage.
//! 2. help short-circuit — any `help`/`h` occurrence wins before validation.
//! 3. [`resolve_values`](resolve::resolve_values) — fold every spelling onto
//!    its canonical option, last occurrence wins.
//! 4. [`ValueSchema`](argcanon_core::ValueSchema) evaluation — report every
//!    violation at once.
//!
//! [`Command`] ties the stages together. [`Command::evaluate`] returns the
//! resulting [`Outcome`] without touching the process;
//! [`Command::parse_or_exit`] adds the conventional printing and exit
//! behavior for binaries.
//!
//! # Example
//!
//! ```
//! use argcanon_core::{OptionSet, OptionSpec, OptionValue};
//! use argcanon_parse::{Command, Outcome};
//!
//! let options = OptionSet::builder()
//!     .option(
//!         OptionSpec::string("color")
//!             .with_short('c')
//!             .with_alias("colour")
//!             .with_choices(&["red", "green", "blue"]),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let command = Command::new(options).usage("paint [options] <file>");
//!
//! let args = vec!["-c".to_string(), "red".to_string(), "wall.txt".to_string()];
//! match command.evaluate(&args) {
//!     Outcome::Success(resolved) => {
//!         assert_eq!(resolved.values["color"], OptionValue::from("red"));
//!         assert_eq!(resolved.positionals, vec!["wall.txt"]);
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//!
//! // Validation failures carry ready-to-print messages.
//! let args = vec!["--color=teal".to_string()];
//! match command.evaluate(&args) {
//!     Outcome::Rejected { messages, .. } => {
//!         assert_eq!(messages, ["--color must be equal to one of the allowed values"]);
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

pub mod command;
pub mod help;
pub mod resolve;
pub mod scan;
pub mod style;

pub use command::{Command, Outcome, Resolved};
pub use help::HelpText;
pub use style::Styles;
