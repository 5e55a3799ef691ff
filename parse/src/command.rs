//! Command surface tying the pipeline together.
//!
//! A [`Command`] owns an option set plus presentation and scanning settings,
//! and turns a raw argument list into an [`Outcome`]: the resolved values, a
//! help request, or a rejection with validation messages. [`Command::evaluate`]
//! is pure; [`Command::parse_or_exit`] adds the process-facing printing and
//! exit behavior on top of it.

use argcanon_core::{HELP_NAME, HELP_SHORT, OptionSet, ValueSchema, ValueSet, ViolationKind};
use serde::Serialize;
use tracing::debug;

use crate::help::{self, DEFAULT_PADDING, HelpText};
use crate::resolve::resolve_values;
use crate::scan::{ScanFlags, scan};
use crate::style::Styles;

/// Prefix glyph for rejection messages.
const FAILURE_GLYPH: &str = "❌";

/// A configured command line: options, help text, and scanning behavior.
///
/// # Examples
///
/// ```
/// use argcanon_core::{OptionSet, OptionSpec, OptionValue};
/// use argcanon_parse::command::{Command, Outcome};
///
/// let options = OptionSet::builder()
///     .option(OptionSpec::string("color").with_short('c').with_alias("colour"))
///     .build()
///     .unwrap();
/// let command = Command::new(options).usage("demo [options]");
///
/// let args = vec!["--colour=teal".to_string()];
/// match command.evaluate(&args) {
///     Outcome::Success(resolved) => {
///         assert_eq!(resolved.values["color"], OptionValue::from("teal"));
///     }
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    options: OptionSet,
    help: HelpText,
    padding: usize,
    strict: bool,
    allow_negative: bool,
    allow_positionals: bool,
    styles: Styles,
}

/// Values and positionals from a successful parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved {
    /// Option values keyed by canonical name (plus alias mirrors when the
    /// command is not strict).
    pub values: ValueSet,
    /// Arguments that were not options.
    pub positionals: Vec<String>,
}

/// Result of evaluating an argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The arguments parsed and validated.
    Success(Resolved),
    /// A help option occurred; `text` is the rendered help block.
    Help { text: String },
    /// Scanning or validation failed; `messages` are the per-option
    /// rejection lines and `help` is the rendered help block.
    Rejected { messages: Vec<String>, help: String },
}

impl Outcome {
    /// Process exit code implied by this outcome, if any.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Help { .. } => Some(0),
            Outcome::Rejected { .. } => Some(1),
        }
    }
}

impl Command {
    /// Creates a command over `options` with default settings: no usage or
    /// examples text, padding of [`DEFAULT_PADDING`], alias mirroring on,
    /// negation off, positionals allowed, and styling detected from the
    /// environment.
    pub fn new(options: OptionSet) -> Self {
        Command {
            options,
            help: HelpText::default(),
            padding: DEFAULT_PADDING,
            strict: false,
            allow_negative: false,
            allow_positionals: true,
            styles: Styles::detect(),
        }
    }

    /// Sets the usage line shown in help output.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.help.usage = Some(usage.into());
        self
    }

    /// Sets the examples block shown in help output.
    pub fn examples(mut self, examples: impl Into<String>) -> Self {
        self.help.examples = Some(examples.into());
        self
    }

    /// Sets the description column width for help output.
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// When strict, resolved values carry canonical names only; alias
    /// spellings are folded in but not mirrored.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enables `--no-X` negation for undeclared `no-` spellings.
    pub fn allow_negative(mut self, allow_negative: bool) -> Self {
        self.allow_negative = allow_negative;
        self
    }

    /// Controls whether non-option arguments are accepted.
    pub fn allow_positionals(mut self, allow_positionals: bool) -> Self {
        self.allow_positionals = allow_positionals;
        self
    }

    /// Overrides style detection, mainly for tests and captured output.
    pub fn styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Renders the help block for this command.
    pub fn render_help(&self) -> String {
        help::render(&self.options, &self.help, self.padding, &self.styles)
    }

    /// Evaluates an argument list without touching the process: scans the
    /// arguments, short-circuits on a help occurrence, folds aliases, and
    /// validates the resolved values.
    pub fn evaluate(&self, args: &[String]) -> Outcome {
        let flags = ScanFlags {
            allow_negative: self.allow_negative,
            allow_positionals: self.allow_positionals,
        };
        let scanned = match scan(&self.options, args, flags) {
            Ok(scanned) => scanned,
            Err(err) => {
                debug!(error = %err, "Rejected argument list");
                return Outcome::Rejected {
                    messages: vec![err.to_string()],
                    help: self.render_help(),
                };
            }
        };

        // A help occurrence wins before validation, so `--help` works even
        // when required options are missing. The short spelling can surface
        // as its own name when typed as `--h`.
        let help_requested = scanned.tokens.iter().any(|token| {
            token
                .option_name()
                .is_some_and(|name| name == HELP_NAME || name.chars().eq([HELP_SHORT]))
        });
        if help_requested {
            debug!("Help requested, skipping validation");
            return Outcome::Help {
                text: self.render_help(),
            };
        }

        let values = resolve_values(&self.options, &scanned.tokens, self.strict);
        let schema = ValueSchema::from_options(&self.options);
        let violations = schema.evaluate(&values);
        if !violations.is_empty() {
            let messages = violations
                .iter()
                .map(|violation| match violation.kind {
                    ViolationKind::Required => format!("--{} is required", violation.option),
                    _ => format!("--{} {}", violation.option, violation.message),
                })
                .collect::<Vec<_>>();
            debug!(violations = messages.len(), "Rejected argument list");
            return Outcome::Rejected {
                messages,
                help: self.render_help(),
            };
        }

        debug!(
            values = values.len(),
            positionals = scanned.positionals.len(),
            "Accepted argument list"
        );
        Outcome::Success(Resolved {
            values,
            positionals: scanned.positionals,
        })
    }

    /// Evaluates `args` and applies the process-facing behavior: on success
    /// returns the resolved values; on a help request prints help to stdout
    /// and exits 0; on rejection prints the messages to stderr, then help to
    /// stdout, and exits 1.
    pub fn parse_or_exit(&self, args: &[String]) -> Resolved {
        match self.evaluate(args) {
            Outcome::Success(resolved) => resolved,
            Outcome::Help { text } => {
                print!("{text}");
                std::process::exit(0);
            }
            Outcome::Rejected { messages, help } => {
                for message in &messages {
                    eprintln!("{FAILURE_GLYPH} {message}");
                }
                eprintln!();
                print!("{help}");
                std::process::exit(1);
            }
        }
    }

    /// Parses the process arguments, exiting on help or rejection.
    pub fn parse_env(&self) -> Resolved {
        let args: Vec<String> = std::env::args().skip(1).collect();
        self.parse_or_exit(&args)
    }
}
