//! Token scanner: the primitive beneath alias resolution.
//!
//! Splits a raw argument list into an ordered [`Token`] sequence plus the
//! best-effort flat value surface the rest of the pipeline refines. The
//! scanner knows canonical names and shorts from the
//! [`OptionSet`](argcanon_core::OptionSet) and treats every other spelling,
//! aliases included, as an unknown option; folding those onto their
//! canonical names is the resolver's job, not the scanner's:
//!
//! - `--name=value` attaches the inline value; `--name` on a declared string
//!   option greedily consumes the next argument, whatever it looks like.
//!   Unknown long options never consume the next argument.
//! - `-abc` expands short by short; a value-taking short swallows the rest of
//!   the group (`-ofile`) or, in last position, the next argument. Shorts
//!   scan under their canonical long name.
//! - `--no-X` scans as `X` with value `false` when negation is enabled and
//!   `no-X` is not itself declared.
//! - `--` ends option scanning; everything after is positional.
//!
//! A valueless occurrence carries no token value; the value surface stores
//! `true` for it, preserving what the user typed for validation to judge.

use argcanon_core::{OptionSet, OptionSpec, OptionValue, ValueKind, ValueSet};
use thiserror::Error;
use tracing::debug;

/// One recognized element of the argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An option occurrence: the name as typed (canonical for shorts) and
    /// the attached value, if any.
    Option {
        name: String,
        value: Option<OptionValue>,
    },
    /// A non-option argument.
    Positional { value: String },
}

impl Token {
    /// Name of an option occurrence, or `None` for positionals.
    pub fn option_name(&self) -> Option<&str> {
        match self {
            Token::Option { name, .. } => Some(name),
            Token::Positional { .. } => None,
        }
    }
}

/// Scanner mode flags.
#[derive(Debug, Clone, Copy)]
pub struct ScanFlags {
    /// Recognize `--no-X` as `X = false` for undeclared `no-X` names.
    pub allow_negative: bool,
    /// Accept non-option arguments instead of rejecting them.
    pub allow_positionals: bool,
}

impl Default for ScanFlags {
    fn default() -> Self {
        Self {
            allow_negative: false,
            allow_positionals: true,
        }
    }
}

/// Scanner failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A positional argument appeared while positionals are disallowed.
    #[error("unexpected positional argument '{0}'")]
    UnexpectedPositional(String),
}

/// Everything one scan produces.
///
/// `tokens` is the authoritative ordered record; `values` is the flat
/// last-wins surface (collection-valued only for declared `multiple` options
/// spelled in canonical form, defaults filled for absent options) and
/// `positionals` the ordered non-option arguments.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub values: ValueSet,
    pub positionals: Vec<String>,
    pub tokens: Vec<Token>,
}

/// Scans an argument list against an option set.
///
/// # Errors
///
/// Returns [`ScanError::UnexpectedPositional`] when a positional argument
/// appears and `flags.allow_positionals` is off.
///
/// # Examples
///
/// ```
/// use argcanon_core::{OptionSet, OptionSpec, OptionValue};
/// use argcanon_parse::scan::{ScanFlags, scan};
///
/// let options = OptionSet::builder()
///     .option(OptionSpec::string("color").with_short('c'))
///     .build()
///     .unwrap();
///
/// let args = vec!["-c".to_string(), "red".to_string(), "file.txt".to_string()];
/// let result = scan(&options, &args, ScanFlags::default()).unwrap();
///
/// assert_eq!(result.values.get("color"), Some(&OptionValue::from("red")));
/// assert_eq!(result.positionals, vec!["file.txt"]);
/// ```
pub fn scan(
    options: &OptionSet,
    args: &[String],
    flags: ScanFlags,
) -> Result<ScanResult, ScanError> {
    let mut tokens = Vec::new();
    let mut positionals = Vec::new();
    let mut options_ended = false;

    let mut index = 0;
    while index < args.len() {
        let arg = &args[index];
        index += 1;

        if options_ended || !is_option_like(arg) {
            if !flags.allow_positionals {
                return Err(ScanError::UnexpectedPositional(arg.clone()));
            }
            positionals.push(arg.clone());
            tokens.push(Token::Positional { value: arg.clone() });
            continue;
        }

        if arg == "--" {
            options_ended = true;
            continue;
        }

        if let Some(body) = arg.strip_prefix("--") {
            let token = match body.split_once('=') {
                Some((name, inline)) => Token::Option {
                    name: name.to_string(),
                    value: Some(OptionValue::from(inline)),
                },
                None => scan_long(options, body, args, &mut index, flags.allow_negative),
            };
            tokens.push(token);
            continue;
        }

        scan_short_group(options, &arg[1..], args, &mut index, &mut tokens);
    }

    let values = aggregate_values(options, &tokens);
    debug!(
        tokens = tokens.len(),
        positionals = positionals.len(),
        "Scanned argument list"
    );

    Ok(ScanResult {
        values,
        positionals,
        tokens,
    })
}

/// `-x` and `--x` are options; `-` alone and everything else is positional.
fn is_option_like(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

fn scan_long(
    options: &OptionSet,
    name: &str,
    args: &[String],
    index: &mut usize,
    allow_negative: bool,
) -> Token {
    if allow_negative
        && let Some(positive) = name.strip_prefix("no-")
        && options.find(name).is_none()
    {
        return Token::Option {
            name: positive.to_string(),
            value: Some(OptionValue::Bool(false)),
        };
    }

    let value = if takes_value(options.find(name)) && *index < args.len() {
        let consumed = args[*index].clone();
        *index += 1;
        Some(OptionValue::Str(consumed))
    } else {
        None
    };

    Token::Option {
        name: name.to_string(),
        value,
    }
}

fn scan_short_group(
    options: &OptionSet,
    group: &str,
    args: &[String],
    index: &mut usize,
    tokens: &mut Vec<Token>,
) {
    for (at, short) in group.char_indices() {
        let spec = options.by_short(short);
        let name = spec
            .map(|spec| spec.name.clone())
            .unwrap_or_else(|| short.to_string());

        if !takes_value(spec) {
            tokens.push(Token::Option { name, value: None });
            continue;
        }

        // A value-taking short ends the group: the rest of it is the value,
        // or in last position the next argument is.
        let rest = &group[at + short.len_utf8()..];
        let value = if !rest.is_empty() {
            Some(OptionValue::Str(rest.to_string()))
        } else if *index < args.len() {
            let consumed = args[*index].clone();
            *index += 1;
            Some(OptionValue::Str(consumed))
        } else {
            None
        };
        tokens.push(Token::Option { name, value });
        break;
    }
}

fn takes_value(spec: Option<&OptionSpec>) -> bool {
    spec.is_some_and(|spec| spec.kind == ValueKind::String)
}

/// Builds the flat value surface from the token sequence.
///
/// Last occurrence wins per name; declared `multiple` options spelled in
/// canonical form accumulate instead. A valueless occurrence stores `true`.
/// Defaults fill in for declared options with no entry.
fn aggregate_values(options: &OptionSet, tokens: &[Token]) -> ValueSet {
    let mut values = ValueSet::new();

    for token in tokens {
        let Token::Option { name, value } = token else {
            continue;
        };
        let effective = value.clone().unwrap_or(OptionValue::Bool(true));
        if options.find(name).is_some_and(|spec| spec.multiple) {
            push_element(&mut values, name, effective);
        } else {
            values.insert(name.clone(), effective);
        }
    }

    for spec in options.iter() {
        if let Some(default) = &spec.default
            && !values.contains_key(&spec.name)
        {
            values.insert(spec.name.clone(), default.clone());
        }
    }

    values
}

pub(crate) fn push_element(values: &mut ValueSet, name: &str, value: OptionValue) {
    match values.get_mut(name) {
        Some(OptionValue::List(items)) => items.push(value),
        _ => {
            values.insert(name.to_string(), OptionValue::List(vec![value]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn options() -> OptionSet {
        OptionSet::builder()
            .option(
                OptionSpec::string("color")
                    .with_short('c')
                    .with_alias("colour"),
            )
            .option(OptionSpec::flag("verbose").with_short('v'))
            .option(OptionSpec::string("tag").with_short('t').multiple())
            .build()
            .unwrap()
    }

    #[test]
    fn test_inline_and_consumed_values() {
        let result = scan(
            &options(),
            &args(&["--color=red", "--tag", "a"]),
            ScanFlags::default(),
        )
        .unwrap();

        assert_eq!(
            result.tokens[0],
            Token::Option {
                name: "color".to_string(),
                value: Some(OptionValue::from("red")),
            }
        );
        assert_eq!(
            result.tokens[1],
            Token::Option {
                name: "tag".to_string(),
                value: Some(OptionValue::from("a")),
            }
        );
    }

    #[test]
    fn test_declared_string_consumes_greedily() {
        // The next argument is consumed even when it looks like an option.
        let result = scan(
            &options(),
            &args(&["--color", "--verbose"]),
            ScanFlags::default(),
        )
        .unwrap();

        assert_eq!(
            result.values.get("color"),
            Some(&OptionValue::from("--verbose"))
        );
        assert!(!result.values.contains_key("verbose"));
    }

    #[test]
    fn test_unknown_long_never_consumes() {
        let result = scan(
            &options(),
            &args(&["--colour", "red"]),
            ScanFlags::default(),
        )
        .unwrap();

        // The alias is an unknown option to the scanner: no consumption,
        // the next argument stays positional.
        assert_eq!(result.values.get("colour"), Some(&OptionValue::Bool(true)));
        assert_eq!(result.positionals, vec!["red"]);
    }

    #[test]
    fn test_trailing_valueless_string_stores_true() {
        let result = scan(&options(), &args(&["--color"]), ScanFlags::default()).unwrap();

        assert_eq!(
            result.tokens[0],
            Token::Option {
                name: "color".to_string(),
                value: None,
            }
        );
        assert_eq!(result.values.get("color"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_short_group_expands_and_maps_to_canonical_names() {
        let result = scan(&options(), &args(&["-vc", "red"]), ScanFlags::default()).unwrap();

        assert_eq!(
            result.tokens[0],
            Token::Option {
                name: "verbose".to_string(),
                value: None,
            }
        );
        assert_eq!(
            result.tokens[1],
            Token::Option {
                name: "color".to_string(),
                value: Some(OptionValue::from("red")),
            }
        );
    }

    #[test]
    fn test_value_taking_short_swallows_rest_of_group() {
        let result = scan(&options(), &args(&["-cred"]), ScanFlags::default()).unwrap();

        assert_eq!(result.values.get("color"), Some(&OptionValue::from("red")));
    }

    #[test]
    fn test_unknown_short_passes_through_as_letter() {
        let result = scan(&options(), &args(&["-x"]), ScanFlags::default()).unwrap();

        assert_eq!(result.tokens[0].option_name(), Some("x"));
        assert_eq!(result.values.get("x"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_negation_scans_as_false() {
        let flags = ScanFlags {
            allow_negative: true,
            ..ScanFlags::default()
        };
        let result = scan(&options(), &args(&["--no-colour"]), flags).unwrap();

        assert_eq!(
            result.tokens[0],
            Token::Option {
                name: "colour".to_string(),
                value: Some(OptionValue::Bool(false)),
            }
        );
        assert_eq!(result.values.get("colour"), Some(&OptionValue::Bool(false)));
    }

    #[test]
    fn test_negation_skips_declared_no_names() {
        let options = OptionSet::builder()
            .option(OptionSpec::flag("no-build"))
            .build()
            .unwrap();
        let flags = ScanFlags {
            allow_negative: true,
            ..ScanFlags::default()
        };
        let result = scan(&options, &args(&["--no-build"]), flags).unwrap();

        assert_eq!(result.tokens[0].option_name(), Some("no-build"));
        assert_eq!(
            result.values.get("no-build"),
            Some(&OptionValue::Bool(true))
        );
    }

    #[test]
    fn test_terminator_ends_option_scanning() {
        let result = scan(
            &options(),
            &args(&["--verbose", "--", "--color", "-v"]),
            ScanFlags::default(),
        )
        .unwrap();

        assert_eq!(result.positionals, vec!["--color", "-v"]);
        assert_eq!(result.tokens.len(), 3);
        assert!(!result.values.contains_key("color"));
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let result = scan(&options(), &args(&["-"]), ScanFlags::default()).unwrap();
        assert_eq!(result.positionals, vec!["-"]);
    }

    #[test]
    fn test_disallowed_positional_is_an_error() {
        let flags = ScanFlags {
            allow_positionals: false,
            ..ScanFlags::default()
        };
        let err = scan(&options(), &args(&["file.txt"]), flags).unwrap_err();
        assert_eq!(
            err,
            ScanError::UnexpectedPositional("file.txt".to_string())
        );
    }

    #[test]
    fn test_multiple_collects_canonical_spellings_only() {
        let result = scan(
            &options(),
            &args(&["--tag=a", "-t", "b", "--tag", "c"]),
            ScanFlags::default(),
        )
        .unwrap();

        assert_eq!(
            result.values.get("tag"),
            Some(&OptionValue::from(vec!["a", "b", "c"]))
        );
    }

    #[test]
    fn test_last_occurrence_wins_per_name() {
        let result = scan(
            &options(),
            &args(&["--color=red", "--color=blue"]),
            ScanFlags::default(),
        )
        .unwrap();

        assert_eq!(result.values.get("color"), Some(&OptionValue::from("blue")));
    }

    #[test]
    fn test_defaults_fill_absent_options() {
        let options = OptionSet::builder()
            .option(OptionSpec::string("color").with_default("red"))
            .build()
            .unwrap();

        let empty = scan(&options, &[], ScanFlags::default()).unwrap();
        assert_eq!(empty.values.get("color"), Some(&OptionValue::from("red")));

        let given = scan(
            &options,
            &args(&["--color=blue"]),
            ScanFlags::default(),
        )
        .unwrap();
        assert_eq!(given.values.get("color"), Some(&OptionValue::from("blue")));
    }
}
