//! Eager option-set configuration validation.
//!
//! Misconfigured option tables (two options claiming the same alias, a
//! user-declared `help`) fail at construction with a [`ConfigError`]
//! instead of silently shadowing each other, so an
//! [`OptionSet`](crate::OptionSet) that exists is known to be coherent.
//!
//! # Examples
//!
//! ```
//! use argcanon_core::{ConfigError, OptionSet, OptionSpec};
//!
//! // Two options claiming the same alias is a configuration error.
//! let err = OptionSet::builder()
//!     .option(OptionSpec::string("color").with_alias("col"))
//!     .option(OptionSpec::string("column").with_alias("col"))
//!     .build()
//!     .unwrap_err();
//! assert!(matches!(err, ConfigError::DuplicateAlias { .. }));
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::types::{HELP_NAME, HELP_SHORT, OptionSpec, OptionValue};

/// Option-set configuration errors.
///
/// Each variant describes one way a declaration can be incoherent. All are
/// raised at construction time; a built set never produces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Canonical or alias name is empty or whitespace-only.
    #[error("option and alias names must be non-empty")]
    EmptyName,
    /// Two options share a canonical name.
    #[error("duplicate option name: {0}")]
    DuplicateOption(String),
    /// Two options claim the same alias.
    #[error("alias '{alias}' is claimed by both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },
    /// An alias spells the same as some canonical option name.
    #[error("alias '{alias}' of option '{option}' collides with a canonical option name")]
    AliasShadowsOption { alias: String, option: String },
    /// Two options claim the same short letter.
    #[error("short '-{short}' is claimed by both '{first}' and '{second}'")]
    DuplicateShort {
        short: char,
        first: String,
        second: String,
    },
    /// Short form is not a single letter or digit.
    #[error("invalid short '-{short}' for option '{option}': must be a letter or digit")]
    InvalidShort { option: String, short: char },
    /// User declaration spells `help` or `h`, which belong to the implicit
    /// help option.
    #[error("'{0}' is reserved for the implicit help option")]
    ReservedName(String),
    /// Default value shape disagrees with the declared kind or cardinality.
    #[error("default value for option '{option}' does not match its declaration: {detail}")]
    DefaultMismatch { option: String, detail: String },
    /// Option table could not be parsed as JSON.
    #[error("option table is not valid JSON: {0}")]
    Json(String),
}

/// Rejects user declarations that spell `help` or `h` in any position.
///
/// Runs before the implicit help option is merged, so the implicit
/// declaration itself never trips it.
pub(crate) fn validate_user_options(user: &[OptionSpec]) -> Result<(), ConfigError> {
    for spec in user {
        if is_reserved(&spec.name) {
            return Err(ConfigError::ReservedName(spec.name.clone()));
        }
        if let Some(alias) = spec.aliases.iter().find(|alias| is_reserved(alias)) {
            return Err(ConfigError::ReservedName(alias.clone()));
        }
        if spec.short == Some(HELP_SHORT) {
            return Err(ConfigError::ReservedName(HELP_SHORT.to_string()));
        }
    }
    Ok(())
}

fn is_reserved(name: &str) -> bool {
    name == HELP_NAME || name.chars().eq([HELP_SHORT])
}

/// Validates the merged option list (implicit help included).
///
/// Checks empty names, duplicate canonical names, short-letter format and
/// uniqueness, alias uniqueness across the whole set, alias/canonical
/// collisions, and default-value agreement. Stops at the first error.
pub(crate) fn validate_options(options: &[OptionSpec]) -> Result<(), ConfigError> {
    let mut names: HashSet<&str> = HashSet::new();
    for spec in options {
        if spec.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if !names.insert(spec.name.as_str()) {
            return Err(ConfigError::DuplicateOption(spec.name.clone()));
        }
    }

    let mut shorts: HashMap<char, &str> = HashMap::new();
    let mut aliases: HashMap<&str, &str> = HashMap::new();
    for spec in options {
        if let Some(short) = spec.short {
            if !short.is_ascii_alphanumeric() {
                return Err(ConfigError::InvalidShort {
                    option: spec.name.clone(),
                    short,
                });
            }
            if let Some(first) = shorts.insert(short, spec.name.as_str()) {
                return Err(ConfigError::DuplicateShort {
                    short,
                    first: first.to_string(),
                    second: spec.name.clone(),
                });
            }
        }

        for alias in &spec.aliases {
            if alias.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if names.contains(alias.as_str()) {
                return Err(ConfigError::AliasShadowsOption {
                    alias: alias.clone(),
                    option: spec.name.clone(),
                });
            }
            if let Some(first) = aliases.insert(alias.as_str(), spec.name.as_str()) {
                return Err(ConfigError::DuplicateAlias {
                    alias: alias.clone(),
                    first: first.to_string(),
                    second: spec.name.clone(),
                });
            }
        }

        if let Some(default) = &spec.default {
            validate_default(spec, default)?;
        }
    }

    Ok(())
}

fn validate_default(spec: &OptionSpec, default: &OptionValue) -> Result<(), ConfigError> {
    let agrees = if spec.multiple {
        match default {
            OptionValue::List(items) => items.iter().all(|item| item.kind() == Some(spec.kind)),
            _ => false,
        }
    } else {
        default.kind() == Some(spec.kind)
    };

    if agrees {
        Ok(())
    } else {
        let detail = if spec.multiple {
            format!("expected a list of {} values", spec.kind)
        } else {
            format!("expected a {} value", spec.kind)
        };
        Err(ConfigError::DefaultMismatch {
            option: spec.name.clone(),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::OptionSet;

    use super::*;

    #[test]
    fn test_rejects_duplicate_canonical_names() {
        let err = OptionSet::builder()
            .option(OptionSpec::string("color"))
            .option(OptionSpec::flag("color"))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateOption("color".to_string()));
    }

    #[test]
    fn test_rejects_alias_claimed_twice() {
        let err = OptionSet::builder()
            .option(OptionSpec::string("color").with_alias("col"))
            .option(OptionSpec::string("column").with_alias("col"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateAlias {
                alias: "col".to_string(),
                first: "color".to_string(),
                second: "column".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_alias_shadowing_canonical_name() {
        let err = OptionSet::builder()
            .option(OptionSpec::string("color"))
            .option(OptionSpec::string("paint").with_alias("color"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::AliasShadowsOption {
                alias: "color".to_string(),
                option: "paint".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_short() {
        let err = OptionSet::builder()
            .option(OptionSpec::string("color").with_short('c'))
            .option(OptionSpec::string("config").with_short('c'))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateShort {
                short: 'c',
                first: "color".to_string(),
                second: "config".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_reserved_help_spellings() {
        let by_name = OptionSet::builder()
            .option(OptionSpec::flag("help"))
            .build()
            .unwrap_err();
        assert_eq!(by_name, ConfigError::ReservedName("help".to_string()));

        let by_alias = OptionSet::builder()
            .option(OptionSpec::flag("assist").with_alias("help"))
            .build()
            .unwrap_err();
        assert_eq!(by_alias, ConfigError::ReservedName("help".to_string()));

        let by_short = OptionSet::builder()
            .option(OptionSpec::flag("host").with_short('h'))
            .build()
            .unwrap_err();
        assert_eq!(by_short, ConfigError::ReservedName("h".to_string()));
    }

    #[test]
    fn test_rejects_default_kind_mismatch() {
        let err = OptionSet::builder()
            .option(OptionSpec::string("color").with_default(true))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DefaultMismatch { .. }));
    }

    #[test]
    fn test_multiple_requires_list_default() {
        let err = OptionSet::builder()
            .option(OptionSpec::string("color").multiple().with_default("red"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DefaultMismatch { .. }));

        let ok = OptionSet::builder()
            .option(
                OptionSpec::string("color")
                    .multiple()
                    .with_default(vec!["red", "blue"]),
            )
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_accepts_coherent_set() {
        let options = OptionSet::builder()
            .option(
                OptionSpec::string("color")
                    .with_short('c')
                    .with_alias("colour")
                    .with_alias("col"),
            )
            .option(OptionSpec::flag("verbose").with_short('v'))
            .build();
        assert!(options.is_ok());
    }
}
