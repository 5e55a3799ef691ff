//! Option specifications and the value model for argument resolution.
//!
//! This module defines the data model the resolution pipeline runs on: the
//! kinds and values options can carry, the per-option [`OptionSpec`]
//! declaration, and the validated, insertion-ordered [`OptionSet`] built
//! through [`OptionSetBuilder`]. All types serialize with [`serde`] so option
//! tables can live in JSON next to the code that uses them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::ValueRule;
use crate::validate::{ConfigError, validate_options, validate_user_options};

/// Canonical name of the implicit help option present in every set.
pub const HELP_NAME: &str = "help";

/// Short letter of the implicit help option.
pub const HELP_SHORT: char = 'h';

/// Kind of value an option carries.
///
/// Matches the `type` configuration key: `"boolean"` for presence flags,
/// `"string"` for options that take an argument.
///
/// # Examples
///
/// ```
/// use argcanon_core::ValueKind;
///
/// assert_eq!(ValueKind::Bool.to_string(), "boolean");
/// assert_eq!(ValueKind::String.to_string(), "string");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Presence flag; carries `true`/`false`.
    #[serde(rename = "boolean")]
    Bool,
    /// Takes a string argument.
    #[serde(rename = "string")]
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => write!(f, "boolean"),
            ValueKind::String => write!(f, "string"),
        }
    }
}

/// A resolved option value: a scalar or an ordered collection of scalars.
///
/// Serializes untagged, so JSON `true`, `"red"`, and `["red", "blue"]` all
/// deserialize to the matching variant. `List` holds the occurrences of a
/// collection-valued option in input order; its elements are always scalars.
///
/// # Examples
///
/// ```
/// use argcanon_core::OptionValue;
///
/// let value: OptionValue = serde_json::from_str(r#"["red", "blue"]"#).unwrap();
/// assert_eq!(value.as_list().unwrap().len(), 2);
/// assert_eq!(value.to_string(), "red,blue");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean scalar.
    Bool(bool),
    /// String scalar.
    Str(String),
    /// Ordered collection of scalar values.
    List(Vec<OptionValue>),
}

impl OptionValue {
    /// Returns the boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the collected elements, if this is a `List`.
    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the scalar kind, or `None` for lists.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            OptionValue::Bool(_) => Some(ValueKind::Bool),
            OptionValue::Str(_) => Some(ValueKind::String),
            OptionValue::List(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    /// Renders scalars verbatim and lists comma-joined (`red,blue`), the form
    /// the help renderer uses for `default:` notes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Str(s) => f.write_str(s),
            OptionValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(values: Vec<String>) -> Self {
        OptionValue::List(values.into_iter().map(OptionValue::Str).collect())
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(values: Vec<&str>) -> Self {
        OptionValue::List(values.into_iter().map(OptionValue::from).collect())
    }
}

/// Mapping from canonical-or-alias name to resolved value(s).
///
/// Built fresh per invocation and read-only after resolution. Backed by a
/// `BTreeMap` so serialized output is deterministic.
pub type ValueSet = BTreeMap<String, OptionValue>;

/// Declaration of one option under its canonical name.
///
/// Use the constructors [`flag`](OptionSpec::flag) and
/// [`string`](OptionSpec::string), then chain builder methods for the rest.
/// Field names follow the JSON configuration keys (`type`, `arg`, `schema`),
/// so specs round-trip through [`OptionSet::from_json`] tables.
///
/// # Examples
///
/// ```
/// use argcanon_core::{OptionSpec, ValueKind};
///
/// let color = OptionSpec::string("color")
///     .with_short('c')
///     .with_alias("colour")
///     .with_choices(&["red", "blue"])
///     .with_description("paint color");
/// assert_eq!(color.kind, ValueKind::String);
/// assert!(color.matches("colour"));
/// assert!(!color.matches("paint"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Canonical option name (the key resolved values are stored under).
    pub name: String,
    /// Kind of value this option carries.
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// Optional single-letter short form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Alternate long-form names resolving to this option.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Whether a value must be present after resolution.
    #[serde(default)]
    pub required: bool,
    /// Whether occurrences accumulate into an ordered collection.
    #[serde(default)]
    pub multiple: bool,
    /// Value used when no occurrence of any spelling appears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,
    /// Display text for help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display name for the expected value placeholder (e.g. `<name>`).
    #[serde(rename = "arg", default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Validation fragment applied to the resolved value.
    #[serde(rename = "schema", default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<ValueRule>,
}

impl OptionSpec {
    /// Creates a boolean (presence) option.
    ///
    /// # Examples
    ///
    /// ```
    /// use argcanon_core::{OptionSpec, ValueKind};
    ///
    /// let verbose = OptionSpec::flag("verbose").with_short('v');
    /// assert_eq!(verbose.kind, ValueKind::Bool);
    /// assert_eq!(verbose.short, Some('v'));
    /// ```
    pub fn flag(name: &str) -> Self {
        Self::new(name, ValueKind::Bool)
    }

    /// Creates an option that takes a string argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use argcanon_core::{OptionSpec, ValueKind};
    ///
    /// let output = OptionSpec::string("output").with_placeholder("path");
    /// assert_eq!(output.kind, ValueKind::String);
    /// assert_eq!(output.placeholder.as_deref(), Some("path"));
    /// ```
    pub fn string(name: &str) -> Self {
        Self::new(name, ValueKind::String)
    }

    fn new(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            short: None,
            aliases: Vec::new(),
            required: false,
            multiple: false,
            default: None,
            description: None,
            placeholder: None,
            rule: None,
        }
    }

    /// Adds a single-letter short form.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Adds an alternate long-form name.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the option as collection-valued.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Adds a description for help output.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the display name for the expected value placeholder.
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    /// Restricts resolved values to an enumerated set of choices.
    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.rule = Some(ValueRule::enumerated(choices));
        self
    }

    /// Attaches a full validation rule.
    pub fn with_rule(mut self, rule: ValueRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Checks whether a spelling names this option (canonical or alias).
    ///
    /// # Examples
    ///
    /// ```
    /// use argcanon_core::OptionSpec;
    ///
    /// let color = OptionSpec::string("color").with_alias("colour");
    /// assert!(color.matches("color"));
    /// assert!(color.matches("colour"));
    /// assert!(!color.matches("col"));
    /// ```
    pub fn matches(&self, spelling: &str) -> bool {
        self.name == spelling || self.aliases.iter().any(|alias| alias == spelling)
    }
}

/// Validated, insertion-ordered collection of option specifications.
///
/// Always contains the implicit `help` option first; the rest keep the order
/// they were declared in, which is also the order the help renderer and the
/// violation report use. Construction goes through [`OptionSet::builder`] or
/// [`OptionSet::from_json`], both of which validate the configuration
/// eagerly.
///
/// # Examples
///
/// ```
/// use argcanon_core::{OptionSet, OptionSpec};
///
/// let options = OptionSet::builder()
///     .option(OptionSpec::string("color").with_alias("colour"))
///     .option(OptionSpec::flag("verbose").with_short('v'))
///     .build()
///     .unwrap();
///
/// assert_eq!(options.len(), 3); // implicit help + color + verbose
/// assert_eq!(options.resolve_spelling("colour").unwrap().name, "color");
/// assert_eq!(options.by_short('v').unwrap().name, "verbose");
/// ```
#[derive(Debug, Clone)]
pub struct OptionSet {
    options: Vec<OptionSpec>,
}

impl OptionSet {
    /// Starts building an option set.
    pub fn builder() -> OptionSetBuilder {
        OptionSetBuilder { user: Vec::new() }
    }

    /// Parses an ordered JSON array of option entries and validates it.
    ///
    /// Entries use the configuration keys `name`, `type`, `short`, `aliases`,
    /// `required`, `multiple`, `default`, `description`, `arg`, and `schema`.
    /// The implicit `help` option is merged ahead of the parsed entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use argcanon_core::OptionSet;
    ///
    /// let options = OptionSet::from_json(
    ///     r#"[
    ///         {"name": "color", "type": "string", "aliases": ["colour"],
    ///          "schema": {"enum": ["red", "blue"]}},
    ///         {"name": "verbose", "type": "boolean", "short": "v"}
    ///     ]"#,
    /// )
    /// .unwrap();
    ///
    /// assert!(options.find("color").is_some());
    /// assert_eq!(options.resolve_spelling("colour").unwrap().name, "color");
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let specs: Vec<OptionSpec> =
            serde_json::from_str(raw).map_err(|err| ConfigError::Json(err.to_string()))?;
        let mut builder = Self::builder();
        for spec in specs {
            builder = builder.option(spec);
        }
        builder.build()
    }

    /// Finds an option by canonical name.
    pub fn find(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.name == name)
    }

    /// Finds the option a spelling belongs to (canonical name or alias).
    pub fn resolve_spelling(&self, spelling: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.matches(spelling))
    }

    /// Finds an option by its short letter.
    pub fn by_short(&self, short: char) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.short == Some(short))
    }

    /// Iterates the options in declaration order (implicit help first).
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter()
    }

    /// Number of options, including the implicit help option.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// True when the set holds no options at all.
    ///
    /// Sets built through the builder always contain the implicit help
    /// option, so this is false for them.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Builder for [`OptionSet`].
///
/// Collects user options, merges the implicit `help` option ahead of them,
/// and validates the combined set on [`build`](OptionSetBuilder::build).
#[derive(Debug, Default)]
pub struct OptionSetBuilder {
    user: Vec<OptionSpec>,
}

impl OptionSetBuilder {
    /// Adds one option declaration.
    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.user.push(spec);
        self
    }

    /// Validates the configuration and produces the final set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for duplicate names, aliases, or shorts,
    /// reserved `help`/`h` spellings, or defaults that disagree with the
    /// declared kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use argcanon_core::{ConfigError, OptionSet, OptionSpec};
    ///
    /// // `help` belongs to the implicit option and cannot be redeclared.
    /// let err = OptionSet::builder()
    ///     .option(OptionSpec::flag("help"))
    ///     .build()
    ///     .unwrap_err();
    /// assert_eq!(err, ConfigError::ReservedName("help".to_string()));
    /// ```
    pub fn build(self) -> Result<OptionSet, ConfigError> {
        validate_user_options(&self.user)?;

        let mut options = Vec::with_capacity(self.user.len() + 1);
        options.push(implicit_help());
        options.extend(self.user);
        validate_options(&options)?;

        Ok(OptionSet { options })
    }
}

fn implicit_help() -> OptionSpec {
    OptionSpec::flag(HELP_NAME)
        .with_short(HELP_SHORT)
        .with_description("print command line options")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_spec_builder_chain() {
        let spec = OptionSpec::string("color")
            .with_short('c')
            .with_alias("colour")
            .with_alias("col")
            .required()
            .with_default("red")
            .with_description("paint color")
            .with_placeholder("name");

        assert_eq!(spec.name, "color");
        assert_eq!(spec.kind, ValueKind::String);
        assert_eq!(spec.short, Some('c'));
        assert_eq!(spec.aliases, vec!["colour", "col"]);
        assert!(spec.required);
        assert_eq!(spec.default, Some(OptionValue::Str("red".to_string())));
        assert_eq!(spec.placeholder.as_deref(), Some("name"));
    }

    #[test]
    fn test_option_value_display() {
        assert_eq!(OptionValue::Bool(true).to_string(), "true");
        assert_eq!(OptionValue::Str("red".to_string()).to_string(), "red");
        assert_eq!(
            OptionValue::from(vec!["blue", "green"]).to_string(),
            "blue,green"
        );
    }

    #[test]
    fn test_option_value_untagged_json() {
        let scalar: OptionValue = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(scalar, OptionValue::Str("red".to_string()));

        let flag: OptionValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, OptionValue::Bool(true));

        let list: OptionValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(list.as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_builder_seeds_implicit_help_first() {
        let options = OptionSet::builder()
            .option(OptionSpec::string("color"))
            .build()
            .unwrap();

        let first = options.iter().next().unwrap();
        assert_eq!(first.name, HELP_NAME);
        assert_eq!(first.short, Some(HELP_SHORT));
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_spelling_resolution() {
        let options = OptionSet::builder()
            .option(OptionSpec::string("color").with_alias("colour").with_alias("col"))
            .build()
            .unwrap();

        assert_eq!(options.resolve_spelling("color").unwrap().name, "color");
        assert_eq!(options.resolve_spelling("colour").unwrap().name, "color");
        assert_eq!(options.resolve_spelling("col").unwrap().name, "color");
        assert!(options.resolve_spelling("paint").is_none());
        assert!(options.find("colour").is_none(), "find is canonical-only");
    }

    #[test]
    fn test_from_json_preserves_declaration_order() {
        let options = OptionSet::from_json(
            r#"[
                {"name": "zeta", "type": "boolean"},
                {"name": "alpha", "type": "string", "arg": "value"}
            ]"#,
        )
        .unwrap();

        let names: Vec<&str> = options.iter().map(|spec| spec.name.as_str()).collect();
        assert_eq!(names, vec!["help", "zeta", "alpha"]);
        assert_eq!(
            options.find("alpha").unwrap().placeholder.as_deref(),
            Some("value")
        );
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = OptionSet::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
