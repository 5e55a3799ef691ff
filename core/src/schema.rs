//! Per-invocation value schemas and violation reports.
//!
//! An [`OptionSet`](crate::OptionSet) turns into a [`ValueSchema`] once per
//! invocation: one property per canonical option (the option's declared
//! [`ValueRule`], or an empty rule) plus the required-name list. Evaluating
//! a resolved [`ValueSet`] yields every [`Violation`] at once, in option
//! declaration order, so the caller can report all problems in one pass.
//!
//! # Examples
//!
//! ```
//! use argcanon_core::{OptionSet, OptionSpec, ValueSchema, ValueSet, ViolationKind};
//!
//! let options = OptionSet::builder()
//!     .option(OptionSpec::string("color").required().with_choices(&["red", "blue"]))
//!     .build()
//!     .unwrap();
//!
//! let schema = ValueSchema::from_options(&options);
//! let violations = schema.evaluate(&ValueSet::new());
//!
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].option, "color");
//! assert_eq!(violations[0].kind, ViolationKind::Required);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{OptionSet, OptionValue, ValueKind, ValueSet};

/// Validation fragment attached to one option.
///
/// Mirrors the `schema` configuration key: an optional expected value kind
/// (`type`) and an optional enumerated set of allowed values (`enum`). An
/// empty rule accepts everything.
///
/// # Examples
///
/// ```
/// use argcanon_core::ValueRule;
///
/// let rule: ValueRule = serde_json::from_str(r#"{"enum": ["red", "blue"]}"#).unwrap();
/// assert_eq!(rule.choices.as_deref(), Some(&["red".to_string(), "blue".to_string()][..]));
/// assert!(rule.kind.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRule {
    /// Expected scalar kind of the value (per element for collections).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ValueKind>,
    /// Allowed values (per element for collections).
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl ValueRule {
    /// Creates a rule restricting values to the given choices.
    pub fn enumerated(choices: &[&str]) -> Self {
        Self {
            kind: None,
            choices: Some(choices.iter().map(|choice| choice.to_string()).collect()),
        }
    }

    /// Creates a rule expecting a specific scalar kind.
    pub fn typed(kind: ValueKind) -> Self {
        Self {
            kind: Some(kind),
            choices: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.kind.is_none() && self.choices.is_none()
    }
}

/// Kind of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required option has no resolved value.
    Required,
    /// Value (or a collection element) has the wrong scalar kind.
    Kind,
    /// Value (or a collection element) is outside the enumerated choices.
    Choice,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Required => write!(f, "required"),
            ViolationKind::Kind => write!(f, "kind"),
            ViolationKind::Choice => write!(f, "choice"),
        }
    }
}

/// One structured validation failure.
///
/// `option` is always the canonical option name; `message` is the
/// validator's own phrasing, without the option name (the reporting layer
/// prefixes `--<option>` itself).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Canonical name of the offending option.
    pub option: String,
    /// Failure classification.
    pub kind: ViolationKind,
    /// Human-readable cause.
    pub message: String,
}

/// Derived, per-invocation validation schema.
///
/// Holds a property per canonical option in declaration order and the list
/// of required names. Build one with [`ValueSchema::from_options`], evaluate
/// it against a resolved value set, then drop it.
#[derive(Debug, Clone)]
pub struct ValueSchema {
    properties: Vec<(String, ValueRule)>,
    required: Vec<String>,
}

impl ValueSchema {
    /// Derives the schema for an option set.
    ///
    /// Every canonical option contributes a property: its declared rule, or
    /// an empty accept-everything rule. Alias names never appear as
    /// properties.
    pub fn from_options(options: &OptionSet) -> Self {
        let properties = options
            .iter()
            .map(|spec| (spec.name.clone(), spec.rule.clone().unwrap_or_default()))
            .collect();
        let required = options
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name.clone())
            .collect();
        Self {
            properties,
            required,
        }
    }

    /// Names of required options, in declaration order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Looks up the rule for a canonical option name.
    pub fn property(&self, name: &str) -> Option<&ValueRule> {
        self.properties
            .iter()
            .find(|(property, _)| property == name)
            .map(|(_, rule)| rule)
    }

    /// Evaluates a resolved value set, reporting every violation.
    ///
    /// Violations come back in option declaration order. Keys in the value
    /// set that no property describes (alias spellings in non-strict mode,
    /// unknown options) are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use argcanon_core::{OptionSet, OptionSpec, OptionValue, ValueSchema, ValueSet};
    ///
    /// let options = OptionSet::builder()
    ///     .option(OptionSpec::string("color").with_choices(&["red", "blue"]))
    ///     .build()
    ///     .unwrap();
    /// let schema = ValueSchema::from_options(&options);
    ///
    /// let mut values = ValueSet::new();
    /// values.insert("color".to_string(), OptionValue::from("green"));
    ///
    /// let violations = schema.evaluate(&values);
    /// assert_eq!(violations.len(), 1);
    /// assert_eq!(
    ///     violations[0].message,
    ///     "must be equal to one of the allowed values"
    /// );
    /// ```
    pub fn evaluate(&self, values: &ValueSet) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (name, rule) in &self.properties {
            let Some(value) = values.get(name) else {
                if self.required.iter().any(|required| required == name) {
                    violations.push(Violation {
                        option: name.clone(),
                        kind: ViolationKind::Required,
                        message: format!("must have required property '{name}'"),
                    });
                }
                continue;
            };

            if rule.is_empty() {
                continue;
            }

            if let Some(kind) = rule.kind
                && !kind_matches(value, kind)
            {
                violations.push(Violation {
                    option: name.clone(),
                    kind: ViolationKind::Kind,
                    message: format!("must be {kind}"),
                });
            }

            if let Some(choices) = &rule.choices
                && !choices_match(value, choices)
            {
                violations.push(Violation {
                    option: name.clone(),
                    kind: ViolationKind::Choice,
                    message: "must be equal to one of the allowed values".to_string(),
                });
            }
        }

        violations
    }
}

fn kind_matches(value: &OptionValue, kind: ValueKind) -> bool {
    match value {
        OptionValue::List(items) => items.iter().all(|item| item.kind() == Some(kind)),
        scalar => scalar.kind() == Some(kind),
    }
}

fn choices_match(value: &OptionValue, choices: &[String]) -> bool {
    match value {
        OptionValue::Str(s) => choices.iter().any(|choice| choice == s),
        OptionValue::List(items) => items.iter().all(|item| choices_match(item, choices)),
        OptionValue::Bool(_) => false,
    }
}
