//! Core option model and validation primitives for alias-resolving
//! argument parsing.
//!
//! This crate defines the foundational types the resolution pipeline in
//! `argcanon-parse` runs on:
//!
//! - [`OptionSpec`] — one option declaration: canonical name, value kind,
//!   short letter, aliases, cardinality, default, and validation rule.
//! - [`OptionSet`] — a validated, insertion-ordered collection of specs,
//!   always carrying the implicit `help` option first. Built through
//!   [`OptionSet::builder`] or from a declarative JSON table with
//!   [`OptionSet::from_json`].
//! - [`OptionValue`] / [`ValueSet`] — resolved values: scalars or ordered
//!   collections, keyed by name.
//! - [`ValueSchema`] / [`Violation`] — the per-invocation validation schema
//!   derived from an option set, and the structured failures it reports.
//!
//! Configuration mistakes (duplicate aliases or shorts, a user-declared
//! `help`, defaults that disagree with their declaration) are rejected
//! eagerly at construction with a [`ConfigError`], never discovered at
//! resolution time.
//!
//! # Example
//!
//! ```
//! use argcanon_core::{OptionSet, OptionSpec, OptionValue, ValueSchema, ValueSet};
//!
//! let options = OptionSet::builder()
//!     .option(
//!         OptionSpec::string("color")
//!             .with_alias("colour")
//!             .required()
//!             .with_choices(&["red", "blue"]),
//!     )
//!     .option(OptionSpec::flag("verbose").with_short('v'))
//!     .build()
//!     .unwrap();
//!
//! // Aliases resolve to the canonical spec.
//! assert_eq!(options.resolve_spelling("colour").unwrap().name, "color");
//!
//! // The derived schema reports all violations at once.
//! let schema = ValueSchema::from_options(&options);
//! let mut values = ValueSet::new();
//! values.insert("color".to_string(), OptionValue::from("green"));
//! let violations = schema.evaluate(&values);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].option, "color");
//! ```

mod schema;
mod types;
mod validate;

pub use schema::{ValueRule, ValueSchema, Violation, ViolationKind};
pub use types::{
    HELP_NAME, HELP_SHORT, OptionSet, OptionSetBuilder, OptionSpec, OptionValue, ValueKind,
    ValueSet,
};
pub use validate::ConfigError;
