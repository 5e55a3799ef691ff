//! Alias resolution: folding every spelling onto its canonical option.
//!
//! The resolver makes an alias occurrence behave exactly as if the user had
//! typed the canonical name. It is a pure, single-pass fold over the token
//! sequence: every option token is aggregated under its canonical name in
//! input order, so "last one wins" for scalars and element order for
//! collections hold across spellings with no order-of-mutation ambiguity.
//! Given a validated [`OptionSet`](argcanon_core::OptionSet) it cannot fail.

use argcanon_core::{OptionSet, OptionValue, ValueSet};
use tracing::debug;

use crate::scan::{Token, push_element};

/// Folds the token sequence into the final value set.
///
/// - Scalar options: the last occurrence in argument order wins, whichever
///   spelling produced it.
/// - Collection options: occurrences append under the canonical name in
///   input order.
/// - A valueless occurrence counts as `true`.
/// - Non-strict mode mirrors alias-spelled occurrences under the alias name
///   as well (last-wins scalars, matching the scanner's surface); strict
///   mode keeps canonical names only. Unknown option names pass through
///   as typed in both modes.
/// - Defaults apply to declared options with no occurrence of any spelling.
///
/// # Examples
///
/// ```
/// use argcanon_core::{OptionSet, OptionSpec, OptionValue};
/// use argcanon_parse::resolve::resolve_values;
/// use argcanon_parse::scan::{ScanFlags, scan};
///
/// let options = OptionSet::builder()
///     .option(OptionSpec::flag("color").with_alias("colour"))
///     .build()
///     .unwrap();
///
/// let args = vec!["--colour".to_string()];
/// let tokens = scan(&options, &args, ScanFlags::default()).unwrap().tokens;
/// let values = resolve_values(&options, &tokens, true);
///
/// assert_eq!(values.get("color"), Some(&OptionValue::Bool(true)));
/// assert!(!values.contains_key("colour"), "strict mode drops alias keys");
/// ```
pub fn resolve_values(options: &OptionSet, tokens: &[Token], strict: bool) -> ValueSet {
    let mut values = ValueSet::new();

    for token in tokens {
        let Token::Option { name, value } = token else {
            continue;
        };
        let effective = value.clone().unwrap_or(OptionValue::Bool(true));

        let Some(spec) = options.resolve_spelling(name) else {
            values.insert(name.clone(), effective);
            continue;
        };

        if spec.name != *name {
            debug!(alias = %name, canonical = %spec.name, "Folded alias occurrence");
            if !strict {
                values.insert(name.clone(), effective.clone());
            }
        }

        if spec.multiple {
            push_element(&mut values, &spec.name, effective);
        } else {
            values.insert(spec.name.clone(), effective);
        }
    }

    for spec in options.iter() {
        if let Some(default) = &spec.default
            && !values.contains_key(&spec.name)
        {
            values.insert(spec.name.clone(), default.clone());
        }
    }

    debug!(values = ?values, strict, "Resolved value set");
    values
}
