//! Help text rendering.
//!
//! Produces the USAGE / OPTIONS / EXAMPLES block from an option set: one
//! line per option in declaration order (the implicit `help` option leads),
//! with the description column aligned to a configurable padding width.
//! Alignment is measured on visible characters, so styled lines pad the
//! same as plain ones.

use std::sync::LazyLock;

use argcanon_core::{OptionSet, OptionSpec};
use regex::Regex;

use crate::style::Styles;

/// Default description column width.
pub const DEFAULT_PADDING: usize = 30;

/// ANSI SGR sequences, stripped before measuring line width.
static ANSI_CODES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[.*?m").expect("static regex must compile"));

/// Free-form help text blocks surrounding the option list.
#[derive(Debug, Clone, Default)]
pub struct HelpText {
    /// Shown under the USAGE header.
    pub usage: Option<String>,
    /// Shown under the EXAMPLES header.
    pub examples: Option<String>,
}

/// Renders the full help block.
///
/// # Examples
///
/// ```
/// use argcanon_core::{OptionSet, OptionSpec};
/// use argcanon_parse::help::{HelpText, render};
/// use argcanon_parse::style::Styles;
///
/// let options = OptionSet::builder()
///     .option(OptionSpec::string("color").with_short('c').with_description("paint color"))
///     .build()
///     .unwrap();
/// let text = HelpText {
///     usage: Some("demo [options]".to_string()),
///     examples: None,
/// };
///
/// let help = render(&options, &text, 30, &Styles::plain());
/// assert!(help.starts_with("USAGE\n"));
/// assert!(help.contains("-c, --color"));
/// assert!(help.contains("paint color"));
/// ```
pub fn render(options: &OptionSet, text: &HelpText, padding: usize, styles: &Styles) -> String {
    let mut out = String::new();

    if let Some(usage) = &text.usage {
        out.push_str(&styles.bold("USAGE"));
        out.push('\n');
        out.push_str(usage);
        out.push_str("\n\n");
    }

    if !options.is_empty() {
        out.push_str(&styles.bold("OPTIONS"));
        out.push('\n');
        for spec in options.iter() {
            out.push_str(&option_line(spec, padding, styles));
            out.push('\n');
        }
    }

    if let Some(examples) = &text.examples {
        out.push_str(&styles.bold("EXAMPLES"));
        out.push('\n');
        out.push_str(examples);
        out.push_str("\n\n");
    }

    out
}

fn option_line(spec: &OptionSpec, padding: usize, styles: &Styles) -> String {
    let mut line = String::from("  ");
    if let Some(short) = spec.short {
        line.push('-');
        line.push(short);
        line.push_str(", ");
    }
    line.push_str("--");
    line.push_str(&spec.name);
    if spec.required {
        line.push_str(&styles.red("*"));
    }
    if let Some(placeholder) = &spec.placeholder {
        line.push_str(&styles.dim(&format!(" <{placeholder}>")));
    }

    let pad = padding.saturating_sub(visible_width(&line));
    line.push_str(&" ".repeat(pad));

    if let Some(description) = &spec.description {
        line.push_str(description);
    }

    let notes = notes_for(spec, styles);
    if notes.is_empty() {
        return line;
    }

    if spec.description.is_some() {
        // Notes move to a continuation line at the description column, with
        // a separating blank line after the entry.
        line.push('\n');
        line.push_str(&" ".repeat(padding));
        line.push_str(&notes.join(" | "));
        line.push('\n');
    } else {
        line.push_str(&notes.join(" | "));
    }

    line
}

fn notes_for(spec: &OptionSpec, styles: &Styles) -> Vec<String> {
    let mut notes = Vec::new();
    if spec.multiple {
        notes.push(styles.italic("accepts multiple"));
    }
    if let Some(default) = &spec.default {
        notes.push(styles.italic(&format!("default: {}", styles.dim(&default.to_string()))));
    }
    if let Some(choices) = spec.rule.as_ref().and_then(|rule| rule.choices.as_ref()) {
        notes.push(styles.italic(&format!("choices: {}", styles.dim(&choices.join(", ")))));
    }
    if !spec.aliases.is_empty() {
        let spelled = format!("--{}", spec.aliases.join(", --"));
        notes.push(styles.italic(&format!("aliases: {}", styles.dim(&spelled))));
    }
    notes
}

fn visible_width(text: &str) -> usize {
    ANSI_CODES.replace_all(text, "").chars().count()
}
