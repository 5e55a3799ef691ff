//! Terminal styling for help output.
//!
//! A thin SGR wrapper with an explicit on/off switch instead of ambient
//! globals: [`Styles::detect`] reads the `NO_COLOR` convention once, and the
//! forced [`Styles::ansi`] / [`Styles::plain`] constructors keep rendering
//! deterministic in tests.

/// Style set applied by the help renderer.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    enabled: bool,
}

impl Styles {
    /// Styling according to the environment: disabled when `NO_COLOR` is set
    /// to a non-empty value.
    pub fn detect() -> Self {
        let no_color = std::env::var("NO_COLOR").is_ok_and(|value| !value.is_empty());
        Self { enabled: !no_color }
    }

    /// Always emit escape codes.
    pub fn ansi() -> Self {
        Self { enabled: true }
    }

    /// Never emit escape codes.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn bold(&self, text: &str) -> String {
        self.wrap(1, text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.wrap(2, text)
    }

    pub fn italic(&self, text: &str) -> String {
        self.wrap(3, text)
    }

    pub fn red(&self, text: &str) -> String {
        self.wrap(31, text)
    }

    fn wrap(&self, code: u8, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passes_text_through() {
        let styles = Styles::plain();
        assert_eq!(styles.bold("USAGE"), "USAGE");
        assert_eq!(styles.red("*"), "*");
    }

    #[test]
    fn test_ansi_wraps_with_reset() {
        let styles = Styles::ansi();
        assert_eq!(styles.bold("USAGE"), "\x1b[1mUSAGE\x1b[0m");
        assert_eq!(styles.dim("x"), "\x1b[2mx\x1b[0m");
        assert_eq!(styles.italic("x"), "\x1b[3mx\x1b[0m");
        assert_eq!(styles.red("*"), "\x1b[31m*\x1b[0m");
    }
}
