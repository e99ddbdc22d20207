//! Log-safe rendering of API keys and shared secrets.
//!
//! Keys travel through provider calls and registration; they must never reach a log line
//! in clear text.

use std::fmt;

/// Masked representation of an API key or secret.
///
/// Shows only the first 4 characters followed by `***`.
#[derive(Clone, Debug)]
pub struct SensitiveApiKey<'a> {
    inner: &'a str,
}

impl<'a> SensitiveApiKey<'a> {
    /// # Example
    /// ```
    /// use vectura::logging::SensitiveApiKey;
    ///
    /// let key = "AIzaSyD-example-key";
    /// assert_eq!(SensitiveApiKey::new(key).to_string(), "AIza***");
    /// ```
    pub fn new(key: &'a str) -> Self {
        Self { inner: key }
    }
}

impl<'a> fmt::Display for SensitiveApiKey<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible_len = 4;
        if self.inner.chars().count() <= visible_len * 2 {
            write!(f, "***")
        } else {
            let visible: String = self.inner.chars().take(visible_len).collect();
            write!(f, "{}***", visible)
        }
    }
}

/// Whether a value looks like a provider API key
pub fn is_sensitive_key(value: &str) -> bool {
    const SENSITIVE_PREFIXES: [&str; 4] = ["AIza", "sk-", "Bearer ", "ya29."];

    SENSITIVE_PREFIXES
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

/// Mask a value if it looks like a key, return it unchanged otherwise.
///
/// ```
/// use vectura::logging::sanitize_log_value;
///
/// assert_eq!(sanitize_log_value("AIzaSyD-example-key"), "AIza***");
/// assert_eq!(sanitize_log_value("Depot Campinas"), "Depot Campinas");
/// ```
pub fn sanitize_log_value(value: &str) -> String {
    if is_sensitive_key(value) {
        SensitiveApiKey::new(value).to_string()
    } else {
        value.to_string()
    }
}
