use std::fmt;

/// Bearer token presented to the Kubernetes API server.
///
/// Newtype so the raw value never leaks through `Debug` output or log lines.
#[derive(Clone)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(raw: &str) -> Self {
        Self(raw.trim().to_owned())
    }
}

impl From<String> for Token {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(redacted)")
    }
}
