use super::*;

impl From<JackErrorKind> for JackError {
    fn from(value: JackErrorKind) -> Self {
        Self { kind: Box::new(value) }
    }
}

impl From<std::io::Error> for JackError {
    fn from(error: std::io::Error) -> Self {
        Self::io(PathBuf::new(), error.to_string())
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for JackError {
    fn from(error: serde_json::Error) -> Self {
        Self::io(PathBuf::new(), format!("JSON error: {}", error))
    }
}
