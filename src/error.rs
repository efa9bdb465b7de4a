use std::fmt;

#[derive(Debug)]
pub enum SsitError {
    Config(String),
    Serialization(Box<bincode::error::EncodeError>),
    Deserialization(Box<bincode::error::DecodeError>),
    Json(serde_json::Error),
    Io(std::io::Error),
    Parse(String),
    Other(String),
}

impl fmt::Display for SsitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SsitError::Config(e) => write!(f, "Configuration error: {}", e),
            SsitError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SsitError::Deserialization(e) => write!(f, "Deserialization error: {}", e),
            SsitError::Json(e) => write!(f, "JSON error: {}", e),
            SsitError::Io(e) => write!(f, "IO error: {}", e),
            SsitError::Parse(e) => write!(f, "Parse error: {}", e),
            SsitError::Other(e) => write!(f, "Error: {}", e),
        }
    }
}

impl std::error::Error for SsitError {}

impl From<bincode::error::EncodeError> for SsitError {
    fn from(err: bincode::error::EncodeError) -> Self {
        SsitError::Serialization(Box::new(err))
    }
}

impl From<bincode::error::DecodeError> for SsitError {
    fn from(err: bincode::error::DecodeError) -> Self {
        SsitError::Deserialization(Box::new(err))
    }
}

impl From<serde_json::Error> for SsitError {
    fn from(err: serde_json::Error) -> Self {
        SsitError::Json(err)
    }
}

impl From<std::io::Error> for SsitError {
    fn from(err: std::io::Error) -> Self {
        SsitError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = SsitError::Config("n_max must be at least 2, got 1".to_string());
        assert_eq!(err.to_string(), "Configuration error: n_max must be at least 2, got 1");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SsitError = io.into();
        assert!(matches!(err, SsitError::Io(_)));
    }

    #[test]
    fn test_json_error_converts() {
        let json = serde_json::from_str::<u64>("not json").unwrap_err();
        let err: SsitError = json.into();
        assert!(err.to_string().starts_with("JSON error: "));
    }
}
