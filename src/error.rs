use std::fmt;

/// Errors surfaced by the simulation core.
///
/// Everything here is either an out-of-range lookup or input rejected at
/// construction time. Running out of money is not an error: purchase and
/// upgrade commands simply do nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    OutOfRange { index: usize, len: usize },
    EmptyPath,
    InvalidLayer { level: u8 },
    UnknownTowerKind { name: String },
    InvalidColour { components: usize },
    InvalidDimension { width: u32, height: u32 },
    Config(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "path index {index} out of range (len {len})")
            }
            Self::EmptyPath => write!(f, "a path needs at least one waypoint"),
            Self::InvalidLayer { level } => {
                write!(f, "balloon level must be 1..=5, got {level}")
            }
            Self::UnknownTowerKind { name } => write!(f, "unknown tower kind: {name:?}"),
            Self::InvalidColour { components } => write!(
                f,
                "colour needs 3 or 4 components, got {components}"
            ),
            Self::InvalidDimension { width, height } => {
                write!(f, "dimension must be non-zero, got {width}x{height}")
            }
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimError::OutOfRange { index: 12, len: 10 };
        assert_eq!(err.to_string(), "path index 12 out of range (len 10)");

        let err = SimError::UnknownTowerKind {
            name: "LASER".to_string(),
        };
        assert_eq!(err.to_string(), "unknown tower kind: \"LASER\"");
    }

    #[test]
    fn test_json_errors_become_config_errors() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        assert!(matches!(SimError::from(err), SimError::Config(_)));
    }
}
