use thiserror::Error;

/// Errors raised while setting up a slab simulation.
///
/// Stepping, flux probing and the run loop itself never fail once a
/// configuration has been accepted, so this is the only library error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeatError {
    #[error("invalid configuration: `{parameter}` {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },
}

impl HeatError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }

    /// Name of the rejected parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { parameter, .. } => parameter,
        }
    }
}

pub type Result<T> = std::result::Result<T, HeatError>;
