use thiserror::Error;

/// Error kinds surfaced by the orchestrator. Every RPC failure maps to
/// exactly one kind plus a human-readable message; internal detail stays in
/// the wrapped source and the logs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("subnet exhausted on network {0}")]
    SubnetExhausted(String),

    #[error("hypervisor error: {0:#}")]
    Hypervisor(#[source] anyhow::Error),

    #[error("subprocess error: {0:#}")]
    Subprocess(#[source] anyhow::Error),

    #[error("persistence error: {0:#}")]
    Persistence(#[source] anyhow::Error),

    #[error("internal error: {0:#}")]
    Internal(#[source] anyhow::Error),
}

impl Error {
    /// Stable kind code carried in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "invalid-argument",
            Error::NotFound(_) => "not-found",
            Error::SubnetExhausted(_) => "subnet-exhausted",
            Error::Hypervisor(_) => "hypervisor-error",
            Error::Subprocess(_) => "subprocess-error",
            Error::Persistence(_) => "persistence-error",
            Error::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_kebab_case_kinds() {
        assert_eq!(Error::InvalidArgument("x".into()).code(), "invalid-argument");
        assert_eq!(Error::NotFound("machine abc".into()).code(), "not-found");
        assert_eq!(Error::SubnetExhausted("default".into()).code(), "subnet-exhausted");
        assert_eq!(
            Error::Hypervisor(anyhow::anyhow!("boom")).code(),
            "hypervisor-error"
        );
    }

    #[test]
    fn display_carries_the_message() {
        let err = Error::NotFound("image 123".into());
        assert_eq!(err.to_string(), "image 123 not found");
    }
}
