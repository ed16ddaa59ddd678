use num::BigUint;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A command-line value is out of range or inconsistent with another one.
    #[error("invalid parameter -{flag}: {reason}")]
    InvalidParameter { flag: char, reason: String },

    /// More clauses were requested than there are distinct clauses.
    #[error("cannot generate {requested} distinct clauses, only {capacity} exist")]
    Infeasible { requested: usize, capacity: BigUint },

    #[error("gave up after {draws} clause draws with {accepted} of {requested} clauses")]
    Stalled { draws: u64, accepted: usize, requested: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid(flag: char, reason: impl Into<String>) -> Self {
        Error::InvalidParameter { flag, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_is_labeled() {
        let err = Error::invalid('w', "must be positive");
        assert_eq!(err.to_string(), "invalid parameter -w: must be positive");
    }

    #[test]
    fn infeasible_names_capacity() {
        let err = Error::Infeasible { requested: 13, capacity: BigUint::from(12u32) };
        assert_eq!(err.to_string(), "cannot generate 13 distinct clauses, only 12 exist");
    }

    #[test]
    fn from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(matches!(Error::from(io), Error::Io(_)));
    }
}
