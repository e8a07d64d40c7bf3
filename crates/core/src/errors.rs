use thiserror::Error;

/// Failures raised by domain-type construction. The intent engine itself is
/// total: parsing free text never produces an error, only absent fields.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown product category `{0}`")]
    UnknownCategory(String),
}
