/// Failure of a single type-system lookup.
///
/// These never abort a search: the affected type or member is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("Unresolved type: {0}")]
    UnresolvedType(String),
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),
    #[error("Inaccessible member: {0}")]
    InaccessibleMember(String),
    #[error("Unsupported member: {0}")]
    UnsupportedMember(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OracleResult<T> = std::result::Result<T, OracleError>;
