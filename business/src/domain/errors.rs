/// Failures reported by the upstream product-image catalog.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog.unreachable")]
    Unreachable,
    #[error("catalog.not_found")]
    NotFound,
    #[error("catalog.unexpected_status")]
    UnexpectedStatus(u16),
    #[error("catalog.invalid_payload")]
    InvalidPayload,
}
