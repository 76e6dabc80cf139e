#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
