use ontologies_core::OntologyError;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
    #[error(transparent)]
    Vault(#[from] OntologyError),
}
