use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to load the TSX grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("Parser produced no tree for this source unit")]
    Parse,

    #[error("Style attribute at byte {0} has no enclosing JSX element")]
    MalformedTree(usize),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
