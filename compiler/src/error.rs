use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unresolved reference \"{name}\" in \"{owner}\"")]
    UnresolvedReference {
        name:  String,
        owner: String,
    },

    #[error("The item \"{0}\" is declared more than once")]
    DuplicateItem(String),

    #[error("Unknown language \"{0}\"")]
    UnknownLanguage(String),

    #[error("Unknown fixture \"{0}\"")]
    UnknownFixture(String),
}
