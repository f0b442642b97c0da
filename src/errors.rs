use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("duplicate movie: {key}")]
    DuplicateKey { key: String },
}

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
