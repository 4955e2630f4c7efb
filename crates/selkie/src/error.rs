#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("edge references a node missing from the graph: {source} -> {target}")]
    InvalidReference { source: String, target: String },
}

pub type Result<T> = std::result::Result<T, Error>;
