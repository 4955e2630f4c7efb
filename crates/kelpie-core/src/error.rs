pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An edge in the request references a node id missing from the node set. Fatal to that
    /// single computation; nothing is published and the host keeps its previous result.
    #[error(transparent)]
    InvalidReference(#[from] selkie::Error),
}
