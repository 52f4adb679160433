use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitfetchError>;

#[derive(Error, Debug)]
pub enum GitfetchError {
    #[error("Not a git repository: {}", path.display())]
    RepositoryNotFound {
        path: PathBuf,
        #[source]
        source: Box<gix::discover::Error>,
    },
    #[error("Repository has no commits")]
    NoCommits,
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Shallow file error: {0}")]
    ShallowRead(#[from] Box<gix::shallow::read::Error>),
}

impl GitfetchError {
    /// Usage errors are reported with exit code 2, like clap's own.
    pub fn is_usage(&self) -> bool {
        matches!(self, GitfetchError::InvalidDate(_))
    }
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::object::commit::Error> for GitfetchError {
    fn from(err: gix::object::commit::Error) -> Self {
        GitfetchError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for GitfetchError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        GitfetchError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for GitfetchError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        GitfetchError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for GitfetchError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GitfetchError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GitfetchError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GitfetchError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for GitfetchError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        GitfetchError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::shallow::read::Error> for GitfetchError {
    fn from(err: gix::shallow::read::Error) -> Self {
        GitfetchError::ShallowRead(Box::new(err))
    }
}
