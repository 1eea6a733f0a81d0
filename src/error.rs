use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("page index {index} is outside the valid range 1..={max_page}")]
    PageOutOfRange { index: usize, max_page: usize },

    #[error("page has no {0} element")]
    MalformedPage(&'static str),

    #[error("invalid css selector: {0}")]
    InvalidSelector(String),

    #[error("cannot split pages across zero workers")]
    InvalidWorkerCount,

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
