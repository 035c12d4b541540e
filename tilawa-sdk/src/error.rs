use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("API error: {0}")]
    Api(#[from] tilawa_api::ApiError),

    #[error("Storage error: {0}")]
    Store(#[from] tilawa_store::StoreError),

    #[error("Unknown reciter: {0}")]
    UnknownReciter(String),

    #[error("No chapter is open")]
    NoChapterOpen,

    #[error("Verse index {index} out of range for a chapter of {len} verses")]
    VerseOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SdkError>;
