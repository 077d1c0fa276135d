/// Raw image bytes and the content type the origin declared for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Image request returned {0}")]
    Status(u16),
    #[error("Image is larger than {limit} bytes")]
    TooLarge { limit: usize },
    #[error("Timed out fetching image")]
    Timeout,
    #[error("Failed to fetch image: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ImageError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ImageError::Timeout
        } else {
            ImageError::Request(error.to_string())
        }
    }
}

/// Port trait for downloading album art.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ImageSource: Send + Sync {
    /// Downloads `url`, failing with [`ImageError::TooLarge`] once more than `max_bytes` arrive.
    async fn fetch(&self, url: &str, max_bytes: usize) -> Result<FetchedImage, ImageError>;
}
