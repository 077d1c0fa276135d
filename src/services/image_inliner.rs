use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use tracing::instrument;

use crate::ports::image::{FetchedImage, ImageError, ImageSource};

const FALLBACK_MIME: &str = "image/jpeg";

/// Turns remote album art into `data:` URIs so badges render without extra requests.
pub struct ImageInliner {
    source: Arc<dyn ImageSource>,
    max_bytes: usize,
}

impl ImageInliner {
    pub fn new(source: Arc<dyn ImageSource>, max_bytes: usize) -> Self {
        Self { source, max_bytes }
    }

    /// Returns `None` on any failure; the caller renders without artwork.
    #[instrument(skip(self))]
    pub async fn inline(&self, url: &str) -> Option<String> {
        if url.trim().is_empty() {
            return None;
        }

        match self.source.fetch(url, self.max_bytes).await {
            Ok(image) if image.bytes.len() > self.max_bytes => {
                tracing::warn!(size = image.bytes.len(), "Album art exceeds the size limit");
                None
            }
            Ok(image) => Some(to_data_uri(image.content_type.as_deref(), &image.bytes)),
            Err(error) => {
                tracing::warn!(error = %error, "Failed to inline album art");
                None
            }
        }
    }
}

/// `data:<mime>;base64,<payload>`
///
/// The declared type ends up in an `<img src>` attribute, so anything that isn't a plain
/// `image/<subtype>` token is replaced by a generic image type.
pub fn to_data_uri(content_type: Option<&str>, bytes: &[u8]) -> String {
    let mime = content_type
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|mime| is_image_mime(mime))
        .unwrap_or(FALLBACK_MIME);
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn is_image_mime(mime: &str) -> bool {
    let Some((kind, subtype)) = mime.split_once('/') else {
        return false;
    };
    kind.eq_ignore_ascii_case("image")
        && !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Downloads images over HTTP with a timeout and a streaming size ceiling.
pub struct HttpImageSource {
    client: Client,
    timeout: Duration,
}

impl HttpImageSource {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str, max_bytes: usize) -> Result<FetchedImage, ImageError> {
        let mut response = self.client.get(url).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status(status.as_u16()));
        }

        if let Some(length) = response.content_length() {
            if length > max_bytes as u64 {
                return Err(ImageError::TooLarge { limit: max_bytes });
            }
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        // Content-Length can be absent or wrong, so the limit is enforced while reading too
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ImageError::TooLarge { limit: max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchedImage {
            content_type,
            bytes,
        })
    }
}
