use reqwest::Body;
use reqwest::multipart::Part;
use std::path::Path;
use tokio::fs::File;

use crate::amo::error::AmoError;

/// A file opened for a single streamed upload.
///
/// The handle is moved into the request body and closed when the request
/// finishes, whatever its outcome.
#[derive(Debug)]
pub struct Attachment {
    file: File,
    file_name: String,
    len: u64,
}

impl Attachment {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AmoError> {
        let path = path.as_ref();
        let to_error = |source| AmoError::Attachment {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).await.map_err(to_error)?;
        let len = file.metadata().await.map_err(to_error)?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Attachment {
            file,
            file_name,
            len,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> u64 {
        self.len
    }

    pub fn into_part(self) -> Part {
        Part::stream_with_length(Body::from(self.file), self.len).file_name(self.file_name)
    }
}
