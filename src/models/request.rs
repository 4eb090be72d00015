use bytes::Bytes;
use utoipa::ToSchema;

/// Form accepted by `POST /summarize`. Only used to describe the endpoint.
#[derive(ToSchema)]
pub struct SummarizeUpload {
    /// PDF file to summarize.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// A file received on the upload endpoint. Lives for one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub name: String,
    pub size: usize,
    pub content: Bytes,
}

impl UploadedDocument {
    pub fn new(name: String, content: Bytes) -> Self {
        let size = content.len();
        Self {
            name,
            size,
            content,
        }
    }
}

/// Case-sensitive check on the literal `.pdf` suffix.
pub fn has_pdf_extension(file_name: &str) -> bool {
    file_name.ends_with(".pdf")
}

/// Text pulled out of a single-page PDF.
///
/// Never blank after trimming; the original spacing is kept as extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Returns `None` when the text is empty or whitespace only.
    pub fn new(text: String) -> Option<Self> {
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
