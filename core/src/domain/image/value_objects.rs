use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use image::ImageFormat;

/// Raw upload as received from the client. Lives for one request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl UploadedImage {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
            file_name: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Bytes that decoded as a raster image.
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    bytes: Bytes,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl ValidatedImage {
    pub(crate) fn new(bytes: Bytes, format: ImageFormat, width: u32, height: u32) -> Self {
        Self {
            bytes,
            format,
            width,
            height,
        }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// MIME type of the detected container format, not the one the client claimed.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn to_data_url(&self) -> String {
        let payload = general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime_type(), payload)
    }
}
