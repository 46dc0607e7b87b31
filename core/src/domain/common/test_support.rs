use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::domain::{
    common::{ImageConfig, services::Service},
    firebase::ports::MockDocumentStore,
    llm::{LLMError, MockLLMClient},
};

pub type TestService = Service<MockLLMClient, MockDocumentStore>;

/// Model mock answering exactly one call with `reply`.
pub fn llm_replying(reply: Result<String, LLMError>) -> MockLLMClient {
    let mut llm = MockLLMClient::new();
    llm.expect_generate().times(1).returning(move |_| {
        let reply = reply.clone();
        Box::pin(async move { reply })
    });
    llm
}

/// Model mock that fails the test if it is called at all.
pub fn llm_never_called() -> MockLLMClient {
    let mut llm = MockLLMClient::new();
    llm.expect_generate().times(0);
    llm
}

pub fn test_image_config() -> ImageConfig {
    ImageConfig {
        max_upload_bytes: 1024 * 1024,
        max_pixels: 1_000_000,
    }
}

pub fn service_with(llm: Option<MockLLMClient>) -> TestService {
    Service::new(llm, None, "gpt-4o".to_string(), test_image_config())
}

pub fn png_bytes() -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([10, 200, 30])));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}
