#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    JsonObject,
}

/// One chat turn sent to the model: an optional system message plus a user
/// turn carrying text and, optionally, an inline image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatPrompt {
    pub system: Option<String>,
    pub instruction: String,
    pub image_data_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub response_format: ResponseFormat,
}

impl ChatPrompt {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            ..Default::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_image(mut self, data_url: impl Into<String>) -> Self {
        self.image_data_url = Some(data_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn json(mut self) -> Self {
        self.response_format = ResponseFormat::JsonObject;
        self
    }
}
