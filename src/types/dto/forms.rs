use std::collections::HashMap;

/// Raw multipart form as received, before validation
///
/// `image` is only present when a non-empty file part was attached.
#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    pub fields: HashMap<String, String>,
    pub image: Option<Vec<u8>>,
}

impl FormSubmission {
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_image(mut self, bytes: Vec<u8>) -> Self {
        self.image = Some(bytes);
        self
    }

    /// Raw value as submitted, empty when absent
    pub fn raw(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }
}
