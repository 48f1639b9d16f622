#[derive(Debug, Clone)]
pub struct MessageBody(String);

impl MessageBody {
    /// Like the subject, the body is required but otherwise free-form; the
    /// remote service decides what to make of its contents.
    pub fn parse(s: String) -> Result<Self, String> {
        if s.trim().is_empty() {
            Err("The message body is required and cannot be blank.".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
