#[derive(Debug, Clone)]
pub struct Subject(String);

impl Subject {
    /// The subject is a required field: anything goes as long as it is not
    /// blank. The value is stored verbatim, surrounding whitespace included.
    pub fn parse(s: String) -> Result<Self, String> {
        if s.trim().is_empty() {
            Err("The subject is required and cannot be blank.".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
