use crate::recipients::CsvAttachment;

/// The two places recipient addresses can come from. A request carries
/// exactly one of them: making the choice an enum keeps "file or typed text,
/// never both, never neither" a structural fact instead of a runtime check.
#[derive(Debug, Clone)]
pub enum RecipientSource {
    /// Free-typed addresses, separated by commas or newlines, forwarded
    /// verbatim for the remote service to split and validate.
    Text(String),
    /// An uploaded `.csv` file, travelling as a binary part under its
    /// original name.
    Csv(CsvAttachment),
}

/// One outbound delivery payload, assembled from a fully validated form.
#[derive(Debug, Clone)]
pub struct SendRequest {
    pub subject: String,
    pub body: String,
    pub recipients: RecipientSource,
    /// Absent means "send immediately".
    pub scheduled_time: Option<String>,
}
