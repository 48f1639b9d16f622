use crate::delivery_client::DeliveryResponse;

enum Outcome {
    Delivered {
        message: String,
        valid_emails: Vec<String>,
        invalid_emails: Vec<String>,
    },
    Failed {
        message: String,
    },
}

/// Display state for one submission.
///
/// At most one settled outcome exists at a time: recording a success wipes
/// any earlier failure and vice versa, and starting a new attempt clears both
/// before it resolves.
pub struct DeliveryReport {
    outcome: Option<Outcome>,
}

impl DeliveryReport {
    pub fn new() -> Self {
        Self { outcome: None }
    }

    /// A new attempt is underway; nothing is shown until it settles.
    pub fn begin_attempt(&mut self) {
        self.outcome = None;
    }

    pub fn record_success(&mut self, response: DeliveryResponse) {
        self.outcome = Some(Outcome::Delivered {
            message: response.message,
            valid_emails: response.valid_emails,
            invalid_emails: response.invalid_emails,
        });
    }

    pub fn record_failure(&mut self, message: String) {
        self.outcome = Some(Outcome::Failed { message });
    }

    pub fn failed(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Failed { .. }))
    }

    /// The text shown to the user: the service's message followed by the
    /// valid and invalid address lists under their headings, each section
    /// omitted entirely when its list is empty; on failure, just the error
    /// message. An unsettled report renders as nothing.
    pub fn render(&self) -> String {
        match &self.outcome {
            None => String::new(),
            Some(Outcome::Failed { message }) => message.clone(),
            Some(Outcome::Delivered {
                message,
                valid_emails,
                invalid_emails,
            }) => {
                let mut sections = vec![message.clone()];
                if !valid_emails.is_empty() {
                    sections.push(format!("Valid Emails:\n{}", valid_emails.join("\n")));
                }
                if !invalid_emails.is_empty() {
                    sections.push(format!("Invalid Emails:\n{}", invalid_emails.join("\n")));
                }
                sections.join("\n\n")
            }
        }
    }
}

impl Default for DeliveryReport {
    fn default() -> Self {
        Self::new()
    }
}
