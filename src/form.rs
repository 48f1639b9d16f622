use crate::domain::{MessageBody, ScheduledTime, Subject};
use crate::recipients::CsvAttachment;
use crate::send_request::{RecipientSource, SendRequest};

#[derive(thiserror::Error, Debug)]
pub enum FormError {
    #[error("{0}")]
    BadInput(String),
    #[error("Recipient text cannot be edited while a file is attached")]
    RecipientsLocked,
    #[error("A subject is required")]
    MissingSubject,
    #[error("A message body is required")]
    MissingBody,
    #[error("Recipients are required: type addresses or attach a .csv file")]
    MissingRecipients,
    #[error("A submission is already in flight")]
    SubmissionInFlight,
}

/// Editing accepts field transitions; Submitting rejects everything until
/// the attempt settles. At most one request is in flight per form.
enum Phase {
    Editing,
    Submitting,
}

/// The state of one submission form.
///
/// Fields are private and only move through the transition methods below, so
/// the two invariants the payload depends on live in one place: a file and
/// typed recipient text never travel together, and a form that is mid-flight
/// cannot be edited or re-submitted.
pub struct SendForm {
    subject: Option<Subject>,
    body: Option<MessageBody>,
    recipients: String,
    attachment: Option<CsvAttachment>,
    schedule: Option<ScheduledTime>,
    phase: Phase,
}

impl SendForm {
    pub fn new() -> Self {
        Self {
            subject: None,
            body: None,
            recipients: String::new(),
            attachment: None,
            schedule: None,
            phase: Phase::Editing,
        }
    }

    pub fn set_subject(&mut self, raw: String) -> Result<(), FormError> {
        self.editable()?;
        self.subject = Some(Subject::parse(raw).map_err(FormError::BadInput)?);
        Ok(())
    }

    pub fn set_body(&mut self, raw: String) -> Result<(), FormError> {
        self.editable()?;
        self.body = Some(MessageBody::parse(raw).map_err(FormError::BadInput)?);
        Ok(())
    }

    /// Typing into the recipient field is refused while a file is attached,
    /// the same way the text input greys out once a file is chosen.
    pub fn set_recipients(&mut self, raw: String) -> Result<(), FormError> {
        self.editable()?;
        if self.attachment.is_some() {
            return Err(FormError::RecipientsLocked);
        }
        self.recipients = raw;
        Ok(())
    }

    /// Attaching a file always succeeds over previously typed text; the text
    /// is kept in the form but the file wins at submission time.
    pub fn attach_file(&mut self, attachment: CsvAttachment) -> Result<(), FormError> {
        self.editable()?;
        self.attachment = Some(attachment);
        Ok(())
    }

    pub fn detach_file(&mut self) -> Result<(), FormError> {
        self.editable()?;
        self.attachment = None;
        Ok(())
    }

    pub fn set_schedule(&mut self, raw: String) -> Result<(), FormError> {
        self.editable()?;
        self.schedule = Some(ScheduledTime::parse(raw).map_err(FormError::BadInput)?);
        Ok(())
    }

    pub fn clear_schedule(&mut self) -> Result<(), FormError> {
        self.editable()?;
        self.schedule = None;
        Ok(())
    }

    /// Checks the required fields, assembles the outbound payload and moves
    /// the form into the Submitting phase.
    ///
    /// The attached file takes precedence over typed text. With no file, the
    /// typed text travels trimmed as a whole; a blank value is refused here
    /// rather than left for the remote service to bounce.
    pub fn begin_submit(&mut self) -> Result<SendRequest, FormError> {
        self.editable()?;

        let subject = self.subject.as_ref().ok_or(FormError::MissingSubject)?;
        let body = self.body.as_ref().ok_or(FormError::MissingBody)?;

        let recipients = match &self.attachment {
            Some(attachment) => RecipientSource::Csv(attachment.clone()),
            None => {
                let typed = self.recipients.trim();
                if typed.is_empty() {
                    return Err(FormError::MissingRecipients);
                }
                RecipientSource::Text(typed.to_owned())
            }
        };

        let request = SendRequest {
            subject: subject.as_ref().to_owned(),
            body: body.as_ref().to_owned(),
            recipients,
            scheduled_time: self.schedule.as_ref().map(|time| time.as_ref().to_owned()),
        };

        self.phase = Phase::Submitting;
        Ok(request)
    }

    /// The attempt resolved (either way); the form can be edited and
    /// submitted again.
    pub fn settle(&mut self) {
        self.phase = Phase::Editing;
    }

    fn editable(&self) -> Result<(), FormError> {
        match self.phase {
            Phase::Editing => Ok(()),
            Phase::Submitting => Err(FormError::SubmissionInFlight),
        }
    }
}

impl Default for SendForm {
    fn default() -> Self {
        Self::new()
    }
}
