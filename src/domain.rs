pub mod message_body;
pub mod scheduled_time;
pub mod subject;

pub use message_body::MessageBody;
pub use scheduled_time::ScheduledTime;
pub use subject::Subject;
