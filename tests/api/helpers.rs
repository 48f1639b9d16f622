use std::time::Duration;

use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use once_cell::sync::Lazy;
use wiremock::MockServer;

use mass_email_sender::delivery_client::DeliveryClient;
use mass_email_sender::form::SendForm;
use mass_email_sender::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialized once rather than for each test case
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_lvl = "info".into();
    let subscriber_name = "test".into();

    // The sink is part of the type returned by `get_subscriber`, so the two
    // branches cannot share one variable
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_lvl, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_lvl, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub delivery_server: MockServer,
    pub client: DeliveryClient,
}

/// Stand up a fake delivery service and a client pointed at it.
///
/// The timeout is short so the slow-server tests settle quickly.
pub async fn spawn_client() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // Next invocations get skipped
    Lazy::force(&TRACING);

    let delivery_server = MockServer::start().await;
    let client = DeliveryClient::new(delivery_server.uri(), Duration::from_millis(500));

    TestApp {
        delivery_server,
        client,
    }
}

/// A form with the two always-required fields already filled in.
pub fn submission_form() -> SendForm {
    let mut form = SendForm::new();
    form.set_subject(Sentence(1..2).fake())
        .expect("Failed to set the subject");
    form.set_body(Paragraph(1..10).fake())
        .expect("Failed to set the body");
    form
}

/// The raw body of the most recent request the fake delivery service saw.
///
/// Multipart bodies built from text fields and a text/csv part are valid
/// UTF-8 end to end, so the wire shape can be asserted on the decoded string.
pub async fn last_submission_body(delivery_server: &MockServer) -> String {
    let requests = delivery_server
        .received_requests()
        .await
        .expect("Failed to fetch the recorded requests");
    let last = requests
        .last()
        .expect("No submission reached the delivery service");
    String::from_utf8(last.body.clone()).expect("Failed to decode the submission body")
}
