use std::time::Duration;

use claim::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use mass_email_sender::recipients::CsvAttachment;
use mass_email_sender::report::DeliveryReport;

use crate::helpers::{spawn_client, submission_form};

#[tokio::test]
async fn test_a_rejection_surfaces_the_remote_error_field() {
    let app = spawn_client().await;
    Mock::given(method("POST"))
        .and(path("/send-email"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({ "error": "Invalid emails provided" })),
        )
        .expect(1)
        .mount(&app.delivery_server)
        .await;

    let mut form = submission_form();
    form.set_recipients("not-an-email".to_string()).unwrap();
    let request = form.begin_submit().unwrap();

    let mut report = DeliveryReport::new();
    report.begin_attempt();
    let error = assert_err!(app.client.send(request).await);
    report.record_failure(error.to_string());
    form.settle();

    assert!(report.failed());
    assert_eq!(report.render(), "Invalid emails provided");
}

#[tokio::test]
async fn test_a_rejection_with_no_error_body_shows_the_generic_message() {
    let app = spawn_client().await;
    Mock::given(method("POST"))
        .and(path("/send-email"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&app.delivery_server)
        .await;

    let mut form = submission_form();
    form.set_recipients("a@x.com".to_string()).unwrap();
    let request = form.begin_submit().unwrap();

    let error = assert_err!(app.client.send(request).await);

    assert_eq!(error.to_string(), "Failed to send emails");
}

#[tokio::test]
async fn test_a_slow_delivery_service_settles_as_the_generic_failure() {
    let app = spawn_client().await;
    Mock::given(method("POST"))
        .and(path("/send-email"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Sent" }))
                // Longer than the timeout `spawn_client` configures
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&app.delivery_server)
        .await;

    let mut form = submission_form();
    form.set_recipients("a@x.com".to_string()).unwrap();
    let request = form.begin_submit().unwrap();

    let mut report = DeliveryReport::new();
    report.begin_attempt();
    let error = assert_err!(app.client.send(request).await);
    report.record_failure(error.to_string());
    form.settle();

    assert!(report.failed());
    assert_eq!(report.render(), "Failed to send emails");
}

#[tokio::test]
async fn test_a_new_attempt_clears_the_previous_failure_and_can_succeed() {
    let app = spawn_client().await;
    Mock::given(method("POST"))
        .and(path("/send-email"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.delivery_server)
        .await;

    let mut form = submission_form();
    form.set_recipients("a@x.com".to_string()).unwrap();
    let request = form.begin_submit().unwrap();

    let mut report = DeliveryReport::new();
    report.begin_attempt();
    let error = assert_err!(app.client.send(request).await);
    report.record_failure(error.to_string());
    form.settle();
    assert!(report.failed());

    // The service recovers before the user tries again
    app.delivery_server.reset().await;
    Mock::given(method("POST"))
        .and(path("/send-email"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "Sent" })),
        )
        .expect(1)
        .mount(&app.delivery_server)
        .await;

    let request = form.begin_submit().unwrap();
    report.begin_attempt();
    assert!(!report.failed());
    let response = assert_ok!(app.client.send(request).await);
    report.record_success(response);
    form.settle();

    assert!(!report.failed());
    assert_eq!(report.render(), "Sent");
}

#[tokio::test]
async fn test_a_failed_file_read_never_reaches_the_delivery_service() {
    let app = spawn_client().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "Sent" })),
        )
        .expect(0)
        .mount(&app.delivery_server)
        .await;

    let missing = std::env::temp_dir().join(format!("{}.csv", uuid::Uuid::new_v4()));
    let error = assert_err!(CsvAttachment::load(&missing).await);

    let mut report = DeliveryReport::new();
    report.record_failure(error.to_string());

    assert!(report.failed());
    assert_eq!(report.render(), "Error reading the file");
}
