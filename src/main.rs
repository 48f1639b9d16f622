use std::process::ExitCode;

use clap::Parser;
use uuid::Uuid;

use mass_email_sender::cli::Args;
use mass_email_sender::configuration::get_configuration;
use mass_email_sender::delivery_client::DeliveryClient;
use mass_email_sender::form::SendForm;
use mass_email_sender::recipients::CsvAttachment;
use mass_email_sender::report::DeliveryReport;
use mass_email_sender::send_request::SendRequest;
use mass_email_sender::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries nothing but the rendered report
    let subscriber = get_subscriber("mass_email_sender".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber);

    // Panic if we can't read the configuration file
    let configuration = get_configuration().expect("Failed to read configuration");
    let timeout = configuration.delivery.timeout();
    let client = DeliveryClient::new(configuration.delivery.base_url, timeout);

    let mut report = DeliveryReport::new();
    let mut form = SendForm::new();
    form.set_subject(args.subject)?;
    form.set_body(args.body)?;

    if let Some(path) = &args.file {
        match CsvAttachment::load(path).await {
            Ok(attachment) => {
                tracing::info!(
                    "Extracted {} candidate addresses from {}",
                    attachment.email_candidates().len(),
                    attachment.file_name()
                );
                form.attach_file(attachment)?;
            }
            Err(error) => {
                tracing::error!(error.cause_chain = ?error, "Failed to read the recipient file");
                report.record_failure(error.to_string());
                println!("{}", report.render());
                return Ok(ExitCode::FAILURE);
            }
        }
    } else if let Some(emails) = args.emails {
        form.set_recipients(emails)?;
    }

    if let Some(schedule) = args.schedule {
        form.set_schedule(schedule)?;
    }

    let request = form.begin_submit()?;
    submit(&client, request, &mut report).await;
    form.settle();

    println!("{}", report.render());

    if report.failed() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[tracing::instrument(
    name = "Submitting a mass email request",
    skip(client, request, report),
    fields(submission_id = %Uuid::new_v4(), subject = %request.subject)
)]
async fn submit(client: &DeliveryClient, request: SendRequest, report: &mut DeliveryReport) {
    report.begin_attempt();

    match client.send(request).await {
        Ok(response) => {
            tracing::info!(
                "The delivery service accepted the submission: {} valid, {} invalid",
                response.valid_emails.len(),
                response.invalid_emails.len()
            );
            report.record_success(response);
        }
        Err(error) => {
            tracing::error!(
                // Record the error chain as structured field
                // on log record
                error.cause_chain = ?error,
                "The delivery attempt failed"
            );
            report.record_failure(error.to_string());
        }
    }
}
