pub mod cli;
pub mod configuration;
pub mod delivery_client;
pub mod domain;
pub mod form;
pub mod recipients;
pub mod report;
pub mod send_request;
pub mod telemetry;

/// Walks the whole chain of sources so that `Debug` output shows every
/// underlying cause, not just the top-level error.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
