use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Composes multiple layers into `tracing`'s Subscriber
///
/// # USAGE:
/// We are using `impl Subscriber` as return type to avoid having to explicitly tell the
/// return type of Subscriber returned by the function.
/// The `sink` decides where the formatted logs end up: the binary hands in
/// `std::io::stderr` so that stdout stays reserved for the rendered report,
/// while tests hand in `std::io::sink` to keep the output quiet.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // Printing all spans at info-level
    // If the RUST_LOG env variable has not been set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));

    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    // the `with` function is provided by `SubscriberExt`, an extension trait
    // for `Subscriber` exposed by `tracing_subscriber`
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    // Redirect all `log`'s events to our subscriber
    LogTracer::init().expect("Failed to set logger");
    // `tracing::subscriber::set_global_default` is utilized to specify the subscriber for span processing
    set_global_default(subscriber).expect("Failed to set Global Subscriber");
}
