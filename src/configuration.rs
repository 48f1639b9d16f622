#[derive(serde::Deserialize)]
pub struct Settings {
    pub delivery: DeliverySettings,
}

/// Where the remote delivery service lives and how long the single outbound
/// call is allowed to take before it is written off as a transport failure.
#[derive(serde::Deserialize)]
pub struct DeliverySettings {
    pub base_url: String,
    pub timeout_milliseconds: u64,
}

impl DeliverySettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();

    // Read values from a top-level file named `configuration`, with any
    // extension that `config` knows how to parse: yaml, json, etc.
    settings.merge(config::File::with_name("configuration"))?;

    // Try to convert the configuration values it read into our "Settings" type
    settings.try_into()
}
