use resplink_transport::{LinkStream, TransportConfig};
use tracing::info;

use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::Result;

/// Open `target` at `baud_rate` with default configuration.
///
/// `target` is a serial device path or `tcp://host:port`. Blocks for the
/// default settle delay before returning.
pub fn connect(target: &str, baud_rate: u32) -> Result<Client<LinkStream, LinkStream>> {
    connect_with_config(target, baud_rate, ClientConfig::default())
}

/// Open `target` with explicit configuration.
///
/// Transport failures are returned unchanged and never retried.
pub fn connect_with_config(
    target: &str,
    baud_rate: u32,
    config: ClientConfig,
) -> Result<Client<LinkStream, LinkStream>> {
    let transport = TransportConfig {
        target: target.to_string(),
        baud_rate,
        read_timeout: config.read_timeout,
    };

    let writer = resplink_transport::open(&transport)?;
    let reader = writer.try_clone()?;

    info!(
        link = target,
        transport = writer.transport_name(),
        settle_ms = config.settle_delay.as_millis() as u64,
        max_read_attempts = config.retry.max_read_attempts,
        backoff_budget_ms = config.retry.worst_case_backoff().as_millis() as u64,
        "link open, waiting for device to settle"
    );
    if !config.settle_delay.is_zero() {
        std::thread::sleep(config.settle_delay);
    }

    Ok(Client::from_parts(reader, writer, config))
}

impl Client<LinkStream, LinkStream> {
    /// Open a client on `target`; see [`connect`].
    pub fn open(target: &str, baud_rate: u32) -> Result<Self> {
        connect(target, baud_rate)
    }

    /// Open a client on `target`; see [`connect_with_config`].
    pub fn open_with_config(target: &str, baud_rate: u32, config: ClientConfig) -> Result<Self> {
        connect_with_config(target, baud_rate, config)
    }
}
