use std::time::Duration;

use clap::{Args, Subcommand};
use resplink_client::{Client, ClientConfig, RetryPolicy};
use resplink_transport::LinkStream;

use crate::exit::{client_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod ping;
pub mod ports;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send one command and print its reply.
    Send(SendArgs),
    /// Send PING and report round-trip latency.
    Ping(PingArgs),
    /// List serial devices on this host.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Ping(args) => ping::run(args, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// How to reach the device and how patiently to wait for replies.
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Serial device path (e.g. /dev/ttyUSB0, COM3) or tcp://host:port bridge.
    #[arg(env = "RESPLINK_TARGET")]
    pub target: String,
    /// Serial baud rate. Ignored for TCP bridges.
    #[arg(long, short = 'b', default_value = "115200", env = "RESPLINK_BAUD")]
    pub baud: u32,
    /// Upper bound on one blocking read (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub read_timeout: String,
    /// Pause after opening the link before the first command.
    #[arg(long, default_value = "3s", env = "RESPLINK_SETTLE")]
    pub settle: String,
    /// Decode attempts per command before giving up.
    #[arg(long, default_value = "50")]
    pub max_attempts: u32,
    /// Backoff growth per incomplete attempt.
    #[arg(long, default_value = "5ms")]
    pub backoff: String,
}

impl LinkArgs {
    pub fn client_config(&self) -> CliResult<ClientConfig> {
        let read_timeout = parse_duration(&self.read_timeout)?;
        if read_timeout.is_zero() {
            return Err(CliError::new(USAGE, "--read-timeout must be greater than zero"));
        }
        if self.max_attempts == 0 {
            return Err(CliError::new(USAGE, "--max-attempts must be at least 1"));
        }

        Ok(ClientConfig {
            read_timeout,
            settle_delay: parse_duration(&self.settle)?,
            retry: RetryPolicy {
                max_read_attempts: self.max_attempts,
                backoff_unit: parse_duration(&self.backoff)?,
                ..RetryPolicy::default()
            },
            ..ClientConfig::default()
        })
    }

    pub fn open(&self) -> CliResult<Client<LinkStream, LinkStream>> {
        let config = self.client_config()?;
        Client::open_with_config(&self.target, self.baud, config)
            .map_err(|err| client_error(&format!("failed to open {}", self.target), err))
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Command verb and arguments, sent as bulk strings.
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PingArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Number of pings to send.
    #[arg(long, short = 'n', default_value = "1")]
    pub count: u32,
    /// Pause between pings.
    #[arg(long, default_value = "0ms")]
    pub interval: String,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse `5s`, `500ms` or a bare number of seconds. Zero is allowed.
pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
