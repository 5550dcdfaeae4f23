use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPortType, StopBits};
use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::stream::LinkStream;

/// Open a serial device at `path` (8N1, no flow control).
pub fn open_serial(path: &str, baud_rate: u32, read_timeout: Duration) -> Result<LinkStream> {
    let port = serialport::new(path, baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(read_timeout)
        .open()
        .map_err(|source| TransportError::Open {
            target: path.to_string(),
            source,
        })?;

    info!(path, baud_rate, ?read_timeout, "opened serial device");
    Ok(LinkStream::from_serial(port))
}

/// A serial device visible to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSummary {
    /// Device path or name, usable as a transport target.
    pub name: String,
    /// Short description of the port kind (`usb`, `pci`, `bluetooth`, `unknown`).
    pub kind: &'static str,
    /// USB product string when the port is a USB adapter.
    pub product: Option<String>,
}

/// Enumerate the serial devices present on this host.
pub fn available_ports() -> Result<Vec<PortSummary>> {
    let ports = serialport::available_ports()?;
    debug!(count = ports.len(), "enumerated serial ports");

    Ok(ports
        .into_iter()
        .map(|info| {
            let (kind, product) = match info.port_type {
                SerialPortType::UsbPort(usb) => ("usb", usb.product),
                SerialPortType::PciPort => ("pci", None),
                SerialPortType::BluetoothPort => ("bluetooth", None),
                SerialPortType::Unknown => ("unknown", None),
            };
            PortSummary {
                name: info.port_name,
                kind,
                product,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_device_reports_target() {
        let err = open_serial(
            "/dev/resplink-no-such-device",
            115_200,
            Duration::from_millis(10),
        )
        .unwrap_err();

        match err {
            TransportError::Open { target, .. } => {
                assert_eq!(target, "/dev/resplink-no-such-device");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
