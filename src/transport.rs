//! Device link
//!
//! Line-delimited duplex channel to the gauge hardware. Inbound lines carry
//! button and posture events from the microcontroller; outbound lines carry
//! one full frame of dial positions per tick. The sampling loop talks to a
//! `DeviceLink` trait object, so tests substitute a fake and `--dry-run`
//! substitutes a console sink.

use std::io::{Read, Write};
use std::time::Duration;

use crate::error::GaugeError;
use crate::types::GaugeFrame;

pub const BAUD_RATE: u32 = 115_200;

/// Short read timeout keeps drains effectively non-blocking.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Inbound event parsed from one device line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// Operator pressed the hydration button (`B,WATER`)
    Hydration,
    /// Posture sensor state (`S,...` line, final character 1 = standing)
    Posture { standing: bool },
}

/// Parse one inbound line. Unrecognized or empty lines yield `None` and
/// are dropped without comment.
pub fn parse_line(line: &str) -> Option<DeviceEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line == "B,WATER" {
        return Some(DeviceEvent::Hydration);
    }
    if line.starts_with("S,") {
        return Some(DeviceEvent::Posture {
            standing: line.ends_with('1'),
        });
    }
    None
}

/// Encode one frame as the wire line `U,<w>,<t>,<h>,<p>,<e>,<c>\n`.
pub fn encode_frame(frame: &GaugeFrame) -> String {
    let v = frame.values();
    format!("U,{},{},{},{},{},{}\n", v[0], v[1], v[2], v[3], v[4], v[5])
}

/// Duplex link to the display hardware
pub trait DeviceLink {
    /// Drain whatever inbound events are immediately available. Must not
    /// block waiting for more input than the device has already sent.
    fn drain_events(&mut self) -> Vec<DeviceEvent>;

    /// Write one frame line to the device.
    fn send_frame(&mut self, frame: &GaugeFrame) -> Result<(), GaugeError>;
}

/// Serial-port-backed device link
pub struct SerialLink {
    port: Box<dyn serialport::SerialPort>,
    /// Bytes received but not yet terminated by a newline
    inbound: Vec<u8>,
}

impl SerialLink {
    /// Open the given serial device at the fixed display baud rate. The
    /// port closes when the link is dropped.
    pub fn open(path: &str) -> Result<Self, GaugeError> {
        let port = serialport::new(path, BAUD_RATE)
            .timeout(READ_TIMEOUT)
            .open()?;
        Ok(Self {
            port,
            inbound: Vec::new(),
        })
    }

    /// Split any complete lines out of the inbound buffer.
    fn take_complete_lines(&mut self) -> Vec<DeviceEvent> {
        let mut events = Vec::new();
        while let Some(pos) = self.inbound.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.inbound.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            if let Some(event) = parse_line(&line) {
                events.push(event);
            }
        }
        events
    }
}

impl DeviceLink for SerialLink {
    fn drain_events(&mut self) -> Vec<DeviceEvent> {
        let mut events = Vec::new();
        loop {
            let available = match self.port.bytes_to_read() {
                Ok(n) if n > 0 => n as usize,
                _ => break,
            };
            let mut chunk = vec![0u8; available];
            match self.port.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => self.inbound.extend_from_slice(&chunk[..n]),
                Err(err) => {
                    log::debug!("serial read stopped: {err}");
                    break;
                }
            }
            events.extend(self.take_complete_lines());
        }
        events
    }

    fn send_frame(&mut self, frame: &GaugeFrame) -> Result<(), GaugeError> {
        self.port.write_all(encode_frame(frame).as_bytes())?;
        Ok(())
    }
}

/// Dry-run link: logs outgoing frames instead of touching hardware
#[derive(Debug, Default)]
pub struct ConsoleLink;

impl DeviceLink for ConsoleLink {
    fn drain_events(&mut self) -> Vec<DeviceEvent> {
        Vec::new()
    }

    fn send_frame(&mut self, frame: &GaugeFrame) -> Result<(), GaugeError> {
        log::debug!("frame {}", encode_frame(frame).trim_end());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_hydration_marker() {
        assert_eq!(parse_line("B,WATER"), Some(DeviceEvent::Hydration));
        assert_eq!(parse_line("B,WATER\r"), Some(DeviceEvent::Hydration));
    }

    #[test]
    fn test_parse_posture_trailing_bit() {
        assert_eq!(parse_line("S,1"), Some(DeviceEvent::Posture { standing: true }));
        assert_eq!(parse_line("S,0"), Some(DeviceEvent::Posture { standing: false }));
        assert_eq!(
            parse_line("S,STAND,1"),
            Some(DeviceEvent::Posture { standing: true })
        );
        // anything other than a trailing 1 reads as sitting
        assert_eq!(parse_line("S,"), Some(DeviceEvent::Posture { standing: false }));
    }

    #[test]
    fn test_malformed_lines_are_dropped() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("garbage"), None);
        assert_eq!(parse_line("B,COFFEE"), None);
    }

    #[test]
    fn test_encode_frame_wire_format() {
        let frame = GaugeFrame {
            weather: 75,
            temperature: 28,
            hydration: 70,
            posture: 10,
            event: 75,
            commute: 62,
        };
        assert_eq!(encode_frame(&frame), "U,75,28,70,10,75,62\n");
    }

    #[test]
    fn test_encode_frame_bounds() {
        let frame = GaugeFrame {
            weather: 0,
            temperature: 100,
            hydration: 0,
            posture: 100,
            event: 0,
            commute: 100,
        };
        assert_eq!(encode_frame(&frame), "U,0,100,0,100,0,100\n");
    }
}
