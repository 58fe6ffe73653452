use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

pub const DEFAULT_PORT: u16 = 80;

/// Ordered list of ports probed for every address.
///
/// Duplicates are kept; the order only decides dispatch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortList(Vec<u16>);

impl PortList {
    pub fn new(ports: Vec<u16>) -> Self {
        Self(ports)
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }
}

impl Default for PortList {
    fn default() -> Self {
        Self(vec![DEFAULT_PORT])
    }
}

impl FromStr for PortList {
    type Err = InputError;

    /// Parses a comma separated list like `"80,443,8080"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(InputError::EmptyPortList);
        }

        let ports = s
            .split(',')
            .map(parse_port)
            .collect::<Result<Vec<u16>, InputError>>()?;

        Ok(Self(ports))
    }
}

fn parse_port(token: &str) -> Result<u16, InputError> {
    match token.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(InputError::InvalidPort {
            token: token.to_string(),
        }),
    }
}

impl fmt::Display for PortList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: String = self
            .0
            .iter()
            .map(u16::to_string)
            .collect::<Vec<String>>()
            .join(",");
        f.write_str(&joined)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
