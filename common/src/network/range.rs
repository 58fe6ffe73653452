//! # Address Range
//!
//! An inclusive span of IPv4 addresses and the lazy iterator that walks it
//! in ascending numeric order.

use std::fmt;
use std::iter::FusedIterator;
use std::net::Ipv4Addr;

use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// The whole IPv4 space, `0.0.0.0` to `255.255.255.255`.
    pub fn full() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED, Ipv4Addr::BROADCAST)
    }

    /// Builds a range from optional textual bounds, falling back to the
    /// matching end of the IPv4 space for a missing bound.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self, InputError> {
        let full: Self = Self::full();
        let start_addr: Ipv4Addr = start
            .map(parse_addr)
            .transpose()?
            .unwrap_or(full.start_addr);
        let end_addr: Ipv4Addr = end.map(parse_addr).transpose()?.unwrap_or(full.end_addr);
        Ok(Self::new(start_addr, end_addr))
    }

    /// True when start is numerically greater than end. Such a range yields nothing.
    fn is_inverted(&self) -> bool {
        u32::from(self.start_addr) > u32::from(self.end_addr)
    }

    /// Number of addresses the range covers.
    pub fn len(&self) -> u64 {
        if self.is_inverted() {
            return 0;
        }
        u64::from(u32::from(self.end_addr)) - u64::from(u32::from(self.start_addr)) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.is_inverted()
    }

    pub fn iter(&self) -> AddrIter {
        AddrIter {
            current: self.start_addr,
            end: self.end_addr,
            exhausted: self.is_inverted(),
        }
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) - ({})", self.start_addr, self.end_addr)
    }
}

/// Forward-only walk over an [`Ipv4Range`].
///
/// The end bound is compared *before* stepping, so a range ending at
/// `255.255.255.255` stops there instead of wrapping back to `0.0.0.0`.
#[derive(Debug, Clone)]
pub struct AddrIter {
    current: Ipv4Addr,
    end: Ipv4Addr,
    exhausted: bool,
}

impl Iterator for AddrIter {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let addr: Ipv4Addr = self.current;
        if addr == self.end {
            self.exhausted = true;
        } else {
            self.current = next_addr(addr);
        }
        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let remaining: u64 =
            u64::from(u32::from(self.end)) - u64::from(u32::from(self.current)) + 1;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for AddrIter {}

/// Increments an address as a big-endian 32-bit integer.
///
/// Carries from the last octet towards the first; `255.255.255.255` wraps to `0.0.0.0`.
pub fn next_addr(addr: Ipv4Addr) -> Ipv4Addr {
    let mut octets: [u8; 4] = addr.octets();
    for octet in octets.iter_mut().rev() {
        *octet = octet.wrapping_add(1);
        if *octet != 0 {
            break;
        }
    }
    Ipv4Addr::from(octets)
}

/// Parses a dotted IPv4 address, rejecting anything else.
fn parse_addr(input: &str) -> Result<Ipv4Addr, InputError> {
    input.trim().parse::<Ipv4Addr>().map_err(|_| InputError::InvalidAddress {
        input: input.to_string(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
