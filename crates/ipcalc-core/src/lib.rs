//! Core types for ipcalc (IPv4 subnet calculator)
//!
//! This crate provides the address codec used throughout the workspace:
//! - [`Address`] - labelled 32-bit IPv4 value with dotted/binary formatting
//! - [`AddressClass`] - classful network class (A-E)
//! - [`parse_address`] / [`parse_mask`] - text to `u32` parsing
//! - [`AddressError`] - Error types
//!
//! ```
//! use ipcalc_core::{parse_address, Address, Label};
//!
//! let value = parse_address("192.168.0.1").unwrap();
//! let addr = Address::new(value, Label::Address);
//! assert_eq!(addr.dots(), "192.168.0.1");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;

pub mod codec;

pub use codec::{is_contiguous, mask_to_prefix, parse_address, parse_mask, prefix_to_mask};

/// Display label attached to an [`Address`]
///
/// Only used when rendering; it never takes part in arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Address,
    Netmask,
    Network,
    HostMin,
    HostMax,
    Broadcast,
    HostsPerNet,
}

impl Label {
    /// Text printed in front of the value in a report line
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Address => "Address",
            Label::Netmask => "Netmask",
            Label::Network => "Network",
            Label::HostMin => "HostMin",
            Label::HostMax => "HostMax",
            Label::Broadcast => "Broadcast",
            Label::HostsPerNet => "Hosts/Net",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classful address class, decided by the first octet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AddressClass {
    A,
    B,
    C,
    D,
    E,
}

impl AddressClass {
    /// Classify by first octet
    ///
    /// ```
    /// use ipcalc_core::AddressClass;
    ///
    /// assert_eq!(AddressClass::from_first_octet(10), AddressClass::A);
    /// assert_eq!(AddressClass::from_first_octet(192), AddressClass::C);
    /// ```
    pub fn from_first_octet(octet: u8) -> Self {
        match octet {
            0..=127 => AddressClass::A,
            128..=191 => AddressClass::B,
            192..=223 => AddressClass::C,
            224..=239 => AddressClass::D,
            240..=255 => AddressClass::E,
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AddressClass::A => "A",
            AddressClass::B => "B",
            AddressClass::C => "C",
            AddressClass::D => "D",
            AddressClass::E => "E",
        };
        f.write_str(s)
    }
}

/// IPv4 address value paired with a display label
///
/// The value is held in host order with the most significant octet first,
/// so `192.168.0.1` is `0xC0A80001`.
///
/// # Examples
///
/// ```
/// use ipcalc_core::{Address, Label};
///
/// let addr = Address::new(3232235521, Label::Address);
/// assert_eq!(addr.decimal(), "3232235521");
/// assert_eq!(addr.bits(), "11000000.10101000.00000000.00000001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    value: u32,
    label: Label,
}

impl Address {
    pub fn new(value: u32, label: Label) -> Self {
        Self { value, label }
    }

    /// Raw 32-bit value
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn label(&self) -> Label {
        self.label
    }

    /// Octets, most significant first
    pub fn octets(&self) -> [u8; 4] {
        self.value.to_be_bytes()
    }

    /// Decimal rendering of the raw value
    pub fn decimal(&self) -> String {
        self.value.to_string()
    }

    /// Dotted-quad rendering (e.g. "192.168.0.1")
    pub fn dots(&self) -> String {
        let [a, b, c, d] = self.octets();
        format!("{}.{}.{}.{}", a, b, c, d)
    }

    /// Binary rendering, four zero-padded 8-bit groups separated by `.`
    pub fn bits(&self) -> String {
        let [a, b, c, d] = self.octets();
        format!("{:08b}.{:08b}.{:08b}.{:08b}", a, b, c, d)
    }

    pub fn class(&self) -> AddressClass {
        AddressClass::from_first_octet(self.octets()[0])
    }

    /// Count of set bits; the CIDR prefix length when the value is a mask
    pub fn prefix_len(&self) -> u8 {
        mask_to_prefix(self.value)
    }

    /// Write one report line: `label:\tdots`, plus `\tbits` in extended mode
    pub fn render<W: Write>(&self, writer: &mut W, extended: bool) -> io::Result<()> {
        if extended {
            writeln!(writer, "{}:\t{}\t{}", self.label, self.dots(), self.bits())
        } else {
            writeln!(writer, "{}:\t{}", self.label, self.dots())
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dots())
    }
}

/// Error types for address and mask parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Malformed numeric token (empty, signed, non-digit, wrong field count)
    #[error("Value has invalid syntax: {0}")]
    InvalidSyntax(String),

    /// Octet beyond 0-255
    #[error("Value is out of range: {0}")]
    OutOfRange(String),

    /// Mask matches neither `/N` nor `a.b.c.d`
    #[error("Error when parsing mask: {0}")]
    MaskParse(String),

    /// Mask bits are not a run of ones followed by zeros
    #[error("Mask is not contiguous: {0}")]
    NonContiguousMask(String),
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, AddressError>;
