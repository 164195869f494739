//! Network descriptors and subnet partitioning
//!
//! Provides utilities for working with an IPv4 network given as an address
//! and a mask:
//! - Derive network, host range, broadcast and host count
//! - Render the conventional ipcalc-style report
//! - Split a network into equal, contiguous child subnets
//!
//! # Examples
//!
//! ```
//! use ipcalc_cidr::Network;
//!
//! let net = Network::parse("192.168.1.10", "/24").unwrap();
//! assert_eq!(net.prefix_len(), 24);
//! assert_eq!(net.network().value(), 0xC0A80100); // 192.168.1.0
//! assert_eq!(net.broadcast().value(), 0xC0A801FF); // 192.168.1.255
//! assert!(net.contains(0xC0A80101)); // 192.168.1.1
//! assert!(!net.contains(0xC0A80001)); // 192.168.0.1
//! ```

use ipcalc_core::{parse_address, parse_mask, Address, AddressError, Label};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;

pub mod subnet;

pub use subnet::{create_subnets, subnet_count, Subnets, MAX_SUBNETS};

/// CIDR errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// Child prefix does not narrow the parent
    #[error("Subnet prefix /{child} must be larger than the prefix /{parent}")]
    PrefixTooSmall { parent: u8, child: u8 },

    /// Requested split exceeds the subnet ceiling
    #[error("Too many subnets: /{parent} to /{child} yields {count} subnets (limit {limit})")]
    TooManySubnets {
        parent: u8,
        child: u8,
        count: u64,
        limit: u64,
    },

    /// Address or mask failed to parse
    #[error(transparent)]
    Address(#[from] AddressError),
}

pub type Result<T> = std::result::Result<T, CidrError>;

/// Which sections of a [`Network`] report to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Address, netmask and CIDR prefix header
    pub description: bool,
    /// Append the binary form to every address line
    pub extended: bool,
    /// `CLASS x` line after the network line
    pub class: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            description: true,
            extended: false,
            class: false,
        }
    }
}

/// Subnet derived from an address and a mask
///
/// All fields are computed once in [`Network::new`] with wrapping 32-bit
/// arithmetic. The mask is not checked for contiguity here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    address: Address,
    mask: Address,
    network: Address,
    host_min: Address,
    host_max: Address,
    broadcast: Address,
    hosts_per_net: Address,
}

impl Network {
    /// Derive a network from raw address and mask values
    ///
    /// # Examples
    ///
    /// ```
    /// use ipcalc_cidr::Network;
    ///
    /// let net = Network::new(3232235521, 0xFFFFFF80);
    /// assert_eq!(net.host_min().value(), 3232235521);
    /// assert_eq!(net.host_max().value(), 3232235646);
    /// assert_eq!(net.host_count(), 126);
    /// ```
    pub fn new(address: u32, mask: u32) -> Self {
        let network = address & mask;
        let host_min = network.wrapping_add(1);
        let broadcast = network.wrapping_add(!mask);
        let host_max = broadcast.wrapping_sub(1);
        let host_count = broadcast.wrapping_sub(host_min);

        Self {
            address: Address::new(address, Label::Address),
            mask: Address::new(mask, Label::Netmask),
            network: Address::new(network, Label::Network),
            host_min: Address::new(host_min, Label::HostMin),
            host_max: Address::new(host_max, Label::HostMax),
            broadcast: Address::new(broadcast, Label::Broadcast),
            hosts_per_net: Address::new(host_count, Label::HostsPerNet),
        }
    }

    /// Parse an address and a mask (`/N` or dotted) and derive the network
    pub fn parse(address: &str, mask: &str) -> Result<Self> {
        let address = parse_address(address)?;
        let mask = parse_mask(mask)?;
        Ok(Self::new(address, mask))
    }

    /// Address the network was built from
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn mask(&self) -> Address {
        self.mask
    }

    pub fn network(&self) -> Address {
        self.network
    }

    pub fn host_min(&self) -> Address {
        self.host_min
    }

    pub fn host_max(&self) -> Address {
        self.host_max
    }

    pub fn broadcast(&self) -> Address {
        self.broadcast
    }

    /// Usable hosts as a labelled value
    pub fn hosts_per_net(&self) -> Address {
        self.hosts_per_net
    }

    pub fn host_count(&self) -> u32 {
        self.hosts_per_net.value()
    }

    /// Prefix length (set bits in the mask)
    pub fn prefix_len(&self) -> u8 {
        self.mask.prefix_len()
    }

    /// Check if IP address is in this network
    pub fn contains(&self, ip: u32) -> bool {
        (ip & self.mask.value()) == self.network.value()
    }

    /// Split into child subnets of `child_mask`, starting at this network's address
    ///
    /// See [`Subnets::new`].
    pub fn subnets(&self, child_mask: u32, limit: u64) -> Result<Subnets> {
        Subnets::new(self.address.value(), self.mask.value(), child_mask, limit)
    }

    /// Write the multi-line report
    ///
    /// Output is formatting only; nothing is recomputed.
    pub fn render<W: Write>(&self, writer: &mut W, options: &RenderOptions) -> io::Result<()> {
        if options.description {
            self.address.render(writer, options.extended)?;
            self.mask.render(writer, options.extended)?;
            writeln!(writer, "CIDR Prefix:\t/{}", self.prefix_len())?;
        }
        self.network.render(writer, options.extended)?;
        if options.class {
            writeln!(writer, "CLASS {}", self.address.class())?;
        }
        self.host_min.render(writer, options.extended)?;
        self.host_max.render(writer, options.extended)?;
        self.broadcast.render(writer, options.extended)?;
        writeln!(
            writer,
            "{}:\t{}",
            self.hosts_per_net.label(),
            self.hosts_per_net.value()
        )
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len())
    }
}
