//! Subnet partitioning
//!
//! Splits a parent network into `2^(child - parent)` equal child subnets.
//! Children are contiguous: each one starts right after the previous
//! broadcast address.

use crate::{CidrError, Network, Result};
use ipcalc_core::mask_to_prefix;
use tracing::{debug, trace};

/// Upper bound on the number of subnets a single split may produce
pub const MAX_SUBNETS: u64 = 1 << 24;

/// Number of child subnets when narrowing `parent` to `child`
///
/// # Examples
///
/// ```
/// use ipcalc_cidr::subnet_count;
///
/// assert_eq!(subnet_count(24, 26).unwrap(), 4);
/// assert!(subnet_count(24, 24).is_err());
/// ```
pub fn subnet_count(parent: u8, child: u8) -> Result<u64> {
    if child <= parent {
        return Err(CidrError::PrefixTooSmall { parent, child });
    }

    // Callers may pass lengths above 32; keep the shift in range
    Ok(1u64 << (child - parent).min(32))
}

/// Split a network into child subnets, collecting them into a `Vec`
///
/// Uses the default [`MAX_SUBNETS`] ceiling.
///
/// # Examples
///
/// ```
/// use ipcalc_cidr::create_subnets;
///
/// let subnets = create_subnets(3232235521, 0xFFFFFF00, 0xFFFFFF80).unwrap();
/// assert_eq!(subnets.len(), 2);
/// assert_eq!(subnets[1].network().value(), 3232235648);
/// ```
pub fn create_subnets(base_address: u32, parent_mask: u32, child_mask: u32) -> Result<Vec<Network>> {
    Ok(Subnets::new(base_address, parent_mask, child_mask, MAX_SUBNETS)?.collect())
}

/// Lazy iterator over the child subnets of a network
#[derive(Debug, Clone)]
pub struct Subnets {
    next_address: u32,
    child_mask: u32,
    remaining: u64,
}

impl Subnets {
    /// Prepare a split of `base_address`/`parent_mask` into `child_mask` subnets
    ///
    /// The first subnet keeps `base_address` as its address when that address
    /// lies in the first child block; otherwise it starts at the parent
    /// network. `limit` is clamped to [`MAX_SUBNETS`].
    ///
    /// # Errors
    ///
    /// - `PrefixTooSmall` when the child prefix does not exceed the parent's
    /// - `TooManySubnets` when the split would exceed `limit`
    pub fn new(base_address: u32, parent_mask: u32, child_mask: u32, limit: u64) -> Result<Self> {
        let parent = mask_to_prefix(parent_mask);
        let child = mask_to_prefix(child_mask);
        let count = subnet_count(parent, child)?;

        let limit = limit.min(MAX_SUBNETS);
        if count > limit {
            return Err(CidrError::TooManySubnets {
                parent,
                child,
                count,
                limit,
            });
        }

        let parent_network = base_address & parent_mask;
        let first_address = if (base_address & child_mask) == parent_network {
            base_address
        } else {
            parent_network
        };

        debug!(parent, child, count, "partitioning network");

        Ok(Self {
            next_address: first_address,
            child_mask,
            remaining: count,
        })
    }
}

impl Iterator for Subnets {
    type Item = Network;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let subnet = Network::new(self.next_address, self.child_mask);
        trace!(%subnet, "generated subnet");

        self.next_address = subnet.broadcast().value().wrapping_add(1);
        self.remaining -= 1;
        Some(subnet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Subnets {}
