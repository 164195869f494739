//! Text codec for addresses and masks
//!
//! Converts dotted-quad and `/N` prefix strings into `u32` values.

use crate::{Address, AddressError, Label, Result};

/// Parse a dotted-quad IPv4 address into a `u32`
///
/// Exactly four `.`-separated decimal fields are required. A field that is
/// empty, signed or contains non-digits yields `InvalidSyntax`; a field above
/// 255 yields `OutOfRange`.
///
/// # Examples
///
/// ```
/// use ipcalc_core::parse_address;
///
/// assert_eq!(parse_address("192.168.0.1").unwrap(), 3232235521);
/// assert!(parse_address("256.168.0.1").is_err());
/// ```
pub fn parse_address(input: &str) -> Result<u32> {
    let fields: Vec<&str> = input.split('.').collect();
    if fields.len() != 4 {
        return Err(AddressError::InvalidSyntax(format!(
            "expected 4 octets in {:?}, found {}",
            input,
            fields.len()
        )));
    }

    let mut result = 0u32;
    for (i, field) in fields.iter().enumerate() {
        let octet = parse_octet(field)?;
        result |= (octet as u32) << (24 - i * 8);
    }

    Ok(result)
}

fn parse_octet(field: &str) -> Result<u8> {
    // str::parse accepts a leading '+', so check the digits by hand first
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::InvalidSyntax(format!(
            "invalid octet {:?}",
            field
        )));
    }

    field
        .parse::<u64>()
        .ok()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| AddressError::OutOfRange(format!("octet {} exceeds 255", field)))
}

/// Parse a network mask given as `/N` or as a dotted quad
///
/// The mask must be contiguous (ones followed by zeros); anything else is
/// rejected with `NonContiguousMask`.
///
/// # Examples
///
/// ```
/// use ipcalc_core::parse_mask;
///
/// assert_eq!(parse_mask("/25").unwrap(), 4294967168);
/// assert_eq!(parse_mask("255.255.255.128").unwrap(), 4294967168);
/// assert!(parse_mask("0.255.0.0").is_err());
/// ```
pub fn parse_mask(input: &str) -> Result<u32> {
    if input.len() <= 1 {
        return Err(AddressError::MaskParse(format!("{:?} is too short", input)));
    }

    let mask = match input.strip_prefix('/') {
        Some(prefix) => prefix_to_mask(parse_prefix(prefix)?),
        None => {
            let fields: Vec<&str> = input.split('.').collect();
            let well_formed = fields.len() == 4
                && fields
                    .iter()
                    .all(|field| !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()));
            if !well_formed {
                return Err(AddressError::MaskParse(format!(
                    "expected /N or a.b.c.d, got {:?}",
                    input
                )));
            }
            parse_address(input)?
        }
    };

    if !is_contiguous(mask) {
        return Err(AddressError::NonContiguousMask(format!(
            "{} ({})",
            input,
            Address::new(mask, Label::Netmask).bits()
        )));
    }

    Ok(mask)
}

fn parse_prefix(prefix: &str) -> Result<u8> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::MaskParse(format!(
            "invalid prefix length {:?}",
            prefix
        )));
    }

    match prefix.parse::<u8>() {
        Ok(len) if len <= 32 => Ok(len),
        _ => Err(AddressError::MaskParse(format!(
            "prefix length {} (must be 0-32)",
            prefix
        ))),
    }
}

/// Build a mask with the top `len` bits set
///
/// Lengths above 32 saturate to a full mask.
///
/// ```
/// use ipcalc_core::prefix_to_mask;
///
/// assert_eq!(prefix_to_mask(0), 0);
/// assert_eq!(prefix_to_mask(24), 0xFFFFFF00);
/// assert_eq!(prefix_to_mask(32), u32::MAX);
/// ```
pub fn prefix_to_mask(len: u8) -> u32 {
    let host_bits = 32u32.saturating_sub(len as u32);
    u32::MAX.checked_shl(host_bits).unwrap_or(0)
}

/// Count of set bits in `mask`
///
/// Only a true prefix length when the mask is contiguous.
pub fn mask_to_prefix(mask: u32) -> u8 {
    mask.count_ones() as u8
}

/// True when `mask` is a run of ones followed by a run of zeros
pub fn is_contiguous(mask: u32) -> bool {
    let host = !mask;
    host & host.wrapping_add(1) == 0
}
