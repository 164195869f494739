//! Report rendering for the CLI
//!
//! Renders a parsed network, and optionally its subnet split, as:
//! - Human-readable tab-separated text
//! - JSON (pretty or compact)
//! - CSV, one row per network
//!
//! Subnets are streamed from the lazy [`Subnets`] iterator in every format.

use anyhow::Result;
use serde::{Serialize, Serializer};
use std::io::Write;

use ipcalc_cidr::{Network, RenderOptions, Subnets};
use ipcalc_core::Address;

/// Everything the CLI prints
#[derive(Debug)]
pub struct Report {
    pub network: Network,
    pub split: Option<Split>,
}

/// Subnet split requested by a third positional argument
#[derive(Debug)]
pub struct Split {
    /// Mask argument as the user typed it
    pub from: String,
    /// Subnet mask argument as the user typed it
    pub to: String,
    pub child_mask: Address,
    pub subnets: Subnets,
}

#[derive(Serialize)]
struct NetworkRecord {
    address: String,
    netmask: String,
    prefix: u8,
    network: String,
    host_min: String,
    host_max: String,
    broadcast: String,
    hosts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    bits: Option<BitsRecord>,
}

#[derive(Serialize)]
struct BitsRecord {
    address: String,
    netmask: String,
    network: String,
    host_min: String,
    host_max: String,
    broadcast: String,
}

impl NetworkRecord {
    fn new(net: &Network, extended: bool) -> Self {
        let bits = extended.then(|| BitsRecord {
            address: net.address().bits(),
            netmask: net.mask().bits(),
            network: net.network().bits(),
            host_min: net.host_min().bits(),
            host_max: net.host_max().bits(),
            broadcast: net.broadcast().bits(),
        });

        Self {
            address: net.address().dots(),
            netmask: net.mask().dots(),
            prefix: net.prefix_len(),
            network: net.network().dots(),
            host_min: net.host_min().dots(),
            host_max: net.host_max().dots(),
            broadcast: net.broadcast().dots(),
            hosts: net.host_count(),
            bits,
        }
    }
}

/// Serializes subnets as a sequence without collecting them first
struct SubnetSeq<'a> {
    subnets: &'a Subnets,
    extended: bool,
}

impl Serialize for SubnetSeq<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.subnets
                .clone()
                .map(|net| NetworkRecord::new(&net, self.extended)),
        )
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    network: NetworkRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subnets: Option<SubnetSeq<'a>>,
}

/// Write the tab-separated text report
pub fn write_human<W: Write>(writer: &mut W, report: &Report, options: &RenderOptions) -> Result<()> {
    report.network.render(writer, options)?;

    if let Some(ref split) = report.split {
        writeln!(writer)?;
        writeln!(
            writer,
            "Subnets after transition from {} to {}",
            split.from, split.to
        )?;
        writeln!(writer)?;
        writeln!(writer, "{}:\t{}", split.child_mask.label(), split.child_mask.dots())?;
        writeln!(writer, "CIDR Prefix:\t/{}", split.child_mask.prefix_len())?;

        // subnet lines always carry the binary form
        let subnet_options = RenderOptions {
            description: false,
            extended: true,
            class: false,
        };
        for (i, subnet) in split.subnets.clone().enumerate() {
            writeln!(writer, "{}.", i + 1)?;
            subnet.render(writer, &subnet_options)?;
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write the report as a JSON object
pub fn write_json<W: Write>(
    writer: &mut W,
    report: &Report,
    options: &RenderOptions,
    pretty: bool,
) -> Result<()> {
    let json = JsonReport {
        network: NetworkRecord::new(&report.network, options.extended),
        class: options
            .class
            .then(|| report.network.address().class().to_string()),
        subnets: report.split.as_ref().map(|split| SubnetSeq {
            subnets: &split.subnets,
            extended: options.extended,
        }),
    };

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &json)?;
    } else {
        serde_json::to_writer(&mut *writer, &json)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write the base network and each subnet as CSV rows
///
/// Row index 0 is the base network; subnets are numbered from 1.
pub fn write_csv<W: Write>(writer: &mut W, report: &Report) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "index",
        "address",
        "netmask",
        "prefix",
        "network",
        "host_min",
        "host_max",
        "broadcast",
        "hosts",
    ])?;

    write_csv_row(&mut wtr, 0, &report.network)?;
    if let Some(ref split) = report.split {
        for (i, subnet) in split.subnets.clone().enumerate() {
            write_csv_row(&mut wtr, i + 1, &subnet)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_csv_row<W: Write>(wtr: &mut csv::Writer<W>, index: usize, net: &Network) -> Result<()> {
    wtr.write_record([
        index.to_string(),
        net.address().dots(),
        net.mask().dots(),
        net.prefix_len().to_string(),
        net.network().dots(),
        net.host_min().dots(),
        net.host_max().dots(),
        net.broadcast().dots(),
        net.host_count().to_string(),
    ])?;
    Ok(())
}
