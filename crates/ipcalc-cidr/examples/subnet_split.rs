//! Subnet split example
//!
//! Run with: cargo run -p ipcalc-cidr --example subnet_split

use ipcalc_cidr::{Network, RenderOptions, MAX_SUBNETS};
use ipcalc_core::parse_mask;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("ipcalc - Subnet Split Example\n");

    let net = Network::parse("192.168.10.0", "/24")?;
    let mut stdout = std::io::stdout();
    net.render(&mut stdout, &RenderOptions::default())?;

    println!("\nSplitting {} into /26:", net);
    for (i, subnet) in net.subnets(parse_mask("/26")?, MAX_SUBNETS)?.enumerate() {
        println!(
            "  {}: {} ({} - {}, {} hosts)",
            i + 1,
            subnet,
            subnet.host_min(),
            subnet.host_max(),
            subnet.host_count()
        );
    }

    Ok(())
}
