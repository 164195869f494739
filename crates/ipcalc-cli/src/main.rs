use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ipcalc_cidr::{Network, RenderOptions, MAX_SUBNETS};
use ipcalc_core::{parse_address, parse_mask, Address, Label};

mod report;

use report::{Report, Split};

/// IPv4 subnet calculator: network, host range, broadcast and subnet splits
#[derive(Parser)]
#[command(name = "ipcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Display extended output (binary form of every address)
    #[arg(short, long)]
    extended: bool,

    /// Display the address class
    #[arg(short, long)]
    class: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored error messages
    #[arg(long)]
    no_color: bool,

    /// Maximum number of subnets a split may produce
    #[arg(
        long,
        env = "IPCALC_MAX_SUBNETS",
        default_value_t = MAX_SUBNETS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_SUBNETS)
    )]
    max_subnets: u64,

    /// IPv4 address (e.g., 192.168.0.1)
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Network mask as /N or a.b.c.d
    #[arg(value_name = "MASK")]
    mask: String,

    /// Finer mask to split the network into
    #[arg(value_name = "SUBNET_MASK")]
    subnet_mask: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Tab-separated report
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output, one row per network
    Csv,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // help and version go to stdout and exit 0
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(&cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("IPCALC_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let report = build_report(cli)?;
    let options = RenderOptions {
        description: true,
        extended: cli.extended,
        class: cli.class,
    };

    let mut stdout = std::io::stdout().lock();
    match cli.output {
        OutputFormat::Human => report::write_human(&mut stdout, &report, &options)?,
        OutputFormat::Json => report::write_json(&mut stdout, &report, &options, true)?,
        OutputFormat::JsonCompact => report::write_json(&mut stdout, &report, &options, false)?,
        OutputFormat::Csv => report::write_csv(&mut stdout, &report)?,
    }
    Ok(())
}

/// Parse every argument and validate the split before anything is printed
fn build_report(cli: &Cli) -> Result<Report> {
    let address = parse_address(&cli.address)
        .with_context(|| format!("invalid address {:?}", cli.address))?;
    let mask = parse_mask(&cli.mask).with_context(|| format!("invalid mask {:?}", cli.mask))?;

    let network = Network::new(address, mask);
    debug!(%network, "parsed network");

    let split = match cli.subnet_mask {
        Some(ref subnet_mask) => {
            let child_mask = parse_mask(subnet_mask)
                .with_context(|| format!("invalid subnet mask {:?}", subnet_mask))?;
            let subnets = network.subnets(child_mask, cli.max_subnets)?;
            Some(Split {
                from: cli.mask.clone(),
                to: subnet_mask.clone(),
                child_mask: Address::new(child_mask, Label::Netmask),
                subnets,
            })
        }
        None => None,
    };

    Ok(Report { network, split })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["ipcalc", "192.168.0.1", "/24"]);
        assert_eq!(cli.address, "192.168.0.1");
        assert_eq!(cli.mask, "/24");
        assert!(cli.subnet_mask.is_none());
        assert!(!cli.extended);
        assert!(!cli.class);
        assert!(matches!(cli.output, OutputFormat::Human));
        assert_eq!(cli.max_subnets, MAX_SUBNETS);
    }

    #[test]
    fn test_flags_and_subnet_mask() {
        let cli = Cli::parse_from(["ipcalc", "-e", "-c", "10.0.0.1", "255.0.0.0", "/10"]);
        assert!(cli.extended);
        assert!(cli.class);
        assert_eq!(cli.subnet_mask, Some("/10".to_string()));
    }

    #[test]
    fn test_output_format_json() {
        let cli = Cli::parse_from(["ipcalc", "--output", "json-compact", "10.0.0.1", "/8"]);
        assert!(matches!(cli.output, OutputFormat::JsonCompact));
    }

    #[test]
    fn test_argument_count() {
        assert!(Cli::try_parse_from(["ipcalc", "10.0.0.1"]).is_err());
        assert!(Cli::try_parse_from(["ipcalc", "10.0.0.1", "/8", "/9", "/10"]).is_err());
    }

    #[test]
    fn test_max_subnets_range() {
        let cli = Cli::parse_from(["ipcalc", "--max-subnets", "64", "10.0.0.1", "/8"]);
        assert_eq!(cli.max_subnets, 64);
        assert!(Cli::try_parse_from(["ipcalc", "--max-subnets", "0", "10.0.0.1", "/8"]).is_err());
        assert!(Cli::try_parse_from(["ipcalc", "--max-subnets", "16777217", "10.0.0.1", "/8"]).is_err());
    }

    #[test]
    fn test_build_report() {
        let cli = Cli::parse_from(["ipcalc", "192.168.0.1", "/24", "/26"]);
        let report = build_report(&cli).unwrap();
        assert_eq!(report.network.network().dots(), "192.168.0.0");

        let split = report.split.expect("split requested");
        assert_eq!(split.subnets.len(), 4);
    }

    #[test]
    fn test_build_report_errors() {
        let cli = Cli::parse_from(["ipcalc", "256.168.0.1", "/24"]);
        let err = build_report(&cli).unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            "invalid address \"256.168.0.1\": Value is out of range: octet 256 exceeds 255"
        );

        let cli = Cli::parse_from(["ipcalc", "192.168.0.1", "/24", "/24"]);
        let err = build_report(&cli).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Subnet prefix /24 must be larger than the prefix /24"
        );

        let cli = Cli::parse_from(["ipcalc", "--max-subnets", "2", "10.0.0.0", "/8", "/16"]);
        assert!(build_report(&cli).is_err());
    }

    #[test]
    fn test_run_fails_before_output() {
        let cli = Cli::parse_from(["ipcalc", "192.168.0.1", "0.255.0.0"]);
        let err = run(&cli).unwrap_err();
        assert!(format!("{:#}", err).starts_with("invalid mask \"0.255.0.0\": Mask is not contiguous"));

        let cli = Cli::parse_from(["ipcalc", "192.168.0.1", "/24", "/16"]);
        let err = run(&cli).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Subnet prefix /16 must be larger than the prefix /24"
        );

        let cli = Cli::parse_from(["ipcalc", "192.168.0.1", "/24", "a.b.c.d"]);
        assert!(run(&cli).is_err());
    }
}
