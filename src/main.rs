//! Symcirc - symbolic transfer functions of lumped networks.
//!
//! Reads a netlist, enumerates the common spanning trees of its two graphs
//! and prints the driving-point admittance at the `.interface` node.
//!
//! # Usage
//!
//! ```bash
//! symcirc filter.net --numeric --trees
//! ```

use std::path::PathBuf;

use clap::Parser;
use symcirc_core::{dsl, error::Result, AnalysisConfig, CircuitBuilder, Metacircuit};

/// Symbolic two-graph circuit solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file
    #[arg(value_name = "NETLIST")]
    netlist: PathBuf,

    /// Print the unsimplified pair
    #[arg(long)]
    raw: bool,

    /// Also print the numeric pair
    #[arg(short, long)]
    numeric: bool,

    /// Print tree counts and enumeration statistics
    #[arg(short, long)]
    trees: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    // Parse the netlist file
    let ast = dsl::parse_file(&args.netlist)?;

    // Build the circuit
    let mut builder = CircuitBuilder::new();
    ast.replay(&mut builder);
    let circuit = builder.finish();

    let config = AnalysisConfig::new()
        .with_simplify(!args.raw)
        .with_numeric(args.numeric);
    let meta = Metacircuit::analyse_with(&circuit, &config);

    println!("{}", meta.to_display_string());

    if let Some(digit) = meta.digit() {
        println!("Y(s) = {} / {}", digit.numerator, digit.denominator);
    }

    if args.trees {
        let stats = meta.stats();
        println!(
            "trees: {} numerator, {} denominator, {} dropped",
            meta.numerator_trees(),
            meta.denominator_trees(),
            meta.dropped_trees()
        );
        println!(
            "search: {} trees, {} cycle probes, {} pruned branches",
            stats.trees, stats.probes, stats.pruned
        );
    }

    Ok(())
}
