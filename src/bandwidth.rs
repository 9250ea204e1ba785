use std::process::exit;

use anyhow::Context;
use bandwidth_match::{
    error::{self, codes},
    logging, parse_args, register, BandwidthError, BandwidthInfo, ConflictPolicy, MatchConfig,
    MatchRegistry,
};
use clap::Parser;

/// Parse bandwidth match options and print the resulting rule.
#[derive(Parser, Debug)]
#[clap(name = "bandwidth", version, about)]
struct Opts {
    /// Print in save form (options only, no match name)
    #[clap(long)]
    save: bool,
    /// Keep the first --greater_than/--less_than and ignore later ones
    #[clap(long)]
    legacy_conflicts: bool,
    /// Also dump the kernel match record as hex
    #[clap(long)]
    raw: bool,
    /// Show the match's own options and exit
    #[clap(long)]
    help_match: bool,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,
    /// Match options, e.g. `-- --greater_than 1000 --reset_interval day`
    #[clap(last = true)]
    match_opts: Vec<String>,
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn run(opts: Opts) -> anyhow::Result<()> {
    let mut registry = MatchRegistry::new();
    register(&mut registry)?;
    let ext = registry
        .get("bandwidth")
        .context("bandwidth match not registered")?;

    if opts.help_match {
        print!("{}", ext.help());
        return Ok(());
    }

    let policy = if opts.legacy_conflicts {
        ConflictPolicy::KeepFirst
    } else {
        ConflictPolicy::Reject
    };
    let config: MatchConfig = parse_args(ext, &opts.match_opts, policy)?;

    let mut line = String::new();
    if opts.save {
        ext.save(&config, &mut line)?;
    } else {
        ext.print(&config, &mut line)?;
    }
    println!("{line}");

    if opts.raw {
        println!("{}", hex(&BandwidthInfo::from(&config).to_bytes()));
    }

    Ok(())
}

fn exit_status(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BandwidthError>() {
        Some(err) => error::exit_code(err),
        None => codes::OTHER_PROBLEM,
    }
}

fn main() {
    let opts = Opts::parse();
    logging::init_logging(opts.verbose);

    if let Err(err) = run(opts) {
        eprintln!("bandwidth: {err:#}");
        exit(exit_status(&err));
    }
}
