//! Tokenport CLI — inspect staking cooldowns, vesting progress, and APR
//! composition from an account snapshot and the portal stats API.

mod commands;
mod display;
mod snapshot;

use {
    clap::{App, AppSettings, Arg, SubCommand},
    std::process::exit,
    thiserror::Error,
};

use {tokenport_core::PortalError, tokenport_stats_client::StatsError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("bad parameter: {0}")]
    BadParameter(String),

    #[error(transparent)]
    Portal(#[from] PortalError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to install Ctrl-C handler: {0}")]
    CtrlC(#[from] ctrlc::Error),
}

fn snapshot_arg(required: bool) -> Arg<'static, 'static> {
    Arg::with_name("snapshot")
        .long("snapshot")
        .value_name("FILE")
        .takes_value(true)
        .required(required)
        .help("Path to an account snapshot JSON file")
}

fn now_arg() -> Arg<'static, 'static> {
    Arg::with_name("now")
        .long("now")
        .value_name("UNIX_SECONDS")
        .takes_value(true)
        .help("Reference clock override [default: wall clock]")
}

fn url_arg(required: bool) -> Arg<'static, 'static> {
    Arg::with_name("url")
        .long("url")
        .value_name("URL")
        .takes_value(true)
        .required(required)
        .help("Base URL of the portal stats API")
}

fn main() {
    env_logger::init();

    let matches = App::new("tokenport")
        .about("Tokenport portal inspector")
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("FORMAT")
                .takes_value(true)
                .possible_values(&["text", "json"])
                .default_value("text")
                .global(true)
                .help("Output format"),
        )
        .subcommand(
            SubCommand::with_name("cooldowns")
                .about("Show cooldown entries and the withdrawable total")
                .arg(snapshot_arg(true))
                .arg(now_arg()),
        )
        .subcommand(
            SubCommand::with_name("vesting")
                .about("Show vesting progress for the snapshot beneficiary")
                .arg(snapshot_arg(true)),
        )
        .subcommand(
            SubCommand::with_name("apr")
                .about("Show the composed APR and its contributing terms")
                .arg(snapshot_arg(false))
                .arg(url_arg(false))
                .arg(
                    Arg::with_name("wallet")
                        .long("wallet")
                        .value_name("ADDRESS")
                        .takes_value(true)
                        .requires("url")
                        .help("Wallet address for wallet-specific APR (with --url)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("stats")
                .about("Fetch network staking statistics")
                .arg(url_arg(true)),
        )
        .subcommand(
            SubCommand::with_name("watch")
                .about("Live countdown view over the snapshot cooldowns")
                .arg(snapshot_arg(true)),
        )
        .subcommand(
            SubCommand::with_name("example-snapshot")
                .about("Print an example snapshot file to stdout")
                .arg(now_arg()),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("cooldowns", Some(sub)) => commands::cooldowns(sub),
        ("vesting", Some(sub)) => commands::vesting(sub),
        ("apr", Some(sub)) => commands::apr(sub),
        ("stats", Some(sub)) => commands::stats(sub),
        ("watch", Some(sub)) => commands::watch(sub),
        ("example-snapshot", Some(sub)) => commands::example_snapshot(sub),
        _ => unreachable!(),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        exit(1);
    }
}
