//! Subcommand implementations.

use {
    clap::ArgMatches,
    std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        thread,
        time::{Duration, SystemTime, UNIX_EPOCH},
    },
};

use {
    tokenport_core::{
        apr::{compose_apr, display_apr, validate_inputs},
        chain::{read_cooldowns, read_vesting},
        cooldown::project_ledger,
        countdown::format_countdown,
        schedule::IntervalTimer,
        types::Address,
        vesting::project_vesting,
        CooldownEntry, Loadable, PortalConfig,
    },
    tokenport_stats_client::StatsClient,
};

use crate::{
    display::{self, CliAprInfo, CliCooldownList, CliStakingStats, CliVestingInfo, OutputFormat},
    snapshot::Snapshot,
    CliError,
};

fn epoch_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

/// The reference clock: `--now` when given, the wall clock otherwise.
fn reference_now(matches: &ArgMatches<'_>) -> Result<i64, CliError> {
    match matches.value_of("now") {
        Some(text) => text.parse().map_err(|_| {
            CliError::BadParameter(format!("invalid --now timestamp {text:?}"))
        }),
        None => Ok(epoch_now()),
    }
}

fn output_format(matches: &ArgMatches<'_>) -> OutputFormat {
    OutputFormat::from_arg(matches.value_of("output"))
}

pub fn cooldowns(matches: &ArgMatches<'_>) -> Result<(), CliError> {
    let snapshot = Snapshot::load(matches.value_of("snapshot").unwrap())?;
    let now = reference_now(matches)?;
    let config = PortalConfig::default();

    let entries = read_cooldowns(&snapshot, &snapshot.owner);
    let view = project_ledger(&entries, now, &config);
    display::emit(&CliCooldownList::from_view(&view, now), output_format(matches))?;
    Ok(())
}

pub fn vesting(matches: &ArgMatches<'_>) -> Result<(), CliError> {
    let snapshot = Snapshot::load(matches.value_of("snapshot").unwrap())?;
    let config = PortalConfig::default();

    match read_vesting(&snapshot, &snapshot.owner) {
        Some((schedule, claimable)) => {
            let view = project_vesting(&schedule, claimable, config.display_precision);
            display::emit(&CliVestingInfo::from_view(&view), output_format(matches))?;
        }
        None => println!("No vesting schedule for {}.", snapshot.owner),
    }
    Ok(())
}

pub fn apr(matches: &ArgMatches<'_>) -> Result<(), CliError> {
    let format = output_format(matches);

    if let Some(url) = matches.value_of("url") {
        let wallet_text = matches.value_of("wallet").ok_or_else(|| {
            CliError::BadParameter("--wallet is required with --url".to_string())
        })?;
        let wallet: Address = wallet_text.parse()?;

        // User-initiated: fetch failures surface instead of degrading.
        let client = StatsClient::new(url, PortalConfig::default().retry)?;
        let generic = client.get_staking_stats()?.to_generic_inputs();
        let wallet_inputs = client.fetch_wallet_apr(&wallet);

        match display_apr(&generic, &wallet_inputs) {
            Loadable::Ready(breakdown) => {
                display::emit(&CliAprInfo::from_breakdown(breakdown), format)?;
            }
            // A blocking fetch always settles before this point.
            Loadable::Loading | Loadable::Unavailable => unreachable!(),
        }
        return Ok(());
    }

    let path = matches.value_of("snapshot").ok_or_else(|| {
        CliError::BadParameter("either --snapshot or --url is required".to_string())
    })?;
    let snapshot = Snapshot::load(path)?;
    let apr = snapshot
        .apr
        .ok_or_else(|| CliError::BadParameter("snapshot has no apr section".to_string()))?;
    let inputs = apr.to_inputs();
    validate_inputs(&inputs)?;
    display::emit(&CliAprInfo::from_breakdown(compose_apr(&inputs)), format)?;
    Ok(())
}

pub fn stats(matches: &ArgMatches<'_>) -> Result<(), CliError> {
    let client = StatsClient::new(matches.value_of("url").unwrap(), PortalConfig::default().retry)?;
    let stats = client.get_staking_stats()?;
    display::emit(
        &CliStakingStats::from_stats(&stats, PortalConfig::default().display_precision),
        output_format(matches),
    )?;
    Ok(())
}

pub fn example_snapshot(matches: &ArgMatches<'_>) -> Result<(), CliError> {
    let snapshot = Snapshot::example(reference_now(matches)?)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Live countdown view: a 1-second tick re-projects the already-fetched
/// ledger; no chain read happens inside the loop. Ctrl-C tears the
/// timer down before exit.
pub fn watch(matches: &ArgMatches<'_>) -> Result<(), CliError> {
    let snapshot = Snapshot::load(matches.value_of("snapshot").unwrap())?;
    let config = PortalConfig::default();
    let entries = read_cooldowns(&snapshot, &snapshot.owner);

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))?;

    let term = console::Term::stdout();
    let mut ticker = IntervalTimer::new(config.countdown_tick());
    ticker.start();

    render_watch_frame(&term, &entries, &config)?;
    while !stop.load(Ordering::Relaxed) {
        if ticker.poll() {
            render_watch_frame(&term, &entries, &config)?;
        }
        thread::sleep(Duration::from_millis(25));
    }
    ticker.cancel();
    term.write_line("")?;
    Ok(())
}

fn render_watch_frame(
    term: &console::Term,
    entries: &[CooldownEntry],
    config: &PortalConfig,
) -> Result<(), CliError> {
    let now = epoch_now();
    let view = project_ledger(entries, now, config);
    term.clear_screen()?;
    term.write_str(&CliCooldownList::from_view(&view, now).to_string())?;
    if let Some(next) = view.entries.iter().rev().find(|entry| entry.cooling) {
        term.write_line(&format!(
            "Next unlock in {} ({})",
            format_countdown(next.unlock_at, now),
            next.unlock_date
        ))?;
    }
    term.write_line("Press Ctrl-C to exit.")?;
    Ok(())
}
