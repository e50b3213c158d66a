//! Terminal rendering for portal views.

use {
    serde::Serialize,
    std::fmt,
};

use tokenport_core::{
    cooldown::{format_utc_date, LedgerView},
    countdown::format_countdown,
    vesting::VestingView,
    AprBreakdown,
};

use tokenport_stats_client::StakingStats;

/// Output format, selected per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_arg(value: Option<&str>) -> Self {
        match value {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Print a view in the selected format.
pub fn emit<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{value}"),
    }
    Ok(())
}

// ── Cooldowns ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliCooldownEntry {
    pub amount: String,
    pub status: String,
    pub countdown: String,
    pub started_date: String,
    pub unlock_date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliCooldownList {
    pub entries: Vec<CliCooldownEntry>,
    pub withdrawable_total: String,
}

impl CliCooldownList {
    pub fn from_view(view: &LedgerView, now: i64) -> Self {
        let entries = view
            .entries
            .iter()
            .map(|entry| CliCooldownEntry {
                amount: entry.amount_display.clone(),
                status: if entry.cooling { "cooling" } else { "claimable" }.to_string(),
                countdown: format_countdown(entry.unlock_at, now),
                started_date: format_utc_date(entry.started_at),
                unlock_date: entry.unlock_date.clone(),
            })
            .collect();
        Self {
            entries,
            withdrawable_total: view.withdrawable_display.clone(),
        }
    }
}

impl fmt::Display for CliCooldownList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            writeln!(f, "No pending cooldowns.")?;
        } else {
            writeln!(
                f,
                "{:>16} {:>10} {:>13} {:<20}",
                "Amount", "Status", "Countdown", "Unlocks"
            )?;
            writeln!(f, "{}", "-".repeat(62))?;
            for entry in &self.entries {
                writeln!(
                    f,
                    "{:>16} {:>10} {:>13} {:<20}",
                    entry.amount, entry.status, entry.countdown, entry.unlock_date
                )?;
            }
        }
        writeln!(f, "Withdrawable now: {}", self.withdrawable_total)?;
        Ok(())
    }
}

// ── Vesting ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliVestingInfo {
    pub total: String,
    pub vested: String,
    pub claimed: String,
    pub claimable: String,
    pub not_vested: String,
    /// Vested share in percent, absent when there is nothing to render.
    pub vested_pct: Option<f64>,
}

impl CliVestingInfo {
    pub fn from_view(view: &VestingView) -> Self {
        Self {
            total: view.total.clone(),
            vested: view.vested.clone(),
            claimed: view.claimed.clone(),
            claimable: view.claimable.clone(),
            not_vested: view.not_vested.clone(),
            vested_pct: view.segments.map(|(vested_bps, _)| vested_bps as f64 / 100.0),
        }
    }
}

impl fmt::Display for CliVestingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vesting Progress")?;
        writeln!(f, "  Total:       {}", self.total)?;
        writeln!(f, "  Vested:      {}", self.vested)?;
        writeln!(f, "  Claimed:     {}", self.claimed)?;
        writeln!(f, "  Claimable:   {}", self.claimable)?;
        writeln!(f, "  Not vested:  {}", self.not_vested)?;
        if let Some(pct) = self.vested_pct {
            const BAR_WIDTH: usize = 30;
            let filled = (pct / 100.0 * BAR_WIDTH as f64) as usize;
            writeln!(
                f,
                "  [{}{}] {:.2}% vested",
                "█".repeat(filled.min(BAR_WIDTH)),
                "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                pct
            )?;
        }
        Ok(())
    }
}

// ── APR ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliAprInfo {
    pub breakdown: AprBreakdown,
    pub formula: String,
    pub final_pct: f64,
}

impl CliAprInfo {
    pub fn from_breakdown(breakdown: AprBreakdown) -> Self {
        Self {
            breakdown,
            formula: breakdown.to_string(),
            final_pct: breakdown.final_percent(),
        }
    }
}

impl fmt::Display for CliAprInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "APR: {:.2}%", self.final_pct)?;
        writeln!(f, "  {}", self.formula)?;
        Ok(())
    }
}

// ── Network stats ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliStakingStats {
    pub base_apr_pct: f64,
    pub max_apr_pct: f64,
    pub total_staked: String,
    pub tvl_history: Vec<CliTvlPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliTvlPoint {
    pub date: String,
    pub amount: String,
}

impl CliStakingStats {
    pub fn from_stats(stats: &StakingStats, precision: u8) -> Self {
        use tokenport_core::amount::format_tokens_lossy;
        Self {
            base_apr_pct: stats.base_apr,
            max_apr_pct: stats.max_apr,
            total_staked: format_tokens_lossy(&stats.total_staked_amount, 0),
            tvl_history: stats
                .tvl_history
                .iter()
                .map(|point| CliTvlPoint {
                    date: format_utc_date(point.timestamp),
                    amount: format_tokens_lossy(&point.amount, precision),
                })
                .collect(),
        }
    }
}

impl fmt::Display for CliStakingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network Staking")?;
        writeln!(f, "  Base APR:     {:.2}%", self.base_apr_pct)?;
        writeln!(f, "  Max APR:      {:.2}%", self.max_apr_pct)?;
        writeln!(f, "  Total staked: {}", self.total_staked)?;
        if !self.tvl_history.is_empty() {
            writeln!(f, "  TVL history:")?;
            for point in &self.tvl_history {
                writeln!(f, "    {:<20} {}", point.date, point.amount)?;
            }
        }
        Ok(())
    }
}
