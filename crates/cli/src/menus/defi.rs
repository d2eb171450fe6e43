//! The `/crypto/defi/` menu: rates, protocols and Uniswap analytics.
//!
//! Flag shapes and defaults are kept exactly as documented, including the
//! per-command `--descend` default asymmetry (dpi and tokens sort descending
//! by default, the Uniswap listings ascending). Tests pin the asymmetry.

use chrono::{Duration, NaiveDate};

use coinshell_core::{
    ArgumentBundle, ArgumentSchema, ExportPolicy, FlagSpec, HandlerOutput, Menu, Result, Table,
};

use crate::data;

pub const LLAMA_FILTERS: [&str; 8] = [
    "tvl", "symbol", "category", "chains", "change_1h", "change_1d", "change_7d", "name",
];

pub const TOKENS_FILTERS: [&str; 6] = [
    "index", "symbol", "name", "tradeVolumeUSD", "totalLiquidity", "txCount",
];

pub const PAIRS_FILTERS: [&str; 7] = [
    "created", "pair", "token0", "token1", "volumeUSD", "txCount", "totalSupply",
];

pub const POOLS_FILTERS: [&str; 8] = [
    "volumeUSD",
    "token0.name",
    "token0.symbol",
    "token1.name",
    "token1.symbol",
    "token0Price",
    "token1Price",
    "txCount",
];

pub const SWAPS_FILTERS: [&str; 4] = ["timestamp", "token0", "token1", "amountUSD"];

const HELP: &str = "\
Decentralized Finance:
    llama         DeFi protocols listed on DeFi Llama
    dpi           DeFi Pulse Index constituents
    tvl           total value locked across DeFi over time
    funding       funding rates of perpetual platforms
    borrow        borrow rates of lending platforms
    lending       supply rates of lending platforms
    newsletter    the latest DeFi newsletters

Uniswap:
    tokens        tokens tracked on Uniswap
    stats         base statistics of Uniswap
    pairs         recently created pairs on Uniswap
    pools         pools by volume on Uniswap
    swaps         the most recent swaps on Uniswap";

fn limit_flag(default: i64) -> FlagSpec {
    FlagSpec::positive_int("limit", Some('l'), "Number of records to display", default)
}

fn sort_flag(default: &str, choices: &[&str]) -> FlagSpec {
    FlagSpec::choice("sort", Some('s'), "Sort by given column", default, choices)
}

fn descend_flag(default: bool) -> FlagSpec {
    FlagSpec::toggle("descend", "Flag to sort in descending order", default)
}

fn current_flag() -> FlagSpec {
    FlagSpec::toggle(
        "current",
        "Show current rates or the 30-day average",
        true,
    )
}

fn row_limit(bundle: &ArgumentBundle) -> Result<usize> {
    Ok(usize::try_from(bundle.int("limit")?).unwrap_or(0))
}

fn sorted(mut table: Table, bundle: &ArgumentBundle) -> Result<Table> {
    table.sort_by_column(bundle.text("sort")?, bundle.toggled("descend")?)?;
    Ok(table)
}

/// Keeps pairs created within `days` of the newest pair in the table, so the
/// recency window is deterministic against the snapshot.
fn created_within(table: Table, days: i64) -> Table {
    let Some(index) = table.column_index("created") else {
        return table;
    };
    let newest = table
        .rows()
        .iter()
        .filter_map(|row| NaiveDate::parse_from_str(&row[index], "%Y-%m-%d").ok())
        .max();
    let Some(newest) = newest else {
        return table;
    };

    let cutoff = newest - Duration::days(days);
    table.retain_rows(|row| {
        NaiveDate::parse_from_str(&row[index], "%Y-%m-%d")
            .map_or(true, |created| created >= cutoff)
    })
}

fn at_least(table: Table, column: &str, threshold: f64) -> Table {
    let Some(index) = table.column_index(column) else {
        return table;
    };
    table.retain_rows(|row| row[index].parse::<f64>().map_or(true, |value| value >= threshold))
}

/// # Errors
///
/// Fails only on authoring mistakes in the command schemas.
#[allow(clippy::too_many_lines)]
pub fn menu() -> Result<Menu> {
    Ok(Menu::builder("/crypto/defi/")
        .help_text(HELP)
        .command(
            "dpi",
            "DeFi Pulse Index constituents",
            ArgumentSchema::new()
                .flag(limit_flag(15))?
                .flag(sort_flag(
                    "Rank",
                    &["Rank", "Name", "Chain", "Category", "TVL", "Change_1D"],
                ))?
                .flag(descend_flag(true))?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| {
                let table = sorted(data::dpi_constituents(), bundle)?;
                Ok(HandlerOutput::table(table.take(row_limit(bundle)?)))
            }),
        )?
        .command(
            "llama",
            "DeFi protocols listed on DeFi Llama",
            ArgumentSchema::new()
                .flag(limit_flag(10))?
                .flag(sort_flag("tvl", &LLAMA_FILTERS))?
                .flag(descend_flag(false))?
                .flag(FlagSpec::toggle(
                    "desc",
                    "Flag to display protocol descriptions",
                    false,
                ))?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| {
                let table = data::llama_protocols(bundle.toggled("desc")?);
                let table = sorted(table, bundle)?;
                Ok(HandlerOutput::table(table.take(row_limit(bundle)?)))
            }),
        )?
        .command(
            "tvl",
            "Total value locked across DeFi over time",
            ArgumentSchema::new().flag(limit_flag(10))?,
            Some(ExportPolicy::RawAndFigures),
            Box::new(|bundle| {
                let table = data::historical_tvl().take_last(row_limit(bundle)?);
                Ok(HandlerOutput::table(table))
            }),
        )?
        .command(
            "funding",
            "Funding rates of perpetual platforms",
            ArgumentSchema::new().flag(limit_flag(10))?.flag(current_flag())?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| {
                let table = data::funding_rates(bundle.toggled("current")?);
                Ok(HandlerOutput::table(table.take(row_limit(bundle)?)))
            }),
        )?
        .command(
            "borrow",
            "Borrow rates of lending platforms",
            ArgumentSchema::new().flag(limit_flag(10))?.flag(current_flag())?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| {
                let table = data::borrow_rates(bundle.toggled("current")?);
                Ok(HandlerOutput::table(table.take(row_limit(bundle)?)))
            }),
        )?
        .command(
            "lending",
            "Supply rates of lending platforms",
            ArgumentSchema::new().flag(limit_flag(15))?.flag(current_flag())?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| {
                let table = data::lending_rates(bundle.toggled("current")?);
                Ok(HandlerOutput::table(table.take(row_limit(bundle)?)))
            }),
        )?
        .command(
            "newsletter",
            "The latest DeFi newsletters",
            ArgumentSchema::new().flag(limit_flag(10))?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| {
                Ok(HandlerOutput::table(
                    data::newsletters().take(row_limit(bundle)?),
                ))
            }),
        )?
        .command(
            "tokens",
            "Tokens tracked on Uniswap",
            ArgumentSchema::new()
                .flag(FlagSpec::int("skip", None, "Number of records to skip", 0))?
                .flag(limit_flag(20))?
                .flag(sort_flag("index", &TOKENS_FILTERS))?
                .flag(descend_flag(true))?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| {
                let skip = usize::try_from(bundle.int("skip")?).unwrap_or(0);
                let table = sorted(data::uniswap_tokens(), bundle)?;
                Ok(HandlerOutput::table(
                    table.skip(skip).take(row_limit(bundle)?),
                ))
            }),
        )?
        .command(
            "pairs",
            "Recently created pairs on Uniswap",
            ArgumentSchema::new()
                .flag(limit_flag(10))?
                .flag(FlagSpec::int(
                    "vol",
                    Some('v'),
                    "Minimum trading volume in USD",
                    100,
                ))?
                .flag(FlagSpec::int("tx", None, "Minimum number of transactions", 100))?
                .flag(FlagSpec::int(
                    "days",
                    None,
                    "Number of days the pair has been active",
                    10,
                ))?
                .flag(sort_flag("created", &PAIRS_FILTERS))?
                .flag(descend_flag(false))?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| {
                #[allow(clippy::cast_precision_loss)]
                let vol = bundle.int("vol")? as f64;
                #[allow(clippy::cast_precision_loss)]
                let tx = bundle.int("tx")? as f64;

                let table = created_within(data::recent_pairs(), bundle.int("days")?);
                let table = at_least(table, "volumeUSD", vol);
                let table = at_least(table, "txCount", tx);
                let table = sorted(table, bundle)?;
                Ok(HandlerOutput::table(table.take(row_limit(bundle)?)))
            }),
        )?
        .command(
            "pools",
            "Pools by volume on Uniswap",
            ArgumentSchema::new()
                .flag(sort_flag("volumeUSD", &POOLS_FILTERS))?
                .flag(descend_flag(false))?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| Ok(HandlerOutput::table(sorted(data::uniswap_pools(), bundle)?))),
        )?
        .command(
            "swaps",
            "The most recent swaps on Uniswap",
            ArgumentSchema::new()
                .flag(limit_flag(10))?
                .flag(sort_flag("timestamp", &SWAPS_FILTERS))?
                .flag(descend_flag(false))?,
            Some(ExportPolicy::RawOnly),
            Box::new(|bundle| {
                let table = sorted(data::last_swaps(), bundle)?;
                Ok(HandlerOutput::table(table.take(row_limit(bundle)?)))
            }),
        )?
        .command(
            "stats",
            "Base statistics of Uniswap",
            ArgumentSchema::new(),
            Some(ExportPolicy::RawOnly),
            Box::new(|_| Ok(HandlerOutput::table(data::uniswap_stats()))),
        )?
        .build())
}
