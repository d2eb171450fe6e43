//! The `/crypto/onchain/` menu: address activity, exchange balances and
//! hashrate series.

use coinshell_core::{
    ArgumentBundle, ArgumentSchema, ExportPolicy, FlagSpec, HandlerOutput, Menu, Result,
};

use crate::data;

pub const INTERVALS: [&str; 5] = ["1h", "24h", "10m", "1w", "1month"];

pub const EXCHANGES: [&str; 9] = [
    "aggregated",
    "binance",
    "bitfinex",
    "bitmex",
    "bitstamp",
    "coinbase",
    "huobi",
    "kraken",
    "okex",
];

/// 2020-01-01 and 2020-12-31, the default observation window.
const DEFAULT_SINCE: i64 = 1_577_836_800;
const DEFAULT_UNTIL: i64 = 1_609_459_200;

const HELP: &str = "\
On-chain analytics:
    active        active addresses over time
    nonzero       addresses with non-zero balances over time
    change        30-day net position change of exchange holdings
    eb            total balance held on exchanges
    hr            network hashrate over time";

fn asset_flag() -> FlagSpec {
    FlagSpec::text("asset", Some('a'), "Asset to look up", "BTC")
}

fn interval_flag() -> FlagSpec {
    FlagSpec::choice(
        "interval",
        Some('i'),
        "Sampling interval of the data",
        "24h",
        &INTERVALS,
    )
}

fn since_flag() -> FlagSpec {
    FlagSpec::int(
        "since",
        Some('s'),
        "Start of the window as a unix timestamp",
        DEFAULT_SINCE,
    )
}

fn until_flag() -> FlagSpec {
    FlagSpec::int(
        "until",
        Some('u'),
        "End of the window as a unix timestamp",
        DEFAULT_UNTIL,
    )
}

fn series_schema() -> Result<ArgumentSchema> {
    ArgumentSchema::new()
        .flag(asset_flag())?
        .flag(interval_flag())?
        .flag(since_flag())?
        .flag(until_flag())
}

struct Window {
    since: i64,
    until: i64,
    step: i64,
}

fn window(bundle: &ArgumentBundle) -> Result<Window> {
    Ok(Window {
        since: bundle.int("since")?,
        until: bundle.int("until")?,
        step: data::interval_seconds(bundle.text("interval")?),
    })
}

/// Asset-dependent scale for the generated series, so BTC and ETH windows
/// are visibly different datasets.
fn asset_scale(asset: &str) -> f64 {
    match asset {
        "BTC" => 1.0,
        "ETH" => 0.55,
        _ => 0.08,
    }
}

/// # Errors
///
/// Fails only on authoring mistakes in the command schemas.
pub fn menu() -> Result<Menu> {
    Ok(Menu::builder("/crypto/onchain/")
        .help_text(HELP)
        .command(
            "active",
            "Active addresses over time",
            series_schema()?,
            Some(ExportPolicy::RawAndFigures),
            Box::new(|bundle| {
                let scale = asset_scale(bundle.text("asset")?);
                let window = window(bundle)?;
                Ok(HandlerOutput::table(data::metric_series(
                    "active_addresses",
                    window.since,
                    window.until,
                    780_000.0 * scale,
                    2_400.0 * scale,
                    window.step,
                )))
            }),
        )?
        .command(
            "nonzero",
            "Addresses with non-zero balances over time",
            series_schema()?,
            Some(ExportPolicy::RawAndFigures),
            Box::new(|bundle| {
                let scale = asset_scale(bundle.text("asset")?);
                let window = window(bundle)?;
                Ok(HandlerOutput::table(data::metric_series(
                    "nonzero_addresses",
                    window.since,
                    window.until,
                    28_300_000.0 * scale,
                    41_000.0 * scale,
                    window.step,
                )))
            }),
        )?
        .command(
            "change",
            "30-day net position change of exchange holdings",
            series_schema()?,
            Some(ExportPolicy::RawAndFigures),
            Box::new(|bundle| {
                let scale = asset_scale(bundle.text("asset")?);
                let window = window(bundle)?;
                Ok(HandlerOutput::table(data::metric_series(
                    "net_position_change",
                    window.since,
                    window.until,
                    -12_400.0 * scale,
                    310.0 * scale,
                    window.step,
                )))
            }),
        )?
        .command(
            "eb",
            "Total balance held on exchanges",
            series_schema()?
                .flag(FlagSpec::toggle(
                    "pct",
                    "Show the balance as a percentage of supply",
                    false,
                ))?
                .flag(FlagSpec::choice(
                    "exchange",
                    Some('e'),
                    "Exchange to check the balance of",
                    "aggregated",
                    &EXCHANGES,
                ))?,
            Some(ExportPolicy::RawAndFigures),
            Box::new(|bundle| {
                let scale = asset_scale(bundle.text("asset")?);
                let window = window(bundle)?;
                let table = if bundle.toggled("pct")? {
                    data::metric_series(
                        "percent_of_supply",
                        window.since,
                        window.until,
                        14.2,
                        -0.02,
                        window.step,
                    )
                } else {
                    data::metric_series(
                        "balance",
                        window.since,
                        window.until,
                        2_430_000.0 * scale,
                        -3_800.0 * scale,
                        window.step,
                    )
                };
                Ok(HandlerOutput::table(table))
            }),
        )?
        .command(
            "hr",
            "Network hashrate over time",
            ArgumentSchema::new()
                .flag(FlagSpec::choice(
                    "asset",
                    Some('a'),
                    "Asset to look up",
                    "BTC",
                    &["BTC", "ETH"],
                ))?
                .flag(interval_flag())?
                .flag(since_flag())?
                .flag(until_flag())?,
            Some(ExportPolicy::RawAndFigures),
            Box::new(|bundle| {
                let scale = asset_scale(bundle.text("asset")?);
                let window = window(bundle)?;
                Ok(HandlerOutput::table(data::metric_series(
                    "hashrate",
                    window.since,
                    window.until,
                    112.0 * scale,
                    0.4 * scale,
                    window.step,
                )))
            }),
        )?
        .build())
}
