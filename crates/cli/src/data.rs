//! Built-in sample datasets the shipped handlers draw from.
//!
//! Data sourcing is handler-internal, so the handlers bundled with the
//! binary work offline against these fixed snapshots. Every dataset is
//! deterministic, which keeps sort/limit/filter behavior testable.

use chrono::DateTime;

use coinshell_core::Table;

/// Caps generated series at this many points regardless of interval.
const MAX_SERIES_POINTS: i64 = 30;

pub fn dpi_constituents() -> Table {
    let mut table = Table::new(["Rank", "Name", "Chain", "Category", "TVL", "Change_1D"]);
    table.push_row(["1", "Curve", "ethereum", "dexes", "14.21", "-0.6"]);
    table.push_row(["2", "Maker", "ethereum", "lending", "12.44", "1.2"]);
    table.push_row(["3", "Aave", "ethereum", "lending", "10.83", "0.4"]);
    table.push_row(["4", "Convex", "ethereum", "yield", "9.12", "2.1"]);
    table.push_row(["5", "Uniswap", "ethereum", "dexes", "8.95", "-1.3"]);
    table.push_row(["6", "Compound", "ethereum", "lending", "6.74", "0.9"]);
    table.push_row(["7", "PancakeSwap", "bsc", "dexes", "4.66", "-2.4"]);
    table.push_row(["8", "Balancer", "ethereum", "dexes", "3.51", "0.2"]);
    table.push_row(["9", "SushiSwap", "ethereum", "dexes", "3.12", "-0.8"]);
    table.push_row(["10", "Yearn", "ethereum", "yield", "2.87", "1.7"]);
    table
}

pub fn llama_protocols(with_description: bool) -> Table {
    let mut columns = vec![
        "name", "symbol", "category", "chains", "tvl", "change_1h", "change_1d", "change_7d",
    ];
    if with_description {
        columns.push("description");
    }

    let rows: [(&str, &str, &str, &str, &str, &str, &str, &str, &str); 8] = [
        ("Curve", "CRV", "Dexes", "Ethereum", "14210000000", "0.1", "-0.6", "3.4",
         "Exchange liquidity pool designed for stablecoin trading"),
        ("Maker", "MKR", "CDP", "Ethereum", "12440000000", "-0.2", "1.2", "5.1",
         "Decentralized credit platform that supports Dai"),
        ("Aave", "AAVE", "Lending", "Ethereum, Polygon", "10830000000", "0.3", "0.4", "-1.9",
         "Open source liquidity protocol for lending and borrowing"),
        ("Convex", "CVX", "Yield", "Ethereum", "9120000000", "0.0", "2.1", "7.6",
         "Platform that boosts rewards for Curve liquidity providers"),
        ("Uniswap", "UNI", "Dexes", "Ethereum", "8950000000", "-0.4", "-1.3", "2.2",
         "Protocol for swapping ERC-20 tokens"),
        ("Compound", "COMP", "Lending", "Ethereum", "6740000000", "0.2", "0.9", "0.5",
         "Algorithmic money market protocol"),
        ("PancakeSwap", "CAKE", "Dexes", "Binance", "4660000000", "-0.1", "-2.4", "-4.0",
         "Automated market maker on BNB chain"),
        ("Lido", "LDO", "Liquid Staking", "Ethereum, Solana", "4120000000", "0.5", "1.8", "9.3",
         "Liquid staking solution for proof-of-stake chains"),
    ];

    let mut table = Table::new(columns);
    for row in rows {
        let mut cells = vec![row.0, row.1, row.2, row.3, row.4, row.5, row.6, row.7];
        if with_description {
            cells.push(row.8);
        }
        table.push_row(cells);
    }
    table
}

pub fn historical_tvl() -> Table {
    let mut table = Table::new(["date", "total_tvl"]);
    for (date, tvl) in [
        ("2020-09-01", "8120000000"),
        ("2020-10-01", "10940000000"),
        ("2020-11-01", "13710000000"),
        ("2020-12-01", "14990000000"),
        ("2021-01-01", "21160000000"),
        ("2021-02-01", "36480000000"),
        ("2021-03-01", "44280000000"),
        ("2021-04-01", "52150000000"),
        ("2021-05-01", "66540000000"),
        ("2021-06-01", "59870000000"),
        ("2021-07-01", "56410000000"),
        ("2021-08-01", "74230000000"),
    ] {
        table.push_row([date, tvl]);
    }
    table
}

/// Funding rates across perpetual platforms, in percent. `current` selects
/// the live snapshot over the 30-day average.
pub fn funding_rates(current: bool) -> Table {
    let mut table = Table::new(["Symbol", "dYdX", "Perpetual", "Binance"]);
    let rows: &[[&str; 4]] = if current {
        &[
            ["BTC", "0.011", "0.009", "0.010"],
            ["ETH", "0.013", "0.012", "0.010"],
            ["SOL", "0.021", "0.018", "0.015"],
            ["AVAX", "0.017", "0.014", "0.012"],
            ["DOT", "0.008", "0.010", "0.009"],
            ["LINK", "0.012", "0.011", "0.010"],
        ]
    } else {
        &[
            ["BTC", "0.009", "0.008", "0.010"],
            ["ETH", "0.011", "0.010", "0.010"],
            ["SOL", "0.016", "0.015", "0.013"],
            ["AVAX", "0.013", "0.012", "0.011"],
            ["DOT", "0.009", "0.009", "0.009"],
            ["LINK", "0.010", "0.010", "0.010"],
        ]
    };
    for row in rows {
        table.push_row(*row);
    }
    table
}

/// Borrow rates across lending platforms, in percent APR.
pub fn borrow_rates(current: bool) -> Table {
    let mut table = Table::new(["Symbol", "Aave", "Compound", "dYdX"]);
    let rows: &[[&str; 4]] = if current {
        &[
            ["DAI", "3.61", "4.02", "2.89"],
            ["USDC", "3.24", "3.78", "2.61"],
            ["USDT", "3.57", "--", "--"],
            ["ETH", "0.41", "2.64", "0.32"],
            ["WBTC", "0.29", "2.11", "--"],
            ["BAT", "1.92", "2.87", "--"],
        ]
    } else {
        &[
            ["DAI", "3.92", "4.31", "3.04"],
            ["USDC", "3.41", "3.95", "2.83"],
            ["USDT", "3.66", "--", "--"],
            ["ETH", "0.38", "2.59", "0.35"],
            ["WBTC", "0.31", "2.20", "--"],
            ["BAT", "2.05", "3.01", "--"],
        ]
    };
    for row in rows {
        table.push_row(*row);
    }
    table
}

/// Supply (lending) rates across platforms, in percent APY.
pub fn lending_rates(current: bool) -> Table {
    let mut table = Table::new(["Symbol", "Aave", "Compound", "dYdX", "Fulcrum"]);
    let rows: &[[&str; 5]] = if current {
        &[
            ["DAI", "2.71", "2.96", "2.04", "2.55"],
            ["USDC", "2.43", "2.61", "1.87", "2.31"],
            ["USDT", "2.69", "--", "--", "2.48"],
            ["ETH", "0.12", "0.18", "0.09", "0.14"],
            ["WBTC", "0.07", "0.11", "--", "0.09"],
            ["LINK", "0.31", "--", "--", "0.27"],
            ["BAT", "0.88", "1.12", "--", "0.95"],
            ["ZRX", "0.54", "0.73", "--", "0.61"],
        ]
    } else {
        &[
            ["DAI", "2.95", "3.18", "2.21", "2.74"],
            ["USDC", "2.60", "2.84", "2.02", "2.49"],
            ["USDT", "2.81", "--", "--", "2.63"],
            ["ETH", "0.11", "0.16", "0.10", "0.13"],
            ["WBTC", "0.08", "0.12", "--", "0.10"],
            ["LINK", "0.29", "--", "--", "0.26"],
            ["BAT", "0.92", "1.20", "--", "1.01"],
            ["ZRX", "0.58", "0.79", "--", "0.66"],
        ]
    };
    for row in rows {
        table.push_row(*row);
    }
    table
}

pub fn newsletters() -> Table {
    let mut table = Table::new(["Date", "Author", "Title", "Link"]);
    for (date, author, title, link) in [
        ("2021-08-16", "Camila Russo", "The Defiant Weekly Recap",
         "https://thedefiant.io/recap-0816"),
        ("2021-08-12", "Camila Russo", "L2 Summer Heats Up",
         "https://thedefiant.io/l2-summer"),
        ("2021-08-09", "Owen Fernau", "DeFi Lending Hits New Highs",
         "https://thedefiant.io/lending-highs"),
        ("2021-08-05", "Dan Kahan", "DAOs Go Mainstream",
         "https://thedefiant.io/daos-mainstream"),
        ("2021-08-02", "Camila Russo", "NFT Volumes Break Records",
         "https://thedefiant.io/nft-volumes"),
        ("2021-07-29", "Owen Fernau", "Stablecoins Under Scrutiny",
         "https://thedefiant.io/stablecoin-scrutiny"),
        ("2021-07-26", "Brady Dale", "The Rise of Liquid Staking",
         "https://thedefiant.io/liquid-staking"),
        ("2021-07-22", "Camila Russo", "EIP-1559 Is Coming",
         "https://thedefiant.io/eip1559"),
    ] {
        table.push_row([date, author, title, link]);
    }
    table
}

pub fn uniswap_tokens() -> Table {
    let mut table = Table::new([
        "index",
        "symbol",
        "name",
        "tradeVolumeUSD",
        "totalLiquidity",
        "txCount",
    ]);
    for row in [
        ["1", "WETH", "Wrapped Ether", "394816520341", "1204381", "31240985"],
        ["2", "USDC", "USD Coin", "188273645190", "304182334", "12408311"],
        ["3", "USDT", "Tether USD", "171204583321", "190384511", "10938471"],
        ["4", "DAI", "Dai Stablecoin", "88341276504", "104529871", "6120394"],
        ["5", "WBTC", "Wrapped BTC", "61248903412", "9831", "2894034"],
        ["6", "UNI", "Uniswap", "32048573821", "18349021", "2014873"],
        ["7", "LINK", "ChainLink Token", "24810937245", "8902143", "1731204"],
        ["8", "AAVE", "Aave Token", "10394857120", "410239", "802341"],
        ["9", "MKR", "Maker", "8294013745", "21043", "514039"],
        ["10", "COMP", "Compound", "6120398541", "98231", "423901"],
    ] {
        table.push_row(row);
    }
    table
}

pub fn recent_pairs() -> Table {
    let mut table = Table::new([
        "created",
        "pair",
        "token0",
        "token1",
        "volumeUSD",
        "txCount",
        "totalSupply",
    ]);
    for row in [
        ["2021-08-15", "WETH-SHIB", "Wrapped Ether", "Shiba Inu", "8120345", "10231", "48213"],
        ["2021-08-14", "USDC-FEI", "USD Coin", "Fei USD", "2310492", "1843", "120394"],
        ["2021-08-12", "WETH-RAIL", "Wrapped Ether", "Railgun", "510394", "612", "8341"],
        ["2021-08-10", "DAI-RAI", "Dai Stablecoin", "Rai Reflex Index", "905412", "731", "20431"],
        ["2021-08-08", "WETH-PUNK", "Wrapped Ether", "CryptoPunks", "3104928", "2941", "10943"],
        ["2021-08-05", "USDT-AXS", "Tether USD", "Axie Infinity", "6204813", "5831", "90312"],
        ["2021-08-01", "WETH-GTC", "Wrapped Ether", "Gitcoin", "120493", "214", "3021"],
        ["2021-07-28", "WETH-PERP", "Wrapped Ether", "Perpetual", "840239", "903", "14820"],
    ] {
        table.push_row(row);
    }
    table
}

pub fn uniswap_pools() -> Table {
    let mut table = Table::new([
        "volumeUSD",
        "token0.name",
        "token0.symbol",
        "token1.name",
        "token1.symbol",
        "token0Price",
        "token1Price",
        "txCount",
    ]);
    for row in [
        ["98123045123", "USD Coin", "USDC", "Wrapped Ether", "WETH", "0.00031", "3194.2", "8120394"],
        ["61293845021", "Wrapped Ether", "WETH", "Tether USD", "USDT", "3188.7", "0.00031", "5093122"],
        ["28845210394", "Dai Stablecoin", "DAI", "Wrapped Ether", "WETH", "0.00031", "3190.4", "2903141"],
        ["15203984712", "Wrapped BTC", "WBTC", "Wrapped Ether", "WETH", "14.71", "0.068", "1202943"],
        ["9012384751", "Uniswap", "UNI", "Wrapped Ether", "WETH", "0.0089", "112.3", "893021"],
        ["6093841202", "ChainLink Token", "LINK", "Wrapped Ether", "WETH", "0.0081", "123.5", "741203"],
        ["3120948512", "Aave Token", "AAVE", "Wrapped Ether", "WETH", "0.094", "10.63", "402913"],
        ["1849301243", "Maker", "MKR", "Wrapped Ether", "WETH", "0.92", "1.087", "214032"],
    ] {
        table.push_row(row);
    }
    table
}

pub fn last_swaps() -> Table {
    let mut table = Table::new(["timestamp", "token0", "token1", "amountUSD"]);
    for row in [
        ["2021-08-16 14:03:11", "WETH", "USDC", "150234.21"],
        ["2021-08-16 14:02:58", "WETH", "USDT", "98012.44"],
        ["2021-08-16 14:02:41", "DAI", "WETH", "41233.90"],
        ["2021-08-16 14:02:12", "WBTC", "WETH", "310482.03"],
        ["2021-08-16 14:01:55", "UNI", "WETH", "8213.11"],
        ["2021-08-16 14:01:32", "WETH", "USDC", "66120.87"],
        ["2021-08-16 14:01:04", "LINK", "WETH", "12894.30"],
        ["2021-08-16 14:00:47", "WETH", "DAI", "28441.62"],
        ["2021-08-16 14:00:21", "AAVE", "WETH", "9921.18"],
        ["2021-08-16 14:00:02", "WETH", "USDT", "204812.55"],
    ] {
        table.push_row(row);
    }
    table
}

pub fn uniswap_stats() -> Table {
    let mut table = Table::new(["Metric", "Value"]);
    for (metric, value) in [
        ("totalVolumeUSD", "394816520341"),
        ("totalLiquidityUSD", "7120394851"),
        ("txCount", "68120394"),
        ("pairCount", "40231"),
    ] {
        table.push_row([metric, value]);
    }
    table
}

/// Seconds per sampling interval, as accepted by the on-chain commands.
pub fn interval_seconds(interval: &str) -> i64 {
    match interval {
        "10m" => 600,
        "1h" => 3_600,
        "1w" => 604_800,
        "1month" => 2_592_000,
        _ => 86_400,
    }
}

/// Generates a dated metric series between `since` and `until` (unix
/// seconds). Values follow `base + slope * i` with a small deterministic
/// wiggle; the point count is capped so wide windows stay readable.
///
/// `since` and `until` come straight from user flags, so the window
/// arithmetic saturates instead of trusting the values to stay in range.
/// Timestamps chrono cannot represent contribute no rows.
pub fn metric_series(column: &str, since: i64, until: i64, base: f64, slope: f64, step: i64) -> Table {
    let mut table = Table::new(["date", column]);
    if until <= since || step <= 0 {
        return table;
    }

    let span = until.saturating_sub(since);
    let step = step.max(span / MAX_SERIES_POINTS);

    let mut index = 0;
    let mut timestamp = since;
    while timestamp <= until {
        if let Some(moment) = DateTime::from_timestamp(timestamp, 0) {
            #[allow(clippy::cast_precision_loss)]
            let wiggle = ((index * 37) % 11) as f64 * base * 0.01;
            #[allow(clippy::cast_precision_loss)]
            let value = base + slope * index as f64 + wiggle;
            table.push_row([
                moment.format("%Y-%m-%d").to_string(),
                format!("{value:.2}"),
            ]);
        }
        index += 1;
        timestamp = match timestamp.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llama_description_column_is_optional() {
        let bare = llama_protocols(false);
        let described = llama_protocols(true);
        assert_eq!(bare.columns().len() + 1, described.columns().len());
        assert_eq!(described.columns().last().map(String::as_str), Some("description"));
        assert_eq!(bare.len(), described.len());
    }

    #[test]
    fn test_metric_series_spans_window() {
        let table = metric_series("active_addresses", 1_577_836_800, 1_609_459_200, 700_000.0, 1_500.0, 86_400);
        assert!(!table.is_empty());
        assert!(table.len() <= 32);
        assert_eq!(table.rows()[0][0], "2020-01-01");
    }

    #[test]
    fn test_metric_series_empty_for_inverted_window() {
        let table = metric_series("hashrate", 100, 50, 1.0, 0.0, 86_400);
        assert!(table.is_empty());
    }

    #[test]
    fn test_metric_series_survives_extreme_window() {
        // The widest window a typed command can express; every timestamp is
        // outside chrono's representable range, so no rows come back, but
        // the generator must not overflow on the way there.
        let table = metric_series("balance", i64::MIN, i64::MAX, 1_000.0, 1.0, 86_400);
        assert!(table.len() <= 64);

        let table = metric_series("balance", 0, i64::MAX, 1_000.0, 1.0, 86_400);
        assert!(table.len() <= 64);
    }

    #[test]
    fn test_interval_seconds_defaults_to_daily() {
        assert_eq!(interval_seconds("10m"), 600);
        assert_eq!(interval_seconds("1w"), 604_800);
        assert_eq!(interval_seconds("24h"), 86_400);
        assert_eq!(interval_seconds("bogus"), 86_400);
    }

    #[test]
    fn test_rate_tables_differ_between_current_and_average() {
        assert_ne!(funding_rates(true), funding_rates(false));
        assert_ne!(borrow_rates(true), borrow_rates(false));
        assert_ne!(lending_rates(true), lending_rates(false));
    }
}
