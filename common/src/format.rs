use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};

/// Wei per displayed 0.0001 ETH step.
const WEI_PER_TEN_THOUSANDTH: u64 = 100_000_000_000_000;

/// Shorten an address for status bars, e.g. "0xc37A...64B2".
pub fn format_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[38..])
}

/// Format a wei balance as ETH rounded to four decimals, e.g. "1.2345 ETH".
pub fn format_eth(wei: U256) -> String {
    let step = U256::from(WEI_PER_TEN_THOUSANDTH);
    let units = wei.saturating_add(step / U256::from(2u64)) / step;
    let whole = units / U256::from(10_000u64);
    let frac = u64::try_from(units % U256::from(10_000u64)).unwrap_or_default();
    format!("{whole}.{frac:04} ETH")
}

/// Calendar date of a ledger timestamp.
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Certification ids are shown with a leading "#".
pub fn format_id(id: U256) -> String {
    format!("#{id}")
}

/// Coarse age of an activity entry relative to `now`.
pub fn format_age(now: &DateTime<Utc>, at: &DateTime<Utc>) -> String {
    let secs = (*now - *at).num_seconds().max(0);
    let (count, unit) = match secs {
        0..=59 => return "now".to_string(),
        60..=3_599 => (secs / 60, "minute"),
        3_600..=86_399 => (secs / 3_600, "hour"),
        _ => (secs / 86_400, "day"),
    };
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
