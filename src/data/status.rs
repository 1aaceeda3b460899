//! Normalization of a raw system record into display-ready values.
//!
//! Every formatting rule lives in a small pure function so it can be tested on
//! its own; [`NormalizedStatus::from_record`] only wires them together.

use serde::Serialize;

use crate::source::SystemRecord;

const SECS_PER_DAY: f64 = 86_400.0;
const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_MINUTE: f64 = 60.0;

/// Display-ready snapshot of one server.
///
/// Built in one step from a [`SystemRecord`]; there is no partially populated
/// form. Serializes with the same field names the widget parameter world uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStatus {
    pub name: String,
    pub status: String,
    /// `"{d}d"` once a day has elapsed, `"{h}h {m}m"` before that.
    pub uptime: String,
    /// Three load averages, two decimals each, joined with `", "`.
    pub load: String,
    pub memory_usage: String,
    pub memory_percent: f64,
    pub disk_usage: String,
    pub disk_percent: f64,
    pub temperature: f64,
    pub cpu_percent: f64,
    /// Cumulative read counter in KiB. Not a rate, despite the name.
    pub read_speed: String,
    /// Cumulative write counter in KiB. Not a rate, despite the name.
    pub write_speed: String,
}

impl NormalizedStatus {
    /// Transform a raw record. Pure and deterministic.
    pub fn from_record(record: &SystemRecord) -> Self {
        let info = &record.info;
        Self {
            name: record.name.clone(),
            status: record.status.clone(),
            uptime: format_uptime(info.uptime_secs),
            load: format_load(&info.load_avg),
            memory_usage: format_percent(info.memory_percent),
            memory_percent: info.memory_percent,
            disk_usage: format_percent(info.disk_percent),
            disk_percent: info.disk_percent,
            temperature: info.temperature,
            cpu_percent: info.cpu,
            read_speed: format_kib(info.read_bytes),
            write_speed: format_kib(info.write_bytes),
        }
    }

    /// Whether the hub reports the agent as reachable.
    pub fn is_up(&self) -> bool {
        self.status == "up"
    }
}

/// Format an uptime in seconds.
///
/// Whole days win outright and discard the remainder; below one day the
/// result is hours and minutes.
pub fn format_uptime(total_secs: f64) -> String {
    let days = (total_secs / SECS_PER_DAY).floor() as i64;
    if days > 0 {
        return format!("{}d", days);
    }
    let hours = ((total_secs % SECS_PER_DAY) / SECS_PER_HOUR).floor() as i64;
    let minutes = ((total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE).floor() as i64;
    format!("{}h {}m", hours, minutes)
}

/// Format the 1/5/15 minute load averages, e.g. `"0.10, 1.23, 0.00"`.
pub fn format_load(load: &[f64; 3]) -> String {
    load.iter()
        .map(|value| to_fixed(*value, 2))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert a byte counter to KiB with one decimal and a `K` suffix.
pub fn format_kib(bytes: f64) -> String {
    format!("{}K", to_fixed(bytes / 1024.0, 1))
}

/// Render a percentage verbatim with a `%` suffix. No clamping.
pub fn format_percent(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}%", value)
}

/// Format with `digits` decimals, rounding exact halves away from zero.
///
/// `format!("{:.N}")` rounds a value that sits exactly between two
/// candidates to the even one (`0.25` becomes `"0.2"`); the hub's own
/// dashboards round it up (`"0.3"`), so exact halves are handled here.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let Some(units) = exact_half_units(value.abs(), digits) else {
        return format!("{:.*}", digits, value);
    };

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let rounded = units / 10 + 1;
    if digits == 0 {
        return format!("{}{}", sign, rounded);
    }
    let scale = 10u128.pow(digits as u32);
    format!(
        "{}{}.{:0width$}",
        sign,
        rounded / scale,
        rounded % scale,
        width = digits
    )
}

/// `value * 10^(digits + 1)` when that is exactly an integer ending in 5.
///
/// Works on the raw mantissa and exponent so no rounding creeps in.
fn exact_half_units(value: f64, digits: usize) -> Option<u128> {
    if !value.is_finite() || value == 0.0 || digits > 20 {
        return None;
    }

    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    if exponent >= 0 {
        return None;
    }

    // value * 10^k == mantissa * 5^k * 2^(k + exponent)
    let k = digits as u32 + 1;
    let numerator = (mantissa as u128).checked_mul(5u128.checked_pow(k)?)?;
    let shift = exponent.unsigned_abs();
    let units = if shift <= k {
        numerator << (k - shift)
    } else {
        let drop = shift - k;
        if drop >= 128 || numerator.trailing_zeros() < drop {
            return None;
        }
        numerator >> drop
    };

    (units % 10 == 5).then_some(units)
}
