//! Number formatting used in signal summaries and thesis text.

/// `$102.00`
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// `$105.00 (Call Wall)`
pub fn level_label(price: f64, name: &str) -> String {
    format!("{} ({})", format_price(price), name)
}

/// Compact dollar amount: `$1.25M`, `$340.0K`, `$812`.
pub fn format_money(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1_000_000_000.0 {
        format!("{}${:.2}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}${:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.1}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

/// Compact dollar amount with an explicit sign: `+$1.25M`, `-$340.0K`.
pub fn format_signed_money(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", format_money(value))
    } else {
        format_money(value)
    }
}

/// `3.20%`
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// `+3.20%` / `-1.05%`
pub fn format_signed_pct(value: f64) -> String {
    // collapse -0.0 so it renders as +0.00%
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:+.2}%", value)
}
