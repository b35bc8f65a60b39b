//! Display formatting for sizes and counters.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// `0 Bytes`, `1.5 KB`, `10 MB`. Two decimals, trailing zeros dropped.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let k = 1024f64;
    let exp = ((bytes as f64).ln() / k.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let scaled = bytes as f64 / k.powi(exp as i32);

    let mut text = format!("{scaled:.2}");
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{text} {}", UNITS[exp])
}

/// Thousands separated by commas: `1234567` -> `1,234,567`.
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
