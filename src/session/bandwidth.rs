//! Bitrate label formatting for the buffering indicator.

/// Unit prefixes by order of magnitude (base 1000).
const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Format a throughput estimate as a human-readable label, e.g.
/// `"2.0 Mbps"`.
///
/// Anything below 1000 bits/sec (including zero and negative estimates,
/// which bandwidth meters report before any sample exists) collapses to
/// `"0 Kbps"` rather than risking a log of a non-positive number.
pub fn format_bitrate(bits_per_second: i64) -> String {
    if bits_per_second < 1000 {
        return "0 Kbps".to_string();
    }

    let unit = 1000.0_f64;
    let exp = ((bits_per_second as f64).ln() / unit.ln()) as usize;
    let exp = exp.clamp(1, PREFIXES.len());
    let scaled = bits_per_second as f64 / unit.powi(exp as i32);

    format!("{:.1} {}bps", scaled, PREFIXES[exp - 1])
}
