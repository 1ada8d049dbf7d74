//! Human-readable byte sizes.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const STEP: u64 = 1024;

/// Render `bytes` with binary (1024-based) units and two decimals.
///
/// Zero is `0 Bytes`, values under one KB are whole numbers of bytes, and
/// anything past the last unit stays in GB.
pub fn format_size(bytes: u64) -> String {
    if bytes < STEP {
        return format!("{bytes} {}", UNITS[0]);
    }

    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < UNITS.len() && bytes >= divisor * STEP {
        divisor *= STEP;
        unit += 1;
    }

    format!("{:.2} {}", bytes as f64 / divisor as f64, UNITS[unit])
}
