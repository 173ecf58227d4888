//! Text shown around the total: sizes, counts and the flavour caption.

/// Units above plain bytes, each 1024 times the last, with the number of
/// decimals shown for that unit.
const SIZE_UNITS: [(&str, usize); 4] = [("KB", 1), ("MB", 1), ("GB", 2), ("TB", 2)];

/// Human-readable byte count, e.g. `512 B`, `1.5 KB`, `3.25 GB`.
///
/// Steps are binary (1024) but labelled KB/MB/GB/TB.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < SIZE_UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    let (label, decimals) = SIZE_UNITS[unit];
    format!("{value:.decimals$} {label}")
}

/// File count with `,` between groups of three digits.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Size tiers for the flavour line under the final total, smallest first.
/// Each entry is the exclusive upper bound in bytes and its caption.
const FLAVOR_TIERS: &[(u64, &str)] = &[
    (1, "Nothing in here but air."),
    (1 << 20, "Barely a crumb."),
    (100 << 20, "A modest little folder."),
    (1 << 30, "Getting hefty."),
    (10 << 30, "That's a chunky one."),
    (100 << 30, "Serious storage territory."),
    (1 << 40, "Are you hoarding something?"),
];

const FLAVOR_TOP_TIER: &str = "This folder has its own gravity.";

/// One-line caption describing how large `bytes` feels.
pub fn flavor_text(bytes: u64) -> &'static str {
    FLAVOR_TIERS
        .iter()
        .find(|(limit, _)| bytes < *limit)
        .map(|(_, text)| *text)
        .unwrap_or(FLAVOR_TOP_TIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_kb() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn test_format_size_mb_gb_tb() {
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(1_073_741_824), "1.00 GB");
        assert_eq!(format_size(1_099_511_627_776), "1.00 TB");
        assert_eq!(format_size(2048 * 1_099_511_627_776), "2048.00 TB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_flavor_tiers() {
        assert_eq!(flavor_text(0), "Nothing in here but air.");
        assert_eq!(flavor_text(500), "Barely a crumb.");
        assert_eq!(flavor_text(5 << 30), "That's a chunky one.");
        assert_eq!(flavor_text(u64::MAX), FLAVOR_TOP_TIER);
    }

    #[test]
    fn test_flavor_tiers_are_sorted() {
        assert!(FLAVOR_TIERS.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
