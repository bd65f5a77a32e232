use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Compact count with at most three significant digits: `1234` -> `1.23K`.
pub fn num_to_si(value: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

    for (scale, suffix) in UNITS {
        if value >= scale {
            let whole = value / scale;
            let decimals = match whole {
                100.. => 0,
                10..=99 => 1,
                _ => 2,
            };
            if decimals == 0 {
                return format!("{}{}", whole, suffix);
            }
            // Truncated, so 999_999 never shows as 1000K
            let frac = (value % scale) * 10u64.pow(decimals) / scale;
            let frac = format!("{:0width$}", frac, width = decimals as usize);
            let frac = frac.trim_end_matches('0');
            return if frac.is_empty() {
                format!("{}{}", whole, suffix)
            } else {
                format!("{}.{}{}", whole, frac, suffix)
            };
        }
    }
    value.to_string()
}

/// Full count with comma thousands separators: `1234567` -> `1,234,567`.
pub fn with_separators(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate a string to `max_width` terminal columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}

/// Truncate to `width` columns, then pad with spaces to exactly `width`.
pub fn fit_str(s: &str, width: usize) -> String {
    let mut out = truncate_str(s, width);
    let used = out.width();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

/// First non-empty line of a block of text.
pub fn first_line(s: &str) -> &str {
    s.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}
