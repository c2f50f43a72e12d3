//! Number formatting for the counter and the status line.
//!
//! Only non-negative integers are ever displayed, so grouping is a plain
//! thousands split with a configurable separator (`,` matches `en-US`).

/// Format `value` with `separator` between groups of three digits.
pub fn format_grouped(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }

    out
}

/// Format a percentage with two decimal places, without the `%` sign.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}", percentage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0, ','), "0");
        assert_eq!(format_grouped(999, ','), "999");
        assert_eq!(format_grouped(9_999, ','), "9,999");
        assert_eq!(format_grouped(10_000, ','), "10,000");
        assert_eq!(format_grouped(53_118, ','), "53,118");
        assert_eq!(format_grouped(1_000_000, ','), "1,000,000");
        assert_eq!(format_grouped(u64::MAX, ','), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_format_grouped_custom_separator() {
        assert_eq!(format_grouped(1_234_567, '.'), "1.234.567");
        assert_eq!(format_grouped(1_234_567, ' '), "1 234 567");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(5.3118), "5.31");
        assert_eq!(format_percentage(100.0), "100.00");
        assert_eq!(format_percentage(0.0), "0.00");
        assert_eq!(format_percentage(33.33333), "33.33");
    }
}
