//! Display helpers shared by the dashboard panels.

use serde::Serialize;

use super::domain::LoanStatus;

/// Format whole dollars as US currency with thousands separators, e.g. `$300,000`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Render a 0.0-1.0 ratio as a whole percentage, clamping out-of-range input.
pub fn format_percentage(ratio: f32) -> String {
    let pct = if ratio.is_finite() {
        (ratio.clamp(0.0, 1.0) * 100.0).round()
    } else {
        0.0
    };
    format!("{pct:.0}%")
}

/// Renderer-neutral colour class for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Info,
    Warning,
    Success,
    Accent,
}

pub const fn status_tone(status: LoanStatus) -> StatusTone {
    match status {
        LoanStatus::New => StatusTone::Info,
        LoanStatus::InReview => StatusTone::Warning,
        LoanStatus::Approved => StatusTone::Success,
        LoanStatus::Renew => StatusTone::Accent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_amounts_with_thousands_separators() {
        assert_eq!(format_amount(300_000), "$300,000");
        assert_eq!(format_amount(7_660), "$7,660");
        assert_eq!(format_amount(20_000), "$20,000");
        assert_eq!(format_amount(999), "$999");
        assert_eq!(format_amount(0), "$0");
        assert_eq!(format_amount(1_234_567), "$1,234,567");
    }

    #[test]
    fn formats_ratios_as_whole_percentages() {
        assert_eq!(format_percentage(0.75), "75%");
        assert_eq!(format_percentage(0.0), "0%");
        assert_eq!(format_percentage(1.4), "100%");
        assert_eq!(format_percentage(f32::NAN), "0%");
    }

    #[test]
    fn every_status_maps_to_a_distinct_tone() {
        let tones = [
            status_tone(LoanStatus::New),
            status_tone(LoanStatus::InReview),
            status_tone(LoanStatus::Approved),
            status_tone(LoanStatus::Renew),
        ];
        for (index, tone) in tones.iter().enumerate() {
            assert!(!tones[index + 1..].contains(tone));
        }
    }
}
