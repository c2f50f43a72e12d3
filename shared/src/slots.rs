//! Slot model for the digit row.
//!
//! A formatted count such as `"53,118"` becomes one slot per character: digit
//! characters get a wheel, anything else is a static separator.

/// Glyphs stacked on every wheel, top to bottom.
pub const WHEEL_GLYPHS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// One rendering position in the counter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSpec {
    /// A wheel showing the given digit (0-9)
    Digit(u8),
    /// A literal grouping character, never animated
    Separator(char),
}

impl SlotSpec {
    pub fn is_digit(&self) -> bool {
        matches!(self, SlotSpec::Digit(_))
    }

    /// Target offset of this slot, `None` for separators.
    pub fn offset(&self, digit_height: f64) -> Option<f64> {
        match self {
            SlotSpec::Digit(digit) => Some(wheel_offset(*digit, digit_height)),
            SlotSpec::Separator(_) => None,
        }
    }
}

/// Split a formatted count into slots, preserving character order.
pub fn slots_for(formatted: &str) -> Vec<SlotSpec> {
    formatted
        .chars()
        .map(|ch| {
            if ch.is_ascii_digit() {
                SlotSpec::Digit(ch as u8 - b'0')
            } else {
                SlotSpec::Separator(ch)
            }
        })
        .collect()
}

/// Number of wheels in a slot row.
pub fn digit_count(slots: &[SlotSpec]) -> usize {
    slots.iter().filter(|slot| slot.is_digit()).count()
}

/// Vertical offset that brings `digit` into the clipped window.
pub fn wheel_offset(digit: u8, digit_height: f64) -> f64 {
    -(digit as f64) * digit_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_grouped;

    #[test]
    fn test_slots_for_grouped_count() {
        let slots = slots_for("53,118");
        assert_eq!(
            slots,
            vec![
                SlotSpec::Digit(5),
                SlotSpec::Digit(3),
                SlotSpec::Separator(','),
                SlotSpec::Digit(1),
                SlotSpec::Digit(1),
                SlotSpec::Digit(8),
            ]
        );
        assert_eq!(digit_count(&slots), 5);
    }

    #[test]
    fn test_digit_count_matches_formatted_digits() {
        for count in [0u64, 7, 42, 999, 1_000, 9_999, 10_000, 53_118, 1_000_000, 123_456_789] {
            let formatted = format_grouped(count, ',');
            let slots = slots_for(&formatted);
            assert_eq!(digit_count(&slots), count.to_string().len(), "count {}", count);
            assert_eq!(slots.len(), formatted.chars().count());
        }
    }

    #[test]
    fn test_non_ascii_digits_are_separators() {
        // Arabic-Indic digit five is numeric but not ASCII
        let slots = slots_for("1\u{0665}");
        assert_eq!(slots, vec![SlotSpec::Digit(1), SlotSpec::Separator('\u{0665}')]);
    }

    #[test]
    fn test_wheel_offset() {
        assert_eq!(wheel_offset(0, 9.0), 0.0);
        assert_eq!(wheel_offset(5, 9.0), -45.0);
        assert_eq!(wheel_offset(9, 6.0), -54.0);
        assert_eq!(SlotSpec::Separator(',').offset(9.0), None);
        assert_eq!(SlotSpec::Digit(3).offset(9.0), Some(-27.0));
    }
}
