//! Presentation model of a region's total value.

use serde::{Deserialize, Serialize};

/// Color band of a total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueTier {
    Green,
    Purple,
    Gold,
    Red,
}

impl ValueTier {
    pub const PURPLE_ABOVE: u64 = 100_000;
    pub const GOLD_ABOVE: u64 = 200_000;
    pub const RED_ABOVE: u64 = 500_000;

    pub const fn for_total(total: u64) -> Self {
        if total > Self::RED_ABOVE {
            Self::Red
        } else if total > Self::GOLD_ABOVE {
            Self::Gold
        } else if total > Self::PURPLE_ABOVE {
            Self::Purple
        } else {
            Self::Green
        }
    }

    /// RGB text color.
    pub const fn color(self) -> u32 {
        match self {
            Self::Green => 0x00aa00,
            Self::Purple => 0xaa00aa,
            Self::Gold => 0xffcc00,
            Self::Red => 0xff0000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDisplay {
    pub total: u64,
    /// Total with `,` thousands separators.
    pub text: String,
    pub tier: ValueTier,
}

impl ValueDisplay {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            text: format_thousands(total),
            tier: ValueTier::for_total(total),
        }
    }
}

impl Default for ValueDisplay {
    fn default() -> Self {
        Self::new(0)
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_every_three_digits() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(24_600), "24,600");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn tier_boundaries_are_inclusive_below() {
        assert_eq!(ValueTier::for_total(100_000), ValueTier::Green);
        assert_eq!(ValueTier::for_total(100_001), ValueTier::Purple);
        assert_eq!(ValueTier::for_total(200_000), ValueTier::Purple);
        assert_eq!(ValueTier::for_total(500_000), ValueTier::Gold);
        assert_eq!(ValueTier::for_total(500_001), ValueTier::Red);
        assert_eq!(ValueDisplay::new(650_000).tier.color(), 0xff0000);
    }
}
