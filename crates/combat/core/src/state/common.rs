use std::fmt;

/// Opaque identifier for a combatant taking part in a fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque identifier for whatever applied an effect (card, relic, enemy move).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceId(pub u32);

impl SourceId {
    /// Reserved identifier for effects applied by the rules themselves
    /// (restored saves, scripted encounter setup).
    pub const SYSTEM: Self = Self(u32::MAX);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn is_system(self) -> bool {
        self.0 == Self::SYSTEM.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_system() {
            f.write_str("system")
        } else {
            write!(f, "src{}", self.0)
        }
    }
}

/// Integer ratio used for multiplicative damage modifiers.
///
/// Scaling always floors, which keeps the damage pipeline free of floating
/// point and reproducible across platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ratio {
    pub numerator: u32,
    pub denominator: u32,
}

impl Ratio {
    pub const ONE: Self = Self::new(1, 1);

    /// Creates a ratio.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero (at compile time when used in a const).
    /// Use [`Ratio::try_new`] for values that come from outside the crate.
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        assert!(denominator != 0, "ratio denominator must be non-zero");
        Self {
            numerator,
            denominator,
        }
    }

    /// Creates a ratio, or `None` if `denominator` is zero.
    pub const fn try_new(numerator: u32, denominator: u32) -> Option<Self> {
        if denominator == 0 {
            None
        } else {
            Some(Self {
                numerator,
                denominator,
            })
        }
    }

    /// Returns true if the denominator is usable.
    ///
    /// Ratios deserialized from content bypass [`Ratio::new`], so catalogs
    /// check this before accepting a definition.
    pub const fn is_valid(&self) -> bool {
        self.denominator != 0
    }

    /// Scales `value` by this ratio, rounding down.
    ///
    /// Saturates at `u32::MAX`. An invalid ratio leaves the value unchanged.
    pub fn scale_floor(&self, value: u32) -> u32 {
        if !self.is_valid() {
            return value;
        }
        let scaled = u64::from(value) * u64::from(self.numerator) / u64::from(self.denominator);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_floor_rounds_down() {
        assert_eq!(Ratio::new(3, 4).scale_floor(15), 11);
        assert_eq!(Ratio::new(3, 2).scale_floor(11), 16);
        assert_eq!(Ratio::new(3, 4).scale_floor(1), 0);
        assert_eq!(Ratio::ONE.scale_floor(42), 42);
    }

    #[test]
    fn scale_floor_saturates() {
        assert_eq!(Ratio::new(2, 1).scale_floor(u32::MAX), u32::MAX);
    }

    #[test]
    fn try_new_rejects_zero_denominator() {
        assert_eq!(Ratio::try_new(3, 0), None);
        assert_eq!(Ratio::try_new(3, 4), Some(Ratio::new(3, 4)));
    }

    #[test]
    fn invalid_ratio_is_identity() {
        let broken = Ratio {
            numerator: 5,
            denominator: 0,
        };
        assert!(!broken.is_valid());
        assert_eq!(broken.scale_floor(9), 9);
    }

    #[test]
    fn display_formats() {
        assert_eq!(CombatantId(3).to_string(), "#3");
        assert_eq!(SourceId::SYSTEM.to_string(), "system");
        assert_eq!(SourceId(7).to_string(), "src7");
    }
}
