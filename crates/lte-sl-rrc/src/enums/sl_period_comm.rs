/// SL-PeriodComm-r12, length of the sidelink control period in subframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SlPeriodComm {
    #[default]
    Sf40 = 0,
    Sf60 = 1,
    Sf70 = 2,
    Sf80 = 3,
    Sf120 = 4,
    Sf140 = 5,
    Sf160 = 6,
    Sf240 = 7,
    Sf280 = 8,
    Sf320 = 9,
}

impl std::convert::TryFrom<u64> for SlPeriodComm {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SlPeriodComm::Sf40),
            1 => Ok(SlPeriodComm::Sf60),
            2 => Ok(SlPeriodComm::Sf70),
            3 => Ok(SlPeriodComm::Sf80),
            4 => Ok(SlPeriodComm::Sf120),
            5 => Ok(SlPeriodComm::Sf140),
            6 => Ok(SlPeriodComm::Sf160),
            7 => Ok(SlPeriodComm::Sf240),
            8 => Ok(SlPeriodComm::Sf280),
            9 => Ok(SlPeriodComm::Sf320),
            _ => Err(()),
        }
    }
}

impl SlPeriodComm {
    pub const ALL: [SlPeriodComm; 10] = [
        SlPeriodComm::Sf40, SlPeriodComm::Sf60, SlPeriodComm::Sf70, SlPeriodComm::Sf80,
        SlPeriodComm::Sf120, SlPeriodComm::Sf140, SlPeriodComm::Sf160, SlPeriodComm::Sf240,
        SlPeriodComm::Sf280, SlPeriodComm::Sf320,
    ];

    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    /// Period length in subframes
    pub fn as_subframes(self) -> u32 {
        match self {
            SlPeriodComm::Sf40 => 40,
            SlPeriodComm::Sf60 => 60,
            SlPeriodComm::Sf70 => 70,
            SlPeriodComm::Sf80 => 80,
            SlPeriodComm::Sf120 => 120,
            SlPeriodComm::Sf140 => 140,
            SlPeriodComm::Sf160 => 160,
            SlPeriodComm::Sf240 => 240,
            SlPeriodComm::Sf280 => 280,
            SlPeriodComm::Sf320 => 320,
        }
    }

    /// Maps a period length in subframes to the enum, or None if 3GPP does not define it
    pub fn from_subframes(length: u32) -> Option<Self> {
        match length {
            40 => Some(SlPeriodComm::Sf40),
            60 => Some(SlPeriodComm::Sf60),
            70 => Some(SlPeriodComm::Sf70),
            80 => Some(SlPeriodComm::Sf80),
            120 => Some(SlPeriodComm::Sf120),
            140 => Some(SlPeriodComm::Sf140),
            160 => Some(SlPeriodComm::Sf160),
            240 => Some(SlPeriodComm::Sf240),
            280 => Some(SlPeriodComm::Sf280),
            320 => Some(SlPeriodComm::Sf320),
            _ => None,
        }
    }

    /// Parses the configuration token ("sf40" .. "sf320")
    pub fn from_token(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.to_string() == s)
    }
}

impl From<SlPeriodComm> for u64 {
    fn from(e: SlPeriodComm) -> Self { e.into_raw() }
}

impl core::fmt::Display for SlPeriodComm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "sf{}", self.as_subframes())
    }
}

/// Fatal conversion from a period length in subframes
pub fn period_as_enum(length: u32) -> SlPeriodComm {
    SlPeriodComm::from_subframes(length)
        .unwrap_or_else(|| panic!("SL PERIOD LENGTH NOT SUPPORTED: {}", length))
}

/// Period length in subframes
pub fn period_as_int(period: SlPeriodComm) -> u32 {
    period.as_subframes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_roundtrip() {
        for raw in 0..10 {
            let p = SlPeriodComm::try_from(raw).unwrap();
            assert_eq!(period_as_enum(period_as_int(p)), p);
            assert_eq!(SlPeriodComm::from_token(&p.to_string()), Some(p));
        }
        assert!(SlPeriodComm::try_from(10).is_err());
        assert_eq!(SlPeriodComm::from_token("sf41"), None);
        assert_eq!(SlPeriodComm::from_token("rf40"), None);
        assert_eq!(SlPeriodComm::from_token("sf040"), None);
    }

    #[test]
    #[should_panic(expected = "SL PERIOD LENGTH NOT SUPPORTED")]
    fn test_period_as_enum_rejects_unknown_length() {
        period_as_enum(100);
    }
}
