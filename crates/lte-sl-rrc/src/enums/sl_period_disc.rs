/// SL-DiscPeriod-r12, length of the discovery period in radio frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SlPeriodDisc {
    #[default]
    Rf32 = 0,
    Rf64 = 1,
    Rf128 = 2,
    Rf256 = 3,
    Rf512 = 4,
    Rf1024 = 5,
}

impl std::convert::TryFrom<u64> for SlPeriodDisc {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SlPeriodDisc::Rf32),
            1 => Ok(SlPeriodDisc::Rf64),
            2 => Ok(SlPeriodDisc::Rf128),
            3 => Ok(SlPeriodDisc::Rf256),
            4 => Ok(SlPeriodDisc::Rf512),
            5 => Ok(SlPeriodDisc::Rf1024),
            _ => Err(()),
        }
    }
}

impl SlPeriodDisc {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    /// Number of radio frames in one period
    pub fn as_frames(self) -> u32 {
        match self {
            SlPeriodDisc::Rf32 => 32,
            SlPeriodDisc::Rf64 => 64,
            SlPeriodDisc::Rf128 => 128,
            SlPeriodDisc::Rf256 => 256,
            SlPeriodDisc::Rf512 => 512,
            SlPeriodDisc::Rf1024 => 1024,
        }
    }

    /// Period length in subframes (ms)
    pub fn as_subframes(self) -> u32 {
        10 * self.as_frames()
    }

    /// Parses the configuration token ("rf32" .. "rf1024")
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "rf32" => Some(SlPeriodDisc::Rf32),
            "rf64" => Some(SlPeriodDisc::Rf64),
            "rf128" => Some(SlPeriodDisc::Rf128),
            "rf256" => Some(SlPeriodDisc::Rf256),
            "rf512" => Some(SlPeriodDisc::Rf512),
            "rf1024" => Some(SlPeriodDisc::Rf1024),
            _ => None,
        }
    }
}

impl From<SlPeriodDisc> for u64 {
    fn from(e: SlPeriodDisc) -> Self { e.into_raw() }
}

impl core::fmt::Display for SlPeriodDisc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "rf{}", self.as_frames())
    }
}

/// Discovery period length in subframes
pub fn disc_period_as_int(period: SlPeriodDisc) -> u32 {
    period.as_subframes()
}
