/// Periodic sidelink BSR timer, in subframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PeriodicBsrTimer {
    Sf5 = 0,
    #[default]
    Sf10 = 1,
    Sf16 = 2,
    Sf20 = 3,
    Sf32 = 4,
    Sf40 = 5,
    Sf64 = 6,
    Sf80 = 7,
    Sf128 = 8,
    Sf160 = 9,
    Sf320 = 10,
    Sf640 = 11,
    Sf1280 = 12,
    Sf2560 = 13,
    Infinity = 14,
}

impl std::convert::TryFrom<u64> for PeriodicBsrTimer {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(PeriodicBsrTimer::Sf5),
            1 => Ok(PeriodicBsrTimer::Sf10),
            2 => Ok(PeriodicBsrTimer::Sf16),
            3 => Ok(PeriodicBsrTimer::Sf20),
            4 => Ok(PeriodicBsrTimer::Sf32),
            5 => Ok(PeriodicBsrTimer::Sf40),
            6 => Ok(PeriodicBsrTimer::Sf64),
            7 => Ok(PeriodicBsrTimer::Sf80),
            8 => Ok(PeriodicBsrTimer::Sf128),
            9 => Ok(PeriodicBsrTimer::Sf160),
            10 => Ok(PeriodicBsrTimer::Sf320),
            11 => Ok(PeriodicBsrTimer::Sf640),
            12 => Ok(PeriodicBsrTimer::Sf1280),
            13 => Ok(PeriodicBsrTimer::Sf2560),
            14 => Ok(PeriodicBsrTimer::Infinity),
            _ => Err(()),
        }
    }
}

impl PeriodicBsrTimer {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    /// Timer length in subframes, None for infinity
    pub fn as_subframes(self) -> Option<u32> {
        match self {
            PeriodicBsrTimer::Sf5 => Some(5),
            PeriodicBsrTimer::Sf10 => Some(10),
            PeriodicBsrTimer::Sf16 => Some(16),
            PeriodicBsrTimer::Sf20 => Some(20),
            PeriodicBsrTimer::Sf32 => Some(32),
            PeriodicBsrTimer::Sf40 => Some(40),
            PeriodicBsrTimer::Sf64 => Some(64),
            PeriodicBsrTimer::Sf80 => Some(80),
            PeriodicBsrTimer::Sf128 => Some(128),
            PeriodicBsrTimer::Sf160 => Some(160),
            PeriodicBsrTimer::Sf320 => Some(320),
            PeriodicBsrTimer::Sf640 => Some(640),
            PeriodicBsrTimer::Sf1280 => Some(1280),
            PeriodicBsrTimer::Sf2560 => Some(2560),
            PeriodicBsrTimer::Infinity => None,
        }
    }
}

impl From<PeriodicBsrTimer> for u64 {
    fn from(e: PeriodicBsrTimer) -> Self { e.into_raw() }
}

/// Sidelink BSR retransmission timer, in subframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum RetxBsrTimer {
    #[default]
    Sf320 = 0,
    Sf640 = 1,
    Sf1280 = 2,
    Sf2560 = 3,
    Sf5120 = 4,
    Sf10240 = 5,
}

impl std::convert::TryFrom<u64> for RetxBsrTimer {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(RetxBsrTimer::Sf320),
            1 => Ok(RetxBsrTimer::Sf640),
            2 => Ok(RetxBsrTimer::Sf1280),
            3 => Ok(RetxBsrTimer::Sf2560),
            4 => Ok(RetxBsrTimer::Sf5120),
            5 => Ok(RetxBsrTimer::Sf10240),
            _ => Err(()),
        }
    }
}

impl RetxBsrTimer {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    pub fn as_subframes(self) -> u32 {
        320 << self.into_raw()
    }
}

impl From<RetxBsrTimer> for u64 {
    fn from(e: RetxBsrTimer) -> Self { e.into_raw() }
}
