/// TDD uplink/downlink subframe assignment (TS 36.211 table 4.2-2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SubframeAssignment {
    #[default]
    Sa0 = 0,
    Sa1 = 1,
    Sa2 = 2,
    Sa3 = 3,
    Sa4 = 4,
    Sa5 = 5,
    Sa6 = 6,
}

impl std::convert::TryFrom<u64> for SubframeAssignment {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SubframeAssignment::Sa0),
            1 => Ok(SubframeAssignment::Sa1),
            2 => Ok(SubframeAssignment::Sa2),
            3 => Ok(SubframeAssignment::Sa3),
            4 => Ok(SubframeAssignment::Sa4),
            5 => Ok(SubframeAssignment::Sa5),
            6 => Ok(SubframeAssignment::Sa6),
            _ => Err(()),
        }
    }
}

impl SubframeAssignment {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<SubframeAssignment> for u64 {
    fn from(e: SubframeAssignment) -> Self { e.into_raw() }
}

impl core::fmt::Display for SubframeAssignment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "sa{}", self.into_raw())
    }
}

/// TDD special subframe configuration (TS 36.211 table 4.2-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SpecialSubframePatterns {
    #[default]
    Ssp0 = 0,
    Ssp1 = 1,
    Ssp2 = 2,
    Ssp3 = 3,
    Ssp4 = 4,
    Ssp5 = 5,
    Ssp6 = 6,
    Ssp7 = 7,
    Ssp8 = 8,
}

impl std::convert::TryFrom<u64> for SpecialSubframePatterns {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SpecialSubframePatterns::Ssp0),
            1 => Ok(SpecialSubframePatterns::Ssp1),
            2 => Ok(SpecialSubframePatterns::Ssp2),
            3 => Ok(SpecialSubframePatterns::Ssp3),
            4 => Ok(SpecialSubframePatterns::Ssp4),
            5 => Ok(SpecialSubframePatterns::Ssp5),
            6 => Ok(SpecialSubframePatterns::Ssp6),
            7 => Ok(SpecialSubframePatterns::Ssp7),
            8 => Ok(SpecialSubframePatterns::Ssp8),
            _ => Err(()),
        }
    }
}

impl SpecialSubframePatterns {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<SpecialSubframePatterns> for u64 {
    fn from(e: SpecialSubframePatterns) -> Self { e.into_raw() }
}

impl core::fmt::Display for SpecialSubframePatterns {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ssp{}", self.into_raw())
    }
}
