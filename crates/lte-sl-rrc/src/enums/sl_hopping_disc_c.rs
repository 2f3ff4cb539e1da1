/// Per-cell parameter c of the discovery hopping configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SlHoppingDiscC {
    #[default]
    N1 = 0,
    N5 = 1,
}

impl std::convert::TryFrom<u64> for SlHoppingDiscC {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SlHoppingDiscC::N1),
            1 => Ok(SlHoppingDiscC::N5),
            _ => Err(()),
        }
    }
}

impl SlHoppingDiscC {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    pub fn as_int(self) -> u32 {
        match self {
            SlHoppingDiscC::N1 => 1,
            SlHoppingDiscC::N5 => 5,
        }
    }
}

impl From<SlHoppingDiscC> for u64 {
    fn from(e: SlHoppingDiscC) -> Self { e.into_raw() }
}

impl core::fmt::Display for SlHoppingDiscC {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "n{}", self.as_int())
    }
}
