/// Number of subbands used for PUSCH-style frequency hopping on the PSSCH
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SlNumSubbands {
    Ns1 = 1,
    Ns2 = 2,
    #[default]
    Ns4 = 4,
}

impl std::convert::TryFrom<u64> for SlNumSubbands {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            1 => Ok(SlNumSubbands::Ns1),
            2 => Ok(SlNumSubbands::Ns2),
            4 => Ok(SlNumSubbands::Ns4),
            _ => Err(()),
        }
    }
}

impl SlNumSubbands {
    /// Convert this enum back into the raw integer value, which is the subband count
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    /// Number of subbands
    pub fn count(self) -> u32 {
        self as u32
    }

    /// Parses the configuration token ("ns1", "ns2", "ns4")
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "ns1" => Some(SlNumSubbands::Ns1),
            "ns2" => Some(SlNumSubbands::Ns2),
            "ns4" => Some(SlNumSubbands::Ns4),
            _ => None,
        }
    }
}

impl From<SlNumSubbands> for u64 {
    fn from(e: SlNumSubbands) -> Self { e.into_raw() }
}

impl core::fmt::Display for SlNumSubbands {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ns{}", self.count())
    }
}
