/// Pool selection criterion for UE-selected discovery pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SlPoolSelection {
    #[default]
    RsrpBased = 0,
    Random = 1,
}

impl std::convert::TryFrom<u64> for SlPoolSelection {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SlPoolSelection::RsrpBased),
            1 => Ok(SlPoolSelection::Random),
            _ => Err(()),
        }
    }
}

impl SlPoolSelection {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    /// Parses the configuration token ("RSRPBASED" / "RANDOM")
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "RSRPBASED" => Some(SlPoolSelection::RsrpBased),
            "RANDOM" => Some(SlPoolSelection::Random),
            _ => None,
        }
    }
}

impl From<SlPoolSelection> for u64 {
    fn from(e: SlPoolSelection) -> Self { e.into_raw() }
}

impl core::fmt::Display for SlPoolSelection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SlPoolSelection::RsrpBased => write!(f, "RSRPBASED"),
            SlPoolSelection::Random => write!(f, "RANDOM"),
        }
    }
}
