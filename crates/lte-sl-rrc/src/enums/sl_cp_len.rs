/// SL-CP-Len-r12, cyclic prefix length of a sidelink channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SlCpLen {
    #[default]
    Normal = 0,
    Extended = 1,
}

impl std::convert::TryFrom<u64> for SlCpLen {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SlCpLen::Normal),
            1 => Ok(SlCpLen::Extended),
            _ => Err(()),
        }
    }
}

impl SlCpLen {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            SlCpLen::Normal => 0,
            SlCpLen::Extended => 1,
        }
    }

    /// Parses the configuration token ("NORMAL" / "EXTENDED")
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "NORMAL" => Some(SlCpLen::Normal),
            "EXTENDED" => Some(SlCpLen::Extended),
            _ => None,
        }
    }
}

impl From<SlCpLen> for u64 {
    fn from(e: SlCpLen) -> Self { e.into_raw() }
}

impl core::fmt::Display for SlCpLen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SlCpLen::Normal => write!(f, "NORMAL"),
            SlCpLen::Extended => write!(f, "EXTENDED"),
        }
    }
}
