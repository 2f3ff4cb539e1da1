/// Alpha parameter of the sidelink open loop power control (TS 36.213)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SlTxAlpha {
    Al0 = 0,
    Al04 = 1,
    Al05 = 2,
    Al06 = 3,
    Al07 = 4,
    Al08 = 5,
    #[default]
    Al09 = 6,
    Al1 = 7,
}

impl std::convert::TryFrom<u64> for SlTxAlpha {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SlTxAlpha::Al0),
            1 => Ok(SlTxAlpha::Al04),
            2 => Ok(SlTxAlpha::Al05),
            3 => Ok(SlTxAlpha::Al06),
            4 => Ok(SlTxAlpha::Al07),
            5 => Ok(SlTxAlpha::Al08),
            6 => Ok(SlTxAlpha::Al09),
            7 => Ok(SlTxAlpha::Al1),
            _ => Err(()),
        }
    }
}

impl SlTxAlpha {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    pub fn as_f64(self) -> f64 {
        match self {
            SlTxAlpha::Al0 => 0.0,
            SlTxAlpha::Al04 => 0.4,
            SlTxAlpha::Al05 => 0.5,
            SlTxAlpha::Al06 => 0.6,
            SlTxAlpha::Al07 => 0.7,
            SlTxAlpha::Al08 => 0.8,
            SlTxAlpha::Al09 => 0.9,
            SlTxAlpha::Al1 => 1.0,
        }
    }

    /// Parses the configuration token ("al0", "al04" .. "al09", "al1")
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "al0" => Some(SlTxAlpha::Al0),
            "al04" => Some(SlTxAlpha::Al04),
            "al05" => Some(SlTxAlpha::Al05),
            "al06" => Some(SlTxAlpha::Al06),
            "al07" => Some(SlTxAlpha::Al07),
            "al08" => Some(SlTxAlpha::Al08),
            "al09" => Some(SlTxAlpha::Al09),
            "al1" => Some(SlTxAlpha::Al1),
            _ => None,
        }
    }
}

impl From<SlTxAlpha> for u64 {
    fn from(e: SlTxAlpha) -> Self { e.into_raw() }
}

impl core::fmt::Display for SlTxAlpha {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SlTxAlpha::Al0 => write!(f, "al0"),
            SlTxAlpha::Al04 => write!(f, "al04"),
            SlTxAlpha::Al05 => write!(f, "al05"),
            SlTxAlpha::Al06 => write!(f, "al06"),
            SlTxAlpha::Al07 => write!(f, "al07"),
            SlTxAlpha::Al08 => write!(f, "al08"),
            SlTxAlpha::Al09 => write!(f, "al09"),
            SlTxAlpha::Al1 => write!(f, "al1"),
        }
    }
}
