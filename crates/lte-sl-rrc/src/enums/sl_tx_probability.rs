/// SL-TxProbability-r12, probability that a UE announces in a discovery period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SlTxProbability {
    P25 = 0,
    P50 = 1,
    P75 = 2,
    #[default]
    P100 = 3,
}

impl std::convert::TryFrom<u64> for SlTxProbability {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SlTxProbability::P25),
            1 => Ok(SlTxProbability::P50),
            2 => Ok(SlTxProbability::P75),
            3 => Ok(SlTxProbability::P100),
            _ => Err(()),
        }
    }
}

impl SlTxProbability {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }

    /// Probability in percent
    pub fn as_percent(self) -> u32 {
        match self {
            SlTxProbability::P25 => 25,
            SlTxProbability::P50 => 50,
            SlTxProbability::P75 => 75,
            SlTxProbability::P100 => 100,
        }
    }

    pub fn from_percent(p: u32) -> Option<Self> {
        match p {
            25 => Some(SlTxProbability::P25),
            50 => Some(SlTxProbability::P50),
            75 => Some(SlTxProbability::P75),
            100 => Some(SlTxProbability::P100),
            _ => None,
        }
    }

    /// Parses the configuration token ("p25", "p50", "p75", "p100")
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "p25" => Some(SlTxProbability::P25),
            "p50" => Some(SlTxProbability::P50),
            "p75" => Some(SlTxProbability::P75),
            "p100" => Some(SlTxProbability::P100),
            _ => None,
        }
    }
}

impl From<SlTxProbability> for u64 {
    fn from(e: SlTxProbability) -> Self { e.into_raw() }
}

impl core::fmt::Display for SlTxProbability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "p{}", self.as_percent())
    }
}

/// Tx probability in percent
pub fn tx_probability_as_int(p: SlTxProbability) -> u32 {
    p.as_percent()
}

/// Fatal conversion of a percentage to a tx probability
pub fn tx_probability_from_int(p: u32) -> SlTxProbability {
    SlTxProbability::from_percent(p)
        .unwrap_or_else(|| panic!("Invalid probability value {}. Valid values are 25, 50, 75 and 100", p))
}
