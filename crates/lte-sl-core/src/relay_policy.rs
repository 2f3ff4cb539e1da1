use serde::Deserialize;

/// Policy used by the UE controller to pick a Relay UE among the discovered ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelayUeSelectionAlgorithm {
    /// Random valid relay, only when not yet connected
    RandomNoReselection,
    /// Strongest SD-RSRP, only when not yet connected
    #[default]
    MaxSdrsrpNoReselection,
    /// Strongest SD-RSRP on every evaluation
    MaxSdrsrp,
}

impl std::convert::TryFrom<u64> for RelayUeSelectionAlgorithm {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(RelayUeSelectionAlgorithm::RandomNoReselection),
            1 => Ok(RelayUeSelectionAlgorithm::MaxSdrsrpNoReselection),
            2 => Ok(RelayUeSelectionAlgorithm::MaxSdrsrp),
            _ => Err(()),
        }
    }
}

impl RelayUeSelectionAlgorithm {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<RelayUeSelectionAlgorithm> for u64 {
    fn from(e: RelayUeSelectionAlgorithm) -> Self { e.into_raw() }
}

impl core::fmt::Display for RelayUeSelectionAlgorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RelayUeSelectionAlgorithm::RandomNoReselection => write!(f, "RandomNoReselection"),
            RelayUeSelectionAlgorithm::MaxSdrsrpNoReselection => write!(f, "MaxSDRsrpNoReselection"),
            RelayUeSelectionAlgorithm::MaxSdrsrp => write!(f, "MaxSDRsrp"),
        }
    }
}

/// Measurement campaign run by the CAMAD 2019 controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Campaign {
    #[default]
    Discovery,
    Connection,
    Communication,
}

impl Campaign {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Discovery" => Some(Campaign::Discovery),
            "Connection" => Some(Campaign::Connection),
            "Communication" => Some(Campaign::Communication),
            _ => None,
        }
    }

    /// Fatal variant of [`Campaign::from_name`]
    pub fn parse(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| panic!("The campaign {} does not exist.", name))
    }
}

impl core::fmt::Display for Campaign {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Campaign::Discovery => write!(f, "Discovery"),
            Campaign::Connection => write!(f, "Connection"),
            Campaign::Communication => write!(f, "Communication"),
        }
    }
}
