use serde::Deserialize;

/// Role of a UE in a UE-to-Network relay link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum RelayRole {
    RemoteUe,
    RelayUe,
}

impl std::convert::TryFrom<u64> for RelayRole {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(RelayRole::RemoteUe),
            1 => Ok(RelayRole::RelayUe),
            _ => Err(()),
        }
    }
}

impl RelayRole {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        match self {
            RelayRole::RemoteUe => 0,
            RelayRole::RelayUe => 1,
        }
    }
}

impl From<RelayRole> for u64 {
    fn from(e: RelayRole) -> Self { e.into_raw() }
}

impl core::fmt::Display for RelayRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RelayRole::RemoteUe => write!(f, "RemoteUE"),
            RelayRole::RelayUe => write!(f, "RelayUE"),
        }
    }
}
