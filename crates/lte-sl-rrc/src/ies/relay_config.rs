/// SL-ReselectionInfoRelay-r13, parameters for (re)selecting a UE-to-Network relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlReselectionInfoRelay {
    /// Minimum SD-RSRP in dBm, -70..=-22
    pub q_rx_lev_min: i16,
    /// L3 filter coefficient k
    pub filter_coefficient: u16,
    /// dB above q_rx_lev_min
    pub min_hyst: u16,
}

/// SL-DiscConfigRelayUE-r13
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlDiscConfigRelayUe {
    pub thresh_high: u16,
    pub thresh_low: u16,
    pub hyst_max: u16,
    pub hyst_min: u16,
}

/// SL-DiscConfigRemoteUE-r13
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlDiscConfigRemoteUe {
    pub thresh_high: u16,
    pub hyst_max: u16,
    pub reselection_info_ic: Option<SlReselectionInfoRelay>,
}

/// SL-PreconfigRelay-r13, used by out of coverage remote UEs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlPreconfigRelay {
    pub reselection_info_ooc: Option<SlReselectionInfoRelay>,
}
