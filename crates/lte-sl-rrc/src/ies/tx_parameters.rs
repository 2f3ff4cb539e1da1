use crate::enums::sl_tx_alpha::SlTxAlpha;

/// SL-TxParameters-r12: open loop power control parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlTxParameters {
    pub alpha: SlTxAlpha,
    /// Nominal power in dBm, -126..=31
    pub p0: i16,
}

impl Default for SlTxParameters {
    fn default() -> Self {
        Self { alpha: SlTxAlpha::Al09, p0: -40 }
    }
}

/// Alpha as a real value
pub fn alpha_as_double(params: &SlTxParameters) -> f64 {
    params.alpha.as_f64()
}
