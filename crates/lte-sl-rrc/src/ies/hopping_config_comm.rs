use crate::enums::sl_num_subbands::SlNumSubbands;

/// hoppingInfo value with frequency hopping disabled
pub const NO_HOPPING: u8 = 0xFF;

/// SL-HoppingConfigComm-r12
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlHoppingConfigComm {
    /// Gold sequence seed, 0..=504 (510 when set from the factory above 503)
    pub hopping_parameter: u16,
    pub num_subbands: SlNumSubbands,
    /// 0..=110
    pub rb_offset: u8,
    /// 0, 1 or 2: Type 1 hopping; 3: Type 2 hopping; anything else: no hopping
    pub hopping_info: u8,
}

impl Default for SlHoppingConfigComm {
    fn default() -> Self {
        Self {
            hopping_parameter: 0,
            num_subbands: SlNumSubbands::default(),
            rb_offset: 0,
            hopping_info: NO_HOPPING,
        }
    }
}

impl SlHoppingConfigComm {
    pub fn hopping_enabled(&self) -> bool {
        self.hopping_info <= 3
    }

    pub fn is_type1(&self) -> bool {
        self.hopping_info <= 2
    }

    pub fn is_type2(&self) -> bool {
        self.hopping_info == 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_hopping() {
        let cfg = SlHoppingConfigComm::default();
        assert_eq!(cfg.hopping_info, NO_HOPPING);
        assert!(!cfg.hopping_enabled());
        assert!(!cfg.is_type1() && !cfg.is_type2());
    }
}
