value_enum! {
    /// Subcarrier spacing of an NR sidelink bandwidth part, in Hz
    ScSpacing: u32, sc_spacing_value, sc_spacing_enum, "Subcarrier spacing not supported {}" {
        KHz15 = 15000,
        KHz30 = 30000,
        KHz60 = 60000,
        KHz120 = 120000,
        KHz240 = 240000,
    }
}

value_enum! {
    /// Number of symbols of a slot used for sidelink
    SlLengthSymbols: u16, sl_length_symbols_value, sl_length_symbols_enum, "Invalid symbol allocation for SL {}" {
        Sym7 = 7,
        Sym8 = 8,
        Sym9 = 9,
        Sym10 = 10,
        Sym11 = 11,
        Sym12 = 12,
        Sym13 = 13,
        Sym14 = 14,
    }
}

value_enum! {
    /// First symbol of a slot used for sidelink
    SlStartSymbol: u16, sl_start_symbol_value, sl_start_symbol_enum, "Invalid sidelink symbol start value {}" {
        Sym0 = 0,
        Sym1 = 1,
        Sym2 = 2,
        Sym3 = 3,
        Sym4 = 4,
        Sym5 = 5,
        Sym6 = 6,
        Sym7 = 7,
    }
}

value_enum! {
    /// PSCCH duration in symbols
    SlTimeResourcePscch: u16, sl_time_resource_pscch_value, sl_time_resource_pscch_enum,
        "Invalid number of symbols : {} used for PSCCH" {
        N1 = 1,
        N2 = 2,
        N3 = 3,
    }
}

value_enum! {
    /// PSCCH bandwidth in PRBs
    SlFreqResourcePscch: u16, sl_freq_resource_pscch_value, sl_freq_resource_pscch_enum,
        "Invalid number of PRBs : {} used for PSCCH" {
        N10 = 10,
        N12 = 12,
        N15 = 15,
        N20 = 20,
        N25 = 25,
    }
}

value_enum! {
    /// Subchannel size in PRBs
    SlSubchannelSize: u16, sl_subchannel_size_value, sl_subchannel_size_enum, "Invalid Subchannel size : {} used" {
        N10 = 10,
        N15 = 15,
        N20 = 20,
        N25 = 25,
        N50 = 50,
        N75 = 75,
        N100 = 100,
    }
}

value_enum! {
    /// Sensing window in ms
    SlSensingWindow: u16, sl_sensing_window_value, sl_sensing_window_enum,
        "Invalid sidelink sensing window size : {} used" {
        Ms100 = 100,
        Ms1100 = 1100,
    }
}

value_enum! {
    /// Selection window T2 in slots
    SlSelectionWindow: u16, sl_selection_window_value, sl_selection_window_enum,
        "Invalid sidelink selection window size : {} used" {
        N1 = 1,
        N5 = 5,
        N10 = 10,
        N20 = 20,
    }
}

value_enum! {
    /// Resource reservation period in ms
    SlResourceReservePeriod: u16, sl_resource_reserve_period_value, sl_resource_reserve_period_enum,
        "Invalid sidelink reservation period : {} used" {
        Ms0 = 0,
        Ms10 = 10,
        Ms20 = 20,
        Ms30 = 30,
        Ms40 = 40,
        Ms50 = 50,
        Ms60 = 60,
        Ms70 = 70,
        Ms80 = 80,
        Ms90 = 90,
        Ms100 = 100,
        Ms150 = 150,
        Ms200 = 200,
        Ms250 = 250,
        Ms300 = 300,
        Ms350 = 350,
        Ms400 = 400,
        Ms450 = 450,
        Ms500 = 500,
        Ms550 = 550,
        Ms600 = 600,
        Ms650 = 650,
        Ms700 = 700,
        Ms750 = 750,
        Ms800 = 800,
        Ms850 = 850,
        Ms900 = 900,
        Ms950 = 950,
        Ms1000 = 1000,
    }
}

value_enum! {
    /// Maximum number of reserved resources per reservation
    SlMaxNumPerReserve: u8, sl_max_num_per_reserve_value, sl_max_num_per_reserve_enum,
        "Invalid sidelink value {} used for number SlMaxNumPerReserve" {
        N1 = 1,
        N2 = 2,
        N3 = 3,
    }
}

/// Scaling factor applied to the transport block size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SlScaling {
    F0p5 = 0,
    F0p65 = 1,
    F0p8 = 2,
    F1 = 3,
}

impl std::convert::TryFrom<u64> for SlScaling {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(SlScaling::F0p5),
            1 => Ok(SlScaling::F0p65),
            2 => Ok(SlScaling::F0p8),
            3 => Ok(SlScaling::F1),
            _ => Err(()),
        }
    }
}

impl SlScaling {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

pub fn sl_scaling_value(e: SlScaling) -> f32 {
    match e {
        SlScaling::F0p5 => 0.5,
        SlScaling::F0p65 => 0.65,
        SlScaling::F0p8 => 0.8,
        SlScaling::F1 => 1.0,
    }
}

pub fn sl_scaling_enum(scaling: f32) -> SlScaling {
    // Integral mask so the comparison is exact
    let mask = (100.0 * scaling) as u32;
    match mask {
        50 => SlScaling::F0p5,
        65 => SlScaling::F0p65,
        80 => SlScaling::F0p8,
        100 => SlScaling::F1,
        _ => panic!("Invalid sidelink scaling factor value : {}", scaling),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_symbol_is_a_bijection() {
        for v in 0..=7u16 {
            assert_eq!(sl_start_symbol_value(sl_start_symbol_enum(v)), v);
        }
        assert_eq!(sl_start_symbol_enum(5), SlStartSymbol::Sym5);
        assert_eq!(sl_start_symbol_enum(6), SlStartSymbol::Sym6);
    }

    #[test]
    fn test_reserve_period_roundtrip() {
        for e in SlResourceReservePeriod::ALL {
            assert_eq!(sl_resource_reserve_period_enum(sl_resource_reserve_period_value(*e)), *e);
        }
        assert_eq!(sl_resource_reserve_period_value(SlResourceReservePeriod::Ms250), 250);
        assert_eq!(SlResourceReservePeriod::ALL.len(), 29);
    }

    #[test]
    fn test_enum_roundtrips() {
        for e in ScSpacing::ALL {
            assert_eq!(sc_spacing_enum(sc_spacing_value(*e)), *e);
        }
        for e in SlLengthSymbols::ALL {
            assert_eq!(sl_length_symbols_enum(sl_length_symbols_value(*e)), *e);
        }
        for e in SlTimeResourcePscch::ALL {
            assert_eq!(sl_time_resource_pscch_enum(sl_time_resource_pscch_value(*e)), *e);
        }
        for e in SlFreqResourcePscch::ALL {
            assert_eq!(sl_freq_resource_pscch_enum(sl_freq_resource_pscch_value(*e)), *e);
        }
        for e in SlSubchannelSize::ALL {
            assert_eq!(sl_subchannel_size_enum(sl_subchannel_size_value(*e)), *e);
        }
        for e in SlSensingWindow::ALL {
            assert_eq!(sl_sensing_window_enum(sl_sensing_window_value(*e)), *e);
        }
        for e in SlSelectionWindow::ALL {
            assert_eq!(sl_selection_window_enum(sl_selection_window_value(*e)), *e);
        }
        for e in SlMaxNumPerReserve::ALL {
            assert_eq!(sl_max_num_per_reserve_enum(sl_max_num_per_reserve_value(*e)), *e);
        }
        for raw in 0..4 {
            let e = SlScaling::try_from(raw).unwrap();
            assert_eq!(sl_scaling_enum(sl_scaling_value(e)), e);
        }
    }

    #[test]
    fn test_raw_decoding() {
        assert_eq!(SlSubchannelSize::try_from(4), Ok(SlSubchannelSize::N50));
        assert_eq!(SlSubchannelSize::try_from(7), Err(()));
        assert_eq!(u64::from(SlSensingWindow::Ms1100), 1);
    }

    #[test]
    #[should_panic(expected = "Subcarrier spacing not supported 20000")]
    fn test_invalid_spacing() {
        sc_spacing_enum(20000);
    }

    #[test]
    #[should_panic(expected = "Invalid sidelink scaling factor value")]
    fn test_invalid_scaling() {
        sl_scaling_enum(0.7);
    }

    #[test]
    #[should_panic(expected = "Invalid sidelink reservation period : 15 used")]
    fn test_invalid_reserve_period() {
        sl_resource_reserve_period_enum(15);
    }
}
