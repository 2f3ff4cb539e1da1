use lte_sl_core::{SUBFRAMES_PER_SFN_CYCLE, SubframeInfo};

/// Location of one transmission: subframe, first PRB and number of PRBs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidelinkTransmissionInfo {
    pub subframe: SubframeInfo,
    pub rb_start: u8,
    pub nb_rb: u8,
}

impl core::fmt::Display for SidelinkTransmissionInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} rb {}+{}", self.subframe, self.rb_start, self.nb_rb)
    }
}

/// Absolute subframe index within the SFN cycle
#[inline(always)]
pub fn abs_subframe(frame_no: u32, subframe_no: u32) -> i64 {
    i64::from(10 * (frame_no % 1024) + subframe_no % 10)
}

/// Index of the period containing `subframe`. Negative for subframes before the first offset.
#[inline(always)]
pub fn period_index(subframe: i64, offset: u32, period: u32) -> i64 {
    (subframe - i64::from(offset)).div_euclid(i64::from(period))
}

fn to_subframe_info(start: i64) -> SubframeInfo {
    SubframeInfo::from_int(start.rem_euclid(i64::from(SUBFRAMES_PER_SFN_CYCLE)) as u32)
}

/// Start of the period containing (frame_no, subframe_no)
pub fn current_period_start(frame_no: u32, subframe_no: u32, offset: u32, period: u32) -> SubframeInfo {
    let cur = period_index(abs_subframe(frame_no, subframe_no), offset, period);
    to_subframe_info(i64::from(offset) + cur * i64::from(period))
}

/// Start of the period following the one containing (frame_no, subframe_no).
/// The last period of the SFN cycle is followed by the first one.
pub fn next_period_start(frame_no: u32, subframe_no: u32, offset: u32, period: u32) -> SubframeInfo {
    let mut cur = period_index(abs_subframe(frame_no, subframe_no), offset, period);
    let last = i64::from((SUBFRAMES_PER_SFN_CYCLE - offset) / period) - 1;
    if cur >= last {
        cur = -1;
    }
    to_subframe_info(i64::from(offset) + (cur + 1) * i64::from(period))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_period_wraps() {
        // sf120 with offset 80
        assert_eq!(next_period_start(0, 5, 80, 120), SubframeInfo::new(8, 0));
        assert_eq!(next_period_start(1023, 0, 80, 120), SubframeInfo::new(8, 0));
        assert_eq!(next_period_start(1002, 0, 80, 120), SubframeInfo::new(1004, 0));
        // A period start maps onto the following period
        assert_eq!(next_period_start(8, 0, 80, 120), SubframeInfo::new(20, 0));
    }

    #[test]
    fn test_current_period_start() {
        assert_eq!(current_period_start(8, 0, 80, 120), SubframeInfo::new(8, 0));
        assert_eq!(current_period_start(19, 9, 80, 120), SubframeInfo::new(8, 0));
        assert_eq!(current_period_start(20, 0, 80, 120), SubframeInfo::new(20, 0));
        // Before the first offset belongs to the period started in the previous cycle
        assert_eq!(current_period_start(0, 5, 80, 120), SubframeInfo::new(1020, 0));
    }
}
