use core::fmt;
use core::ops::{Add, Sub};
use std::cmp::Ordering;

/// Number of frames before the System Frame Number wraps back to 0
pub const SFN_WRAP: u32 = 1024;

/// Number of subframes in one SFN cycle
pub const SUBFRAMES_PER_SFN_CYCLE: u32 = SFN_WRAP * 10;

/// Location of a subframe on the sidelink, as (frame, subframe).
/// Frames are expected in 0..1024 and subframes in 0..10, but larger values
/// are folded back by the arithmetic below.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubframeInfo {
    /// Frame number, 0 to 1023
    pub frame_no: u32,
    /// Subframe number, 0 to 9
    pub subframe_no: u32,
}

impl SubframeInfo {
    pub const fn new(frame_no: u32, subframe_no: u32) -> Self {
        Self { frame_no, subframe_no }
    }

    /// Absolute subframe index within one SFN cycle, in 0..10240
    #[inline(always)]
    pub fn to_int(self) -> u32 {
        10 * (self.frame_no % SFN_WRAP) + self.subframe_no % 10
    }

    /// Converts an absolute subframe index back into (frame, subframe),
    /// wrapping the frame number at 1024
    #[inline(always)]
    pub fn from_int(abs_subframe: u32) -> Self {
        Self {
            frame_no: (abs_subframe / 10) % SFN_WRAP,
            subframe_no: abs_subframe % 10,
        }
    }

    /// Interprets a pool-relative subframe count (as stored in the resource
    /// vectors) as a (frame, subframe) offset without SFN wrapping
    #[inline(always)]
    pub fn from_offset(offset: u32) -> Self {
        Self {
            frame_no: offset / 10,
            subframe_no: offset % 10,
        }
    }
}

impl Add for SubframeInfo {
    type Output = SubframeInfo;

    /// Adds two subframe locations, used to turn a period start plus a relative
    /// offset into an absolute location
    fn add(self, rhs: SubframeInfo) -> SubframeInfo {
        SubframeInfo::from_int(self.to_int() + rhs.to_int())
    }
}

impl Sub for SubframeInfo {
    type Output = SubframeInfo;

    /// Distance from `rhs` to `self`, handling SFN wrap-around
    fn sub(self, rhs: SubframeInfo) -> SubframeInfo {
        let mut tmp = self.to_int();
        if self < rhs {
            tmp += SUBFRAMES_PER_SFN_CYCLE;
        }
        tmp -= rhs.to_int();
        SubframeInfo::from_int(tmp)
    }
}

impl PartialOrd for SubframeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SubframeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frame_no
            .cmp(&other.frame_no)
            .then(self.subframe_no.cmp(&other.subframe_no))
    }
}

impl fmt::Display for SubframeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:4}/{}", self.frame_no, self.subframe_no)
    }
}

impl fmt::Debug for SubframeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:4}/{}", self.frame_no, self.subframe_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_wraps_at_sfn_cycle() {
        let a = SubframeInfo::new(1023, 5);
        let b = SubframeInfo::new(0, 7);
        assert_eq!(a + b, SubframeInfo::new(0, 2));

        // Out of range inputs are folded before adding
        let c = SubframeInfo::new(1030, 12);
        assert_eq!(c + SubframeInfo::default(), SubframeInfo::new(6, 2));
    }

    #[test]
    fn test_sub_and_add_roundtrip() {
        let start = SubframeInfo::new(1000, 3);
        for delta in 0..SUBFRAMES_PER_SFN_CYCLE {
            let d = SubframeInfo::from_int(delta);
            let end = start + d;
            assert_eq!(end - start, d);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(SubframeInfo::new(3, 9) < SubframeInfo::new(4, 0));
        assert!(SubframeInfo::new(4, 1) > SubframeInfo::new(4, 0));
        let mut v = vec![SubframeInfo::new(2, 1), SubframeInfo::new(0, 9), SubframeInfo::new(2, 0)];
        v.sort();
        assert_eq!(v, vec![SubframeInfo::new(0, 9), SubframeInfo::new(2, 0), SubframeInfo::new(2, 1)]);
    }

    #[test]
    fn test_from_offset_keeps_large_frames() {
        let s = SubframeInfo::from_offset(10245);
        assert_eq!(s.frame_no, 1024);
        assert_eq!(s.subframe_no, 5);
        assert_eq!(s.to_int(), 5);
    }
}
