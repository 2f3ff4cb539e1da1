use crate::enums::bsr_timers::{PeriodicBsrTimer, RetxBsrTimer};

/// MAC-MainConfigSL-r12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlMacMainConfigSl {
    pub periodic_bsr_timer: PeriodicBsrTimer,
    pub retx_bsr_timer: RetxBsrTimer,
}
