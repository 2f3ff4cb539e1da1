// SAPs between the sidelink entities
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Sap {
    /// RRC -> UE controller
    UeCtrlSap,
    /// NAS <-> RRC (access stratum)
    AsSap,
    /// Controller/application -> NAS
    NasSap,
    /// NAS/controller -> node IP stack
    IpSap,
    /// Controller -> sidelink helper (core network notifications)
    HelperSap,
    /// Trace events towards a monitor
    Trace,

    /// Custom SAP for inter-entity control messages
    Control
}
