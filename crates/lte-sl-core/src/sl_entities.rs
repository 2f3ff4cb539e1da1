// Entities making up a sidelink-capable UE, plus the collaborators they talk to
#[derive(PartialEq, Eq, Hash, Clone, Debug, Copy)]
pub enum SlEntity {
    /// Radio resource control, owner of the resource pools
    Rrc,
    /// Non-access stratum
    Nas,
    /// UE-to-Network relay controller
    UeController,
    /// IP stack of the node (interfaces, routes, forwarding)
    IpStack,
    /// Sidelink helper standing in for core network reporting
    Helper,
    /// Collector of connection/selection traces
    Monitor,

    /// Any U-plane application. SAP determines routing
    User,
}
