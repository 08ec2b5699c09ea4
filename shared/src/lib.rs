pub use anyhow::Error;
use std::{
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    time::Duration,
};

pub mod local;
pub mod types;

pub use publicip::{IpInfo, Mode, Provider, PublicIp, Resolver, Schema};
pub use types::*;

/// Where the private-address probe "connects" to. Any routable public
/// address works, nothing is ever sent to it.
pub const PROBE_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 80));
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
