//! Discover the address of the interface this machine uses to reach the
//! outside world.
//!
//! A UDP socket is `connect`ed to a public address, which makes the kernel
//! pick a route and bind a local address for it. No datagram is sent, so this
//! works even when the probe address would never answer.

use crate::{IoErrorContext, NetworkError};
use std::{
    io,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket},
};

pub fn private_ip(probe: SocketAddr) -> Result<IpAddr, NetworkError> {
    let unspecified: IpAddr = match probe {
        SocketAddr::V4(_) => Ipv4Addr::UNSPECIFIED.into(),
        SocketAddr::V6(_) => Ipv6Addr::UNSPECIFIED.into(),
    };
    let socket = UdpSocket::bind(SocketAddr::new(unspecified, 0)).with_probe(probe)?;
    socket.connect(probe).with_probe(probe)?;
    let local = socket.local_addr().with_probe(probe)?;
    log::debug!("route toward {probe} leaves from {local}");

    if local.ip().is_unspecified() {
        return Err::<IpAddr, _>(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            "no local address was selected",
        ))
        .with_probe(probe);
    }

    Ok(local.ip())
}
