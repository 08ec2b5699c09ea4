//! Run the public and private lookups side by side and merge what they found.

use shared::{local, Error, LookupConfig, LookupResult, Mode, PublicIp, Resolver};
use std::{
    net::{IpAddr, SocketAddr},
    thread,
};

/// The two lookups of a run. Each method is called exactly once, on its own
/// thread, so implementations must be shareable across threads.
pub trait Resolve: Sync {
    fn public_ip(&self) -> Result<PublicIp, Error>;
    fn private_ip(&self) -> Result<IpAddr, Error>;
}

/// Resolves over the network: HTTP for the public address, a routed UDP
/// socket for the private one.
pub struct NetResolver {
    resolver: Resolver,
    mode: Mode,
    probe: SocketAddr,
}

impl NetResolver {
    pub fn new(config: LookupConfig) -> Self {
        Self {
            resolver: Resolver::new(config.provider, config.timeout),
            mode: config.mode,
            probe: config.probe,
        }
    }
}

impl Resolve for NetResolver {
    fn public_ip(&self) -> Result<PublicIp, Error> {
        Ok(self.resolver.resolve(self.mode)?)
    }

    fn private_ip(&self) -> Result<IpAddr, Error> {
        Ok(local::private_ip(self.probe)?)
    }
}

/// Start both lookups and wait for both of them, whatever the outcome.
///
/// A lookup that fails (or panics) is logged and leaves its half of the
/// result empty; it never affects the other one.
pub fn resolve_all(resolver: &impl Resolve) -> LookupResult {
    let (public, private) = thread::scope(|s| {
        let public = s.spawn(|| resolver.public_ip());
        let private = s.spawn(|| resolver.private_ip());
        (
            settle(public.join(), "public IP"),
            settle(private.join(), "private IP"),
        )
    });

    LookupResult::new(public, private)
}

fn settle<T>(joined: thread::Result<Result<T, Error>>, what: &str) -> Option<T> {
    match joined {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            log::error!("Failed to retrieve {what}: {e}");
            None
        },
        Err(_) => {
            log::error!("Failed to retrieve {what}: lookup thread panicked");
            None
        },
    }
}
