use crate::{HTTP_TIMEOUT, PROBE_ADDR};
use publicip::{IpInfo, Mode, Provider, PublicIp};
use std::{
    fmt::{self, Display, Formatter},
    io,
    net::{IpAddr, SocketAddr},
    ops::Deref,
    time::Duration,
};

/// Everything needed to run both lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupConfig {
    pub provider: Provider,
    pub mode: Mode,
    /// Bound on the whole HTTP request, connect through body.
    pub timeout: Duration,
    pub probe: SocketAddr,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            mode: Mode::default(),
            timeout: HTTP_TIMEOUT,
            probe: PROBE_ADDR,
        }
    }
}

/// The merged outcome of one run. A lookup that failed leaves its field
/// empty (or `None`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupResult {
    pub public_ip: String,
    pub private_ip: String,
    /// Only present when the public lookup ran in [`Mode::Rich`] and succeeded.
    pub info: Option<IpInfo>,
}

impl LookupResult {
    pub fn new(public: Option<PublicIp>, private: Option<IpAddr>) -> Self {
        let private_ip = private.map(|ip| ip.to_string()).unwrap_or_default();
        match public {
            Some(PublicIp::Address(public_ip)) => Self {
                public_ip,
                private_ip,
                info: None,
            },
            Some(PublicIp::Info(info)) => Self {
                public_ip: info.ip.clone(),
                private_ip,
                info: Some(info),
            },
            None => Self {
                private_ip,
                ..Default::default()
            },
        }
    }
}

pub trait IoErrorContext<T> {
    fn with_probe(self, probe: SocketAddr) -> Result<T, NetworkError>;
}

impl<T> IoErrorContext<T> for Result<T, io::Error> {
    fn with_probe(self, probe: SocketAddr) -> Result<T, NetworkError> {
        self.map_err(|io_error| NetworkError { probe, io_error })
    }
}

/// The local socket couldn't be opened or routed toward the probe address.
#[derive(Debug)]
pub struct NetworkError {
    pub probe: SocketAddr,
    io_error: io::Error,
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "no route toward {} - {}", self.probe, self.io_error)
    }
}

impl Deref for NetworkError {
    type Target = io::Error;

    fn deref(&self) -> &Self::Target {
        &self.io_error
    }
}

impl std::error::Error for NetworkError {}
