//! Get your public IP address, and optionally what a lookup service knows
//! about it (country, city, network operator...), with a single HTTP GET.
//!
//! Which service is asked, and how its responses are shaped, is described by
//! a [`Provider`]. Nothing here retries: a request either succeeds within the
//! agent's timeout or the error is returned to the caller.

use serde::{Deserialize, Deserializer, Serialize};
use std::{io, time::Duration};
use thiserror::Error;
use ureq::{Agent, AgentBuilder};

mod provider;

pub use provider::{Provider, Schema};

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed with status code: {0}")]
    Status(u16),

    #[error("HTTP transport error: {0}")]
    Transport(Box<ureq::Transport>),

    #[error("failed to read response body: {0}")]
    Body(#[from] io::Error),

    #[error("malformed JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => Error::Status(code),
            ureq::Error::Transport(transport) => Error::Transport(Box::new(transport)),
        }
    }
}

/// What to ask the provider for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// The plain-text endpoint, body is the address.
    #[default]
    Plain,
    /// The JSON endpoint, keeping only the address.
    Structured,
    /// The JSON endpoint, keeping everything the provider reported.
    Rich,
}

/// Everything a provider told us about our public address.
///
/// Only `ip` is guaranteed to be present; the rest are left empty when the
/// provider doesn't report them and are skipped when serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpInfo {
    pub ip: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub country: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub city: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub region: String,
    #[serde(
        rename = "loc",
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub location: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub org: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub hostname: String,
}

/// Providers send `null` for fields they have nothing for; treat that like
/// the key being absent.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicIp {
    Address(String),
    Info(IpInfo),
}

impl PublicIp {
    pub fn address(&self) -> &str {
        match self {
            PublicIp::Address(ip) => ip,
            PublicIp::Info(info) => &info.ip,
        }
    }
}

pub struct Resolver {
    agent: Agent,
    provider: Provider,
}

impl Resolver {
    pub fn new(provider: Provider, timeout: Duration) -> Self {
        let agent = AgentBuilder::new().timeout(timeout).build();
        Self { agent, provider }
    }

    pub fn resolve(&self, mode: Mode) -> Result<PublicIp, Error> {
        match mode {
            Mode::Plain => {
                let body = self.get(&self.provider.plain_url())?;
                Ok(PublicIp::Address(body.trim().to_string()))
            },
            Mode::Structured => Ok(PublicIp::Address(self.info()?.ip)),
            Mode::Rich => Ok(PublicIp::Info(self.info()?)),
        }
    }

    fn info(&self) -> Result<IpInfo, Error> {
        let body = self.get(&self.provider.json_url())?;
        Ok(self.provider.schema().decode(&body)?)
    }

    fn get(&self, url: &str) -> Result<String, Error> {
        log::debug!("requesting {url}");
        let response = self.agent.get(url).call()?;

        // ureq only rejects 4xx and 5xx on its own.
        let status = response.status();
        log::debug!("{url} responded with {status}");
        if status != 200 {
            return Err(Error::Status(status));
        }

        Ok(response.into_string()?)
    }
}
