use crate::{null_as_empty, IpInfo};
use serde::Deserialize;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// How a lookup service lays out its endpoints and its JSON response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schema {
    /// ipinfo.io: `/ip` for text, `/json` with geolocation keys.
    IpInfo,
    /// ifconfig.me: `/ip` for text, `/all.json` keyed by `ip_addr`.
    Ifconfig,
    /// ipify.org: text at the root, `?format=json` with only `ip`.
    Ipify,
}

impl Schema {
    pub const ALL: [Schema; 3] = [Schema::IpInfo, Schema::Ifconfig, Schema::Ipify];

    pub fn default_base_url(self) -> &'static str {
        match self {
            Schema::IpInfo => "https://ipinfo.io/",
            Schema::Ifconfig => "https://ifconfig.me/",
            Schema::Ipify => "https://api.ipify.org/",
        }
    }

    fn plain_path(self) -> &'static str {
        match self {
            Schema::IpInfo | Schema::Ifconfig => "ip",
            Schema::Ipify => "",
        }
    }

    fn json_path(self) -> &'static str {
        match self {
            Schema::IpInfo => "json",
            Schema::Ifconfig => "all.json",
            Schema::Ipify => "?format=json",
        }
    }

    /// Decode a JSON response body into an [`IpInfo`]. Keys the schema
    /// doesn't know about are ignored, but the IP key itself is required.
    pub fn decode(self, body: &str) -> Result<IpInfo, serde_json::Error> {
        match self {
            Schema::IpInfo => serde_json::from_str(body),
            Schema::Ifconfig => {
                #[derive(Deserialize)]
                struct AllJson {
                    ip_addr: String,
                    #[serde(default, deserialize_with = "null_as_empty")]
                    remote_host: String,
                }

                let all: AllJson = serde_json::from_str(body)?;
                Ok(IpInfo {
                    ip: all.ip_addr,
                    hostname: all.remote_host,
                    ..Default::default()
                })
            },
            Schema::Ipify => {
                #[derive(Deserialize)]
                struct Ipify {
                    ip: String,
                }

                let ipify: Ipify = serde_json::from_str(body)?;
                Ok(IpInfo {
                    ip: ipify.ip,
                    ..Default::default()
                })
            },
        }
    }
}

impl FromStr for Schema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ipinfo" => Ok(Schema::IpInfo),
            "ifconfig" => Ok(Schema::Ifconfig),
            "ipify" => Ok(Schema::Ipify),
            _ => Err(format!(
                "unknown provider '{s}' (expected one of: ipinfo, ifconfig, ipify)"
            )),
        }
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Schema::IpInfo => "ipinfo",
            Schema::Ifconfig => "ifconfig",
            Schema::Ipify => "ipify",
        })
    }
}

/// A public IP lookup service: where it lives, and which [`Schema`] it speaks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provider {
    base_url: String,
    schema: Schema,
}

impl Provider {
    pub fn new(schema: Schema) -> Self {
        Self {
            base_url: schema.default_base_url().to_string(),
            schema,
        }
    }

    /// Point the provider at a different host while keeping its schema.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn plain_url(&self) -> String {
        format!("{}{}", self.base_url, self.schema.plain_path())
    }

    pub fn json_url(&self) -> String {
        format!("{}{}", self.base_url, self.schema.json_path())
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::new(Schema::IpInfo)
    }
}

impl From<Schema> for Provider {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let ipinfo = Provider::new(Schema::IpInfo);
        assert_eq!(ipinfo.plain_url(), "https://ipinfo.io/ip");
        assert_eq!(ipinfo.json_url(), "https://ipinfo.io/json");

        let ifconfig = Provider::new(Schema::Ifconfig);
        assert_eq!(ifconfig.plain_url(), "https://ifconfig.me/ip");
        assert_eq!(ifconfig.json_url(), "https://ifconfig.me/all.json");

        let ipify = Provider::new(Schema::Ipify);
        assert_eq!(ipify.plain_url(), "https://api.ipify.org/");
        assert_eq!(ipify.json_url(), "https://api.ipify.org/?format=json");
    }

    #[test]
    fn test_with_base_url_appends_slash() {
        let provider = Provider::new(Schema::IpInfo).with_base_url("http://127.0.0.1:8080");
        assert_eq!(provider.base_url(), "http://127.0.0.1:8080/");
        assert_eq!(provider.plain_url(), "http://127.0.0.1:8080/ip");
        assert_eq!(provider.schema(), Schema::IpInfo);
    }

    #[test]
    fn test_schema_names_round_trip() {
        for schema in Schema::ALL {
            assert_eq!(schema.to_string().parse::<Schema>(), Ok(schema));
        }
        assert_eq!("IPINFO".parse::<Schema>(), Ok(Schema::IpInfo));
        assert!("ipapi".parse::<Schema>().is_err());
    }

    #[test]
    fn test_decode_ifconfig_maps_remote_host() {
        let body = r#"{
            "ip_addr": "198.51.100.23",
            "remote_host": "host23.example.net",
            "user_agent": "ureq/2",
            "port": 51234,
            "method": "GET"
        }"#;
        let info = Schema::Ifconfig.decode(body).unwrap();
        assert_eq!(info.ip, "198.51.100.23");
        assert_eq!(info.hostname, "host23.example.net");
        assert!(info.country.is_empty());
    }

    #[test]
    fn test_decode_null_fields_as_empty() {
        let info = Schema::IpInfo
            .decode(r#"{"ip":"1.2.3.4","hostname":null,"city":"Nagoya","org":null}"#)
            .unwrap();
        assert_eq!(
            info,
            IpInfo {
                ip: "1.2.3.4".into(),
                city: "Nagoya".into(),
                ..Default::default()
            }
        );

        let info = Schema::Ifconfig
            .decode(r#"{"ip_addr":"198.51.100.23","remote_host":null}"#)
            .unwrap();
        assert_eq!(info.ip, "198.51.100.23");
        assert!(info.hostname.is_empty());
    }

    #[test]
    fn test_decode_null_ip_fails() {
        assert!(Schema::IpInfo.decode(r#"{"ip":null}"#).is_err());
    }

    #[test]
    fn test_decode_requires_ip_key() {
        assert!(Schema::IpInfo.decode(r#"{"city": "Tokyo"}"#).is_err());
        assert!(Schema::Ifconfig.decode(r#"{"ip": "198.51.100.23"}"#).is_err());
        assert!(Schema::Ipify.decode(r#"{"ip_addr": "198.51.100.23"}"#).is_err());
    }

    #[test]
    fn test_decode_ipify() {
        let info = Schema::Ipify.decode(r#"{"ip":"2001:db8::1"}"#).unwrap();
        assert_eq!(
            info,
            IpInfo {
                ip: "2001:db8::1".into(),
                ..Default::default()
            }
        );
    }
}
