use crate::StatusErr;
use serde::Serialize;
use std::{
    net::{Ipv4Addr, SocketAddr, ToSocketAddrs},
    time::Duration,
};

/// Default port of Java Edition servers.
pub const JAVA_DEFAULT_PORT: u16 = 25565;
/// Default port of Bedrock Edition servers.
pub const BEDROCK_DEFAULT_PORT: u16 = 19132;

/// Game edition whose protocol stack is spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Java,
    Bedrock,
}

impl Family {
    /// Port used when the caller gives none.
    pub fn default_port(self) -> u16 {
        match self {
            Family::Java => JAVA_DEFAULT_PORT,
            Family::Bedrock => BEDROCK_DEFAULT_PORT,
        }
    }
}

impl Default for Family {
    fn default() -> Self {
        Family::Java
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Family::Java => write!(f, "java"),
            Family::Bedrock => write!(f, "bedrock"),
        }
    }
}

/// The server a single status query is aimed at.
///
/// By default, the port number for Java Edition is 25565,
/// and for Bedrock Edition it is 19132.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Server IP address or a domain name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Port of the query service, same as `port` unless given.
    ///
    /// Only parsed and carried for callers; no status attempt reads it.
    pub query_port: u16,
    /// Which edition the caller expects to answer.
    pub family: Family,
}

impl ToSocketAddrs for Target {
    type Iter = std::vec::IntoIter<SocketAddr>;

    fn to_socket_addrs(&self) -> std::io::Result<Self::Iter> {
        (&*self.host, self.port).to_socket_addrs()
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", host_port(&self.host, self.port))
    }
}

/// Render `host:port`, bracketing IPv6 literals.
pub fn host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

impl Target {
    /// Create a target using the default port of the given family.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mcstatus::{Family, Target};
    /// #
    /// let target = Target::create("www.example.com", Family::Java);
    /// #
    /// # assert_eq!(target.host, "www.example.com");
    /// # assert_eq!(target.port, 25565);
    /// # assert_eq!(target.query_port, 25565);
    /// # let target = Target::create("www.example.com", Family::Bedrock);
    /// # assert_eq!(target.port, 19132);
    /// ```
    pub fn create(host: &str, family: Family) -> Self {
        Self::create_with_port(host, family.default_port(), family)
    }

    /// Create a target using the specified port.
    ///
    /// Port 0 is not a valid server port and is replaced by the family default.
    ///
    /// # Example
    ///
    /// ```
    /// # use mcstatus::{Family, Target};
    /// #
    /// let target = Target::create_with_port("www.example.com", 25566, Family::Java);
    /// #
    /// # assert_eq!(target.port, 25566);
    /// # assert_eq!(target.to_string(), "www.example.com:25566");
    /// ```
    pub fn create_with_port(host: &str, port: u16, family: Family) -> Self {
        let port = if port == 0 { family.default_port() } else { port };

        Self {
            host: host.trim().into(),
            port,
            query_port: port,
            family,
        }
    }

    /// Resolve a target from raw request parameters.
    ///
    /// `address` may embed a port (`host:port`), which then wins over `port`.
    /// A missing or unparsable port falls back to the default port of the family
    /// selected by `is_bedrock`, and `query_port` falls back to the resolved port.
    ///
    /// # Example
    ///
    /// ```
    /// # use mcstatus::{Family, Target, StatusErr};
    /// #
    /// # fn main() -> Result<(), StatusErr> {
    ///     let target = Target::resolve("www.example.com:25570", Some("25566"), None, None)?;
    /// #
    /// #   assert_eq!(target.host, "www.example.com");
    /// #   assert_eq!(target.port, 25570);
    /// #   assert_eq!(target.family, Family::Java);
    /// #
    /// #   let target = Target::resolve("www.example.com", None, Some("true"), None)?;
    /// #   assert_eq!(target.port, 19132);
    /// #   assert_eq!(target.family, Family::Bedrock);
    /// #
    /// #   let target = Target::resolve("www.example.com", Some("abc"), Some("nope"), Some("25575"))?;
    /// #   assert_eq!(target.port, 25565);
    /// #   assert_eq!(target.query_port, 25575);
    /// #
    /// #   assert!(Target::resolve(" ", None, None, None).is_err());
    /// #   Ok(())
    /// # }
    /// ```
    pub fn resolve(
        address: &str,
        port: Option<&str>,
        is_bedrock: Option<&str>,
        query_port: Option<&str>,
    ) -> Result<Self, StatusErr> {
        let family = match is_bedrock.and_then(parse_bool) {
            Some(true) => Family::Bedrock,
            Some(false) | None => Family::Java,
        };
        let (host, embedded_port) = split_address(address.trim());

        if host.is_empty() {
            return Err(StatusErr::DataErr(format!(
                "Invalid server address: {:?}",
                address
            )));
        }

        let port = embedded_port
            .or(port)
            .and_then(parse_port)
            .unwrap_or_else(|| family.default_port());

        Ok(Self {
            host: host.into(),
            port,
            query_port: query_port.and_then(parse_port).unwrap_or(port),
            family,
        })
    }
}

/// Split `host[:port]`, also accepting `[v6]:port` and bare IPv6 literals.
fn split_address(address: &str) -> (&str, Option<&str>) {
    if let Some(rest) = address.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((host, tail)) => (host, tail.strip_prefix(':')),
            None => (address, None),
        };
    }

    match address.split_once(':') {
        // More than one colon is an IPv6 literal without a port.
        Some((_, tail)) if tail.contains(':') => (address, None),
        Some((host, port)) => (host, Some(port)),
        None => (address, None),
    }
}

fn parse_port(port: &str) -> Option<u16> {
    match port.trim().parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Local socket parameters, owned by [NetClient](crate::NetClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketConf {
    /// Specify the address for creating a UDP socket.
    /// The default value is [Ipv4Addr::UNSPECIFIED].
    pub rep_udp_ipv4: Ipv4Addr,
    /// Specify the port for creating a UDP socket.
    /// The default value is 0, letting the system pick one.
    pub rep_udp_port: u16,
}

impl Default for SocketConf {
    fn default() -> Self {
        Self {
            rep_udp_ipv4: Ipv4Addr::UNSPECIFIED,
            rep_udp_port: 0,
        }
    }
}

/// Timing and fallback parameters of a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConf {
    /// Connect/read/write ceiling of every single attempt. Default 5 seconds.
    pub timeout: Duration,
    /// Interval between Bedrock ping datagrams while waiting for a reply.
    /// Default 150 milliseconds.
    pub bedrock_min_wait: Duration,
    /// Port tried by the last Bedrock fallback of a Java probe.
    pub bedrock_fallback_port: u16,
    /// Optional budget shared by all attempts of one probe.
    ///
    /// `None` bounds a probe only by the sum of its attempt timeouts.
    pub deadline: Option<Duration>,
}

impl Default for ProbeConf {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            bedrock_min_wait: Duration::from_millis(150),
            bedrock_fallback_port: BEDROCK_DEFAULT_PORT,
            deadline: None,
        }
    }
}
