mod bedrock_server;
mod beta_server;
mod legacy_server;
mod netty_server;
mod regular_server;

pub use bedrock_server::*;
pub use beta_server::*;
pub use legacy_server::*;
pub use netty_server::*;
pub use regular_server::*;

use crate::{conf::host_port, SocketConf, StatusErr, Target};
use std::time::Duration;

/// One status client per supported protocol variant.
///
/// [NetClient] talks to real servers; tests substitute their own.
pub trait ProtocolClient {
    /// 1.7+ status handshake.
    fn ping_modern(&self, target: &Target, timeout: Duration) -> Result<Server, StatusErr>;

    /// 1.6 ping with the `MC|PingHost` plugin message.
    fn ping_netty(&self, target: &Target, timeout: Duration) -> Result<NettyServer, StatusErr>;

    /// 1.4 to 1.5 ping.
    fn ping_legacy(&self, target: &Target, timeout: Duration) -> Result<LegacyServer, StatusErr>;

    /// Beta 1.8 to 1.3 ping.
    fn ping_beta(&self, target: &Target, timeout: Duration)
        -> Result<LegacyBetaServer, StatusErr>;

    /// RakNet unconnected ping to `host:port`.
    fn query_bedrock(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
        min_wait: Duration,
    ) -> Result<BedrockServer, StatusErr>;
}

/// Network backed [ProtocolClient].
#[derive(Debug, Clone, Default)]
pub struct NetClient {
    pub socket_conf: SocketConf,
}

impl NetClient {
    pub fn create(socket_conf: SocketConf) -> Self {
        Self { socket_conf }
    }
}

impl ProtocolClient for NetClient {
    fn ping_modern(&self, target: &Target, timeout: Duration) -> Result<Server, StatusErr> {
        get_server_status(target, timeout)
    }

    fn ping_netty(&self, target: &Target, timeout: Duration) -> Result<NettyServer, StatusErr> {
        get_netty_server_status(target, timeout)
    }

    fn ping_legacy(&self, target: &Target, timeout: Duration) -> Result<LegacyServer, StatusErr> {
        get_legacy_server_status(target, timeout)
    }

    fn ping_beta(
        &self,
        target: &Target,
        timeout: Duration,
    ) -> Result<LegacyBetaServer, StatusErr> {
        get_beta_legacy_server_status(target, timeout)
    }

    fn query_bedrock(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
        min_wait: Duration,
    ) -> Result<BedrockServer, StatusErr> {
        log::trace!("bedrock ping to {}", host_port(host, port));
        get_bedrock_server_status((host, port), &self.socket_conf, timeout, min_wait)
    }
}

impl<C: ProtocolClient + ?Sized> ProtocolClient for &C {
    fn ping_modern(&self, target: &Target, timeout: Duration) -> Result<Server, StatusErr> {
        (**self).ping_modern(target, timeout)
    }

    fn ping_netty(&self, target: &Target, timeout: Duration) -> Result<NettyServer, StatusErr> {
        (**self).ping_netty(target, timeout)
    }

    fn ping_legacy(&self, target: &Target, timeout: Duration) -> Result<LegacyServer, StatusErr> {
        (**self).ping_legacy(target, timeout)
    }

    fn ping_beta(
        &self,
        target: &Target,
        timeout: Duration,
    ) -> Result<LegacyBetaServer, StatusErr> {
        (**self).ping_beta(target, timeout)
    }

    fn query_bedrock(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
        min_wait: Duration,
    ) -> Result<BedrockServer, StatusErr> {
        (**self).query_bedrock(host, port, timeout, min_wait)
    }
}
