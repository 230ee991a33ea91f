//! Minecraft server status with protocol fallback.
//!
//! A [Target] is probed with the newest Java Server List Ping first, falling
//! back through the legacy pings and finally the Bedrock ping. Whatever
//! answers is normalized into one [StatusResult]; when nothing answers the
//! offline sentinel of the target's family is returned instead of an error.
//!
//! ```no_run
//! use mcstatus::{IconSet, NetClient, ProbeConf, StatusErr, StatusService, Target};
//!
//! fn main() -> Result<(), StatusErr> {
//!     let icons = IconSet::load("./icons")?;
//!     let service = StatusService::create(NetClient::default(), icons, ProbeConf::default());
//!     let target = Target::resolve("www.example.com", None, None, None)?;
//!     let status = service.get_status(&target);
//!
//!     println!("{}", status.result);
//!     Ok(())
//! }
//! ```

mod conf;
mod error;
mod icon;
mod probe;
mod server;
mod service;
mod share;
mod status;
mod varint;

pub use conf::{
    Family, ProbeConf, SocketConf, Target, BEDROCK_DEFAULT_PORT, JAVA_DEFAULT_PORT,
};
pub use error::StatusErr;
pub use icon::{Icon, IconSet, BEDROCK_ICON_FILE, DATA_URI_PREFIX, DEFAULT_ICON_FILE};
pub use probe::{chain_for, Attempt, ProbeOutcome, Prober, BEDROCK_CHAIN, JAVA_CHAIN};
pub use server::{
    BedrockServer, Chat, Component, LegacyBetaServer, LegacyServer, NettyServer, NetClient,
    Player, Players, ProtocolClient, Server, Version,
};
pub use service::{IconReply, Status, StatusService};
pub use status::{
    normalize_bedrock, normalize_legacy, normalize_modern, LegacyKind, PlayerSample,
    StatusResult, OFFLINE_NAME,
};
