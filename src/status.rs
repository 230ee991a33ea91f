use crate::{
    conf::host_port, BedrockServer, Family, Icon, IconSet, LegacyServer, Server, Target,
};
use serde::Serialize;

/// Name carried by every offline result.
pub const OFFLINE_NAME: &str = "Server Offline";

/// One player from the modern ping's player sample.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerSample {
    pub name: String,
}

/// Protocol agnostic server status.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusResult {
    /// Display name / MOTD, may contain `§` formatting codes.
    pub name: String,
    /// Map or game mode, empty unless the protocol supplies one.
    pub map: String,
    #[serde(rename = "maxplayers")]
    pub max_players: u32,
    #[serde(rename = "onlineplayers")]
    pub online_players: u32,
    pub players: Vec<PlayerSample>,
    /// `host:port` that answered.
    pub connect: String,
    pub version: String,
    /// PNG data URI, never empty.
    pub favicon: String,
    pub server_type: Family,
}

impl std::fmt::Display for StatusResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

impl StatusResult {
    /// The fixed result returned when nothing answered.
    pub fn offline(family: Family, icons: &IconSet) -> Self {
        Self {
            name: OFFLINE_NAME.into(),
            map: String::new(),
            max_players: 0,
            online_players: 0,
            players: Vec::new(),
            connect: String::new(),
            version: String::new(),
            favicon: icons.default_uri(family).into(),
            server_type: family,
        }
    }
}

/// Which legacy ping answered. Each has a fixed version label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyKind {
    /// 1.6 ping.
    Netty,
    /// 1.4 to 1.5 ping.
    Legacy,
    /// Beta 1.8 to 1.3 ping.
    Beta,
}

impl LegacyKind {
    pub fn version_label(self) -> &'static str {
        match self {
            LegacyKind::Netty => "1.6",
            LegacyKind::Legacy => "1.4",
            LegacyKind::Beta => "1.5",
        }
    }
}

fn count(n: i32) -> u32 {
    n.max(0) as u32
}

/// Normalize a modern reply. Returns the result and the icon to serve with it.
///
/// A missing or undecodable favicon is replaced by the generic default icon.
pub fn normalize_modern(server: &Server, target: &Target, icons: &IconSet) -> (StatusResult, Icon) {
    let icon = match server.favicon.as_deref().map(Icon::from_data_uri) {
        Some(Ok(icon)) => Some(icon),
        Some(Err(err)) => {
            log::debug!("{}: unusable favicon: {}", target, err);
            None
        }
        None => None,
    };
    let (favicon, icon) = match icon {
        Some(icon) => (icon.to_data_uri(), icon),
        None => (
            icons.default_uri(Family::Java).into(),
            icons.default_icon(Family::Java).clone(),
        ),
    };

    let result = StatusResult {
        name: server.description.render(),
        map: String::new(),
        max_players: count(server.players.max),
        online_players: count(server.players.online),
        players: server
            .players
            .sample
            .iter()
            .map(|player| PlayerSample {
                name: player.name.clone(),
            })
            .collect(),
        connect: target.to_string(),
        version: server.version.name.clone(),
        favicon,
        server_type: Family::Java,
    };

    (result, icon)
}

/// Normalize any of the three pre-Netty replies.
pub fn normalize_legacy(
    server: &LegacyServer,
    kind: LegacyKind,
    target: &Target,
    icons: &IconSet,
) -> (StatusResult, Icon) {
    let result = StatusResult {
        name: server.motd.clone(),
        map: String::new(),
        max_players: count(server.max_players),
        online_players: count(server.online_players),
        players: Vec::new(),
        connect: target.to_string(),
        version: kind.version_label().into(),
        favicon: icons.default_uri(Family::Java).into(),
        server_type: Family::Java,
    };

    (result, icons.default_icon(Family::Java).clone())
}

/// Normalize a Bedrock pong. `host`/`port` are what was actually queried.
pub fn normalize_bedrock(
    server: &BedrockServer,
    host: &str,
    port: u16,
    icons: &IconSet,
) -> (StatusResult, Icon) {
    let mut name = server.server_name.clone();

    if let Some(line_2) = server.extra.first().filter(|x| !x.is_empty()) {
        name.push(' ');
        name.push_str(line_2);
    }

    let result = StatusResult {
        name,
        map: server.extra.get(1).cloned().unwrap_or_default(),
        max_players: count(server.max_players),
        online_players: count(server.online_players),
        players: Vec::new(),
        connect: host_port(host, port),
        version: server.version_name.clone(),
        favicon: icons.default_uri(Family::Bedrock).into(),
        server_type: Family::Bedrock,
    };

    (result, icons.default_icon(Family::Bedrock).clone())
}
