use crate::{
    share::{create_tcp_socket, read_kick_packet},
    StatusErr, Target,
};
use serde::Serialize;
use std::{io::Write, time::Duration};

/// Reply of a pre-Netty server, shared by the 1.6, 1.4 and beta pings.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LegacyServer {
    /// Protocol version, absent in beta replies.
    pub protocol_version: Option<i32>,
    /// Server version, absent in beta replies.
    pub server_version: Option<String>,
    /// Message of the day.
    pub motd: String,
    /// Online players.
    pub online_players: i32,
    /// Max players.
    pub max_players: i32,
}

impl std::fmt::Display for LegacyServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

/// Server [1.4 to 1.5](https://wiki.vg/Server_List_Ping#1.4_to_1.5)
pub fn get_legacy_server_status(
    target: &Target,
    timeout: Duration,
) -> Result<LegacyServer, StatusErr> {
    let mut socket = create_tcp_socket(target, timeout)?;

    socket.write_all(&[0xFE, 0x01])?;

    process_legacy_server_str(&read_kick_packet(&mut socket)?)
}

/// Parse a `§1` style reply, used by 1.4+ servers.
pub fn process_legacy_server_str(res_str: &str) -> Result<LegacyServer, StatusErr> {
    // The packet begins with two characters: §1, followed by a NUL.
    let body = match res_str.strip_prefix("§1\0") {
        Some(body) => body,
        None => {
            return Err(StatusErr::DataErr(format!(
                "Server response info must start with: §1, but got: {}",
                res_str.chars().take(2).collect::<String>()
            )));
        }
    };
    let res_split_with_delimiter = body.split('\0').collect::<Vec<_>>();

    // 1.Protocol version (e.g. 47)
    // 2.Minecraft server version (e.g. 1.4.2)
    // 3.Message of the day (e.g. A Minecraft Server)
    // 4.Current player count
    // 5.Max players
    if res_split_with_delimiter.len() != 5 {
        return Err(StatusErr::DataErr(format!(
            "Server response info len is invalid,it must be 5, but got {}",
            res_split_with_delimiter.len()
        )));
    }

    Ok(LegacyServer {
        protocol_version: Some(res_split_with_delimiter[0].parse()?),
        server_version: Some(res_split_with_delimiter[1].into()),
        motd: res_split_with_delimiter[2].into(),
        online_players: res_split_with_delimiter[3].parse()?,
        max_players: res_split_with_delimiter[4].parse()?,
    })
}
