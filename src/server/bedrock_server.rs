use serde::Serialize;
use std::{
    io::ErrorKind,
    net::{Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket},
    time::{Duration, Instant},
};

use crate::{
    share::{create_udp_socket, get_server_current_time},
    SocketConf, StatusErr,
};

const MAGIC_BYTES: &[u8] = &[
    0x00, 0xFF, 0xFF, 0x00, 0xFE, 0xFE, 0xFE, 0xFE, 0xFD, 0xFD, 0xFD, 0xFD, 0x12, 0x34, 0x56, 0x78,
];
const UNCONNECTED_PING: u8 = 0x01;
const UNCONNECTED_PONG: u8 = 0x1C;
const CLIENT_GUID: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x6D, 0x63, 0x73, 0x74];
/// Packet id, time, server GUID, magic and string length.
const PONG_HEADER_LEN: usize = 1 + 8 + 8 + 16 + 2;

/// Bedrock server info type.
///
/// For the meaning of `server_name` and the first `extra` field refer to the following examples and images:
///
/// ```text
/// server_name = "Dedicated Server"
/// extra[0] = "Bedrock level"
/// ```
/// Result:
///
/// <img src="https://wiki.vg/images/b/bb/Server_ID_String_Example.png" alt="Server ID String Example.png" />
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BedrockServer {
    /// MCPE, or MCEE for Education Edition.
    pub edition: String,
    /// MOTD line 1 for upstream display.
    pub server_name: String,
    /// Protocol version.
    pub protocol_version: i32,
    /// Version name.
    pub version_name: String,
    /// Online players.
    pub online_players: i32,
    /// Max players.
    pub max_players: i32,
    /// Server unique id.
    pub server_id: String,
    /// Every field after the server id, in order: MOTD line 2, game mode,
    /// game mode id, IPv4 port, IPv6 port. Servers may send fewer or more.
    pub extra: Vec<String>,
}

impl std::fmt::Display for BedrockServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

/// Ping a Bedrock server, re-sending the ping every `min_wait` until it answers
/// or `timeout` has passed.
pub fn get_bedrock_server_status<A: ToSocketAddrs>(
    addr: A,
    socket_conf: &SocketConf,
    timeout: Duration,
    min_wait: Duration,
) -> Result<BedrockServer, StatusErr> {
    let server_addr = addr
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| StatusErr::DataErr("Address resolved to nothing".into()))?;
    let socket = match server_addr {
        SocketAddr::V4(_) => create_udp_socket(socket_conf)?,
        SocketAddr::V6(_) => UdpSocket::bind((Ipv6Addr::UNSPECIFIED, socket_conf.rep_udp_port))?,
    };

    socket.connect(server_addr)?;
    socket.set_write_timeout(Some(timeout))?;

    let packet = build_ping_packet()?;
    let started = Instant::now();
    let mut bufs = [0u8; 1500];

    loop {
        let remaining = timeout.saturating_sub(started.elapsed());

        if remaining.is_zero() {
            return Err(StatusErr::IoErr(std::io::Error::new(
                ErrorKind::TimedOut,
                format!("No bedrock pong from {} within {:?}", server_addr, timeout),
            )));
        }

        socket.send(&packet)?;
        socket.set_read_timeout(Some(min_wait.min(remaining).max(Duration::from_millis(1))))?;

        match socket.recv(&mut bufs) {
            Ok(len) => return process_pong(&bufs[..len]),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                continue
            }
            Err(err) => return Err(StatusErr::IoErr(err)),
        }
    }
}

fn build_ping_packet() -> Result<Vec<u8>, StatusErr> {
    let time = get_server_current_time()?;

    Ok([
        [UNCONNECTED_PING].as_slice(),
        time.to_be_bytes().as_slice(),
        MAGIC_BYTES,
        CLIENT_GUID.as_slice(),
    ]
    .concat())
}

/// Decode an unconnected pong datagram.
pub fn process_pong(bufs: &[u8]) -> Result<BedrockServer, StatusErr> {
    match bufs.first() {
        Some(&UNCONNECTED_PONG) => {}
        Some(&first_buf) => {
            return Err(StatusErr::DataErr(format!(
                "Packet response excepted start with: 0x1C, but got: 0x{:02X}",
                first_buf
            )));
        }
        None => return Err(StatusErr::DataErr("Empty pong packet".into())),
    }

    if bufs.len() < PONG_HEADER_LEN {
        return Err(StatusErr::DataErr(format!(
            "Pong packet too short: {} bytes",
            bufs.len()
        )));
    }

    // Skip time and server GUID(8 bytes each)
    if &bufs[17..33] != MAGIC_BYTES {
        return Err(StatusErr::DataErr("Pong packet magic mismatch".into()));
    }

    let server_info_len = u16::from_be_bytes([bufs[33], bufs[34]]) as usize;
    let server_info_buf = bufs
        .get(PONG_HEADER_LEN..PONG_HEADER_LEN + server_info_len)
        .ok_or_else(|| StatusErr::DataErr("Incomplete server info string".into()))?;

    process_server_info(&String::from_utf8_lossy(server_info_buf))
}

/// Split the `;` separated server id string.
pub fn process_server_info(server_info: &str) -> Result<BedrockServer, StatusErr> {
    let server_info_split = server_info
        .trim_end_matches(';')
        .split(';')
        .collect::<Vec<_>>();

    if server_info_split.len() < 6 {
        return Err(StatusErr::DataErr(format!(
            "Expected return at least 6 parts of server information, but {} were obtained.",
            server_info_split.len()
        )));
    }

    Ok(BedrockServer {
        edition: server_info_split[0].into(),
        server_name: server_info_split[1].into(),
        protocol_version: server_info_split[2].trim().parse()?,
        version_name: server_info_split[3].into(),
        online_players: server_info_split[4].trim().parse()?,
        max_players: server_info_split[5].trim().parse()?,
        server_id: server_info_split.get(6).copied().unwrap_or_default().into(),
        extra: server_info_split
            .iter()
            .skip(7)
            .map(|&x| x.to_string())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pong(server_info: &str) -> Vec<u8> {
        [
            [UNCONNECTED_PONG].as_slice(),
            [0u8; 16].as_slice(),
            MAGIC_BYTES,
            (server_info.len() as u16).to_be_bytes().as_slice(),
            server_info.as_bytes(),
        ]
        .concat()
    }

    #[test]
    fn parses_full_pong() {
        let server = process_pong(&pong(
            "MCPE;Dedicated Server;527;1.19.1;2;10;13253860892328930865;Bedrock level;Survival;1;19132;19133;",
        ))
        .unwrap();

        assert_eq!(server.edition, "MCPE");
        assert_eq!(server.server_name, "Dedicated Server");
        assert_eq!(server.protocol_version, 527);
        assert_eq!(server.version_name, "1.19.1");
        assert_eq!(server.online_players, 2);
        assert_eq!(server.max_players, 10);
        assert_eq!(server.server_id, "13253860892328930865");
        assert_eq!(
            server.extra,
            vec!["Bedrock level", "Survival", "1", "19132", "19133"]
        );
    }

    #[test]
    fn parses_short_server_info() {
        let server = process_server_info("MCPE;Lobby;390;1.14.60;0;20").unwrap();

        assert_eq!(server.server_id, "");
        assert!(server.extra.is_empty());
    }

    #[test]
    fn rejects_bad_pongs() {
        assert!(process_pong(&[]).is_err());
        assert!(process_pong(&[0x1D; 40]).is_err());
        assert!(process_pong(&pong("MCPE;Lobby;390")).is_err());

        let mut truncated = pong("MCPE;Lobby;390;1.14.60;0;20");
        truncated.truncate(40);
        assert!(process_pong(&truncated).is_err());
    }

    #[test]
    fn ping_packet_layout() {
        let packet = build_ping_packet().unwrap();

        assert_eq!(packet.len(), 33);
        assert_eq!(packet[0], UNCONNECTED_PING);
        assert_eq!(&packet[9..25], MAGIC_BYTES);
    }
}
