use super::{process_legacy_server_str, LegacyServer};
use crate::{
    share::{create_tcp_socket, read_kick_packet, str_to_utf16_bufs},
    StatusErr, Target,
};
use std::{io::Write, time::Duration};

/// Protocol version announced in the ping host plugin message.
const PING_PROTOCOL_VERSION: u8 = 0x4A;

/// The alias of [LegacyServer] is identical in content.
pub type NettyServer = LegacyServer;

/// Server [1.6](https://wiki.vg/Server_List_Ping#1.6)
pub fn get_netty_server_status(
    target: &Target,
    timeout: Duration,
) -> Result<NettyServer, StatusErr> {
    let mut socket = create_tcp_socket(target, timeout)?;

    socket.write_all(&build_ping_host_packet(target))?;
    socket.flush()?;

    process_legacy_server_str(&read_kick_packet(&mut socket)?)
}

fn build_ping_host_packet(target: &Target) -> Vec<u8> {
    let channel = "MC|PingHost";
    let host_bufs = str_to_utf16_bufs(&target.host);
    let mut packet = vec![0xFE, 0x01, 0xFA];

    packet.extend_from_slice(&(channel.encode_utf16().count() as u16).to_be_bytes());
    packet.extend(str_to_utf16_bufs(channel));
    // Rest of the data: protocol byte, host length, host, port.
    packet.extend_from_slice(&((7 + host_bufs.len()) as u16).to_be_bytes());
    packet.push(PING_PROTOCOL_VERSION);
    packet.extend_from_slice(&((host_bufs.len() / 2) as u16).to_be_bytes());
    packet.extend(host_bufs);
    packet.extend_from_slice(&(target.port as i32).to_be_bytes());

    packet
}
