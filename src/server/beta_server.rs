use super::LegacyServer;
use crate::{
    share::{create_tcp_socket, read_kick_packet},
    StatusErr, Target,
};
use std::{io::Write, time::Duration};

/// The alias of [LegacyServer], protocol and server version are always absent.
pub type LegacyBetaServer = LegacyServer;

/// Server [beta 1.8 to 1.3](https://wiki.vg/Server_List_Ping#Beta_1.8_to_1.3)
pub fn get_beta_legacy_server_status(
    target: &Target,
    timeout: Duration,
) -> Result<LegacyBetaServer, StatusErr> {
    let mut socket = create_tcp_socket(target, timeout)?;

    socket.write_all(&[0xFE])?;

    process_beta_legacy_server_str(&read_kick_packet(&mut socket)?)
}

/// Parse a `motd§online§max` reply.
pub fn process_beta_legacy_server_str(res_str: &str) -> Result<LegacyBetaServer, StatusErr> {
    // Counts are the last two fields, so a MOTD containing § stays intact.
    let mut fields = res_str.rsplitn(3, '§');

    match (fields.next(), fields.next(), fields.next()) {
        (Some(max_players), Some(online_players), Some(motd)) => Ok(LegacyBetaServer {
            protocol_version: None,
            server_version: None,
            motd: motd.into(),
            online_players: online_players.parse()?,
            max_players: max_players.parse()?,
        }),
        _ => Err(StatusErr::DataErr(format!(
            "Unexpected reply from server: {}",
            res_str
        ))),
    }
}
