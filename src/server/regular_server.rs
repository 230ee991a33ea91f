use crate::{
    share::create_tcp_socket,
    varint::{encode_varint, read_varint},
    StatusErr, Target,
};
use serde::{Deserialize, Serialize};
use std::{
    io::{Read, Write},
    time::Duration,
};

/// Status replies larger than this are rejected before allocating.
const MAX_RESPONSE_LEN: i32 = 0x1F_FFFF;

/// Regular Server info type, as sent by 1.7+ servers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Server {
    /// Server version. Includes version name and protocol number.
    pub version: Version,
    /// Server Player info.
    #[serde(default)]
    pub players: Players,
    /// Server description, similar to MOTD.
    #[serde(default)]
    pub description: Chat,
    /// Server icon, a base64 PNG data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    /// Whether the server enables enforces secure chat, default is false.
    #[serde(alias = "enforcesSecureChat", rename = "enforcesSecureChat", default)]
    pub enforces_secure_chat: bool,
}

impl std::fmt::Display for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Version {
    pub name: String,
    pub protocol: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Players {
    pub max: i32,
    pub online: i32,
    pub sample: Vec<Player>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub id: String,
}

/// A chat component. Servers send either a bare string, an object or a list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Chat {
    Text(String),
    Component(Component),
    List(Vec<Chat>),
}

impl Default for Chat {
    fn default() -> Self {
        Chat::Text(String::new())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Component {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Chat>,
}

impl Chat {
    /// Flatten into display text: own text first, then every extra, depth first.
    ///
    /// Legacy `§` formatting codes inside the text are kept as they are.
    pub fn render(&self) -> String {
        let mut out = String::new();

        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Chat::Text(text) => out.push_str(text),
            Chat::Component(component) => {
                out.push_str(&component.text);
                component.extra.iter().for_each(|chat| chat.render_into(out));
            }
            Chat::List(list) => list.iter().for_each(|chat| chat.render_into(out)),
        }
    }
}

pub fn get_server_status(target: &Target, timeout: Duration) -> Result<Server, StatusErr> {
    let mut socket = create_tcp_socket(target, timeout)?;

    socket.write_all(&build_handshake_packet(target))?;
    socket.write_all(&build_status_request_packet())?;
    socket.flush()?;

    read_status_response(&mut socket)
}

/// Decode a status response packet: length, packet id, then a length-prefixed JSON string.
pub fn read_status_response<R: Read>(reader: &mut R) -> Result<Server, StatusErr> {
    let (_p_buf_len, _p_size) = read_varint(reader)?;
    let (_id_buf_len, id) = read_varint(reader)?;

    if id != 0x00 {
        return Err(StatusErr::DataErr(format!(
            "Status response packet id excepted: 0x00, but got: 0x{:02X}",
            id
        )));
    }

    let (_d_buf_len, d_size) = read_varint(reader)?;

    if !(0..=MAX_RESPONSE_LEN).contains(&d_size) {
        return Err(StatusErr::DataErr(format!(
            "Status response length out of range: {}",
            d_size
        )));
    }

    let mut data_buffer = vec![0u8; d_size as usize];

    reader.read_exact(&mut data_buffer)?;

    match std::str::from_utf8(&data_buffer) {
        Ok(str) => Ok(serde_json::from_str::<Server>(str)?),
        Err(err) => Err(StatusErr::DataErr(err.to_string())),
    }
}

/// Build handshake packet buffer.
fn build_handshake_packet(target: &Target) -> Vec<u8> {
    let mut packet = Vec::<u8>::new();
    let mut packet_data = Vec::<u8>::new();
    let mut server_addr_bytes = target.host.as_bytes().to_vec();

    // See protocol version [numbers](https://wiki.vg/Protocol_version_numbers).
    //
    // If the client is pinging to determine what version to use,
    // by convention -1 should be set.
    packet_data.append(&mut encode_varint(-1));
    // Server address
    //
    // UTF-8 string prefixed with its size in bytes as a VarInt.
    packet_data.append(&mut encode_varint(server_addr_bytes.len() as i32));
    packet_data.append(&mut server_addr_bytes);
    packet_data.extend_from_slice(&target.port.to_be_bytes());
    // Next state, should be 1 for status, but could also be 2 for login.
    packet_data.append(&mut encode_varint(1));

    // Build [packet](https://wiki.vg/Protocol#Packet_format)
    packet.append(&mut encode_varint(1 + packet_data.len() as i32));
    packet.append(&mut encode_varint(0x00));
    packet.append(&mut packet_data);

    packet
}

/// Build status request packet buffer.
fn build_status_request_packet() -> Vec<u8> {
    let mut packet = Vec::<u8>::new();

    packet.append(&mut encode_varint(1));
    packet.append(&mut encode_varint(0x00));

    packet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Family;
    use std::io::Cursor;

    fn frame(json: &str) -> Vec<u8> {
        let mut body = encode_varint(0x00);

        body.append(&mut encode_varint(json.len() as i32));
        body.extend_from_slice(json.as_bytes());

        let mut packet = encode_varint(body.len() as i32);
        packet.append(&mut body);
        packet
    }

    #[test]
    fn handshake_layout() {
        let target = Target::create_with_port("ab", 25565, Family::Java);
        let packet = build_handshake_packet(&target);

        assert_eq!(
            packet,
            vec![
                0x0C, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F, 0x02, b'a', b'b', 0x63, 0xDD, 0x01
            ]
        );
        assert_eq!(build_status_request_packet(), vec![0x01, 0x00]);
    }

    #[test]
    fn parses_component_description() {
        let json = r#"{
            "version": {"name": "Paper 1.20.4", "protocol": 765},
            "players": {"max": 20, "online": 2, "sample": [
                {"name": "Notch", "id": "069a79f4-44e9-4726-a5be-fca90e38aaf5"},
                {"name": "jeb_", "id": "853c80ef-3c37-49fd-aa49-938b674adae6"}
            ]},
            "description": {"text": "Hello ", "extra": [{"text": "world", "color": "red"}, "!"]},
            "favicon": "data:image/png;base64,AAAA"
        }"#;
        let server = read_status_response(&mut Cursor::new(frame(json))).unwrap();

        assert_eq!(server.version.name, "Paper 1.20.4");
        assert_eq!(server.players.sample.len(), 2);
        assert_eq!(server.players.sample[1].name, "jeb_");
        assert_eq!(server.description.render(), "Hello world!");
        assert_eq!(server.favicon.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn parses_plain_description_without_players() {
        let json = r#"{"version": {"name": "1.8.9", "protocol": 47}, "description": "§aA Minecraft Server"}"#;
        let server = read_status_response(&mut Cursor::new(frame(json))).unwrap();

        assert_eq!(server.description.render(), "§aA Minecraft Server");
        assert_eq!(server.players, Players::default());
        assert!(server.favicon.is_none());
    }

    #[test]
    fn rejects_wrong_packet_id() {
        let mut packet = frame("{}");
        packet[1] = 0x01;

        assert!(read_status_response(&mut Cursor::new(packet)).is_err());
    }
}
