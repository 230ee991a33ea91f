use crate::{SocketConf, StatusErr};
use std::{
    io::Read,
    net::{TcpStream, ToSocketAddrs, UdpSocket},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

pub fn get_server_current_time() -> Result<u64, StatusErr> {
    let tm = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();

    // Time should not exceed `u64::MAX`
    u64::try_from(tm).map_err(|_| {
        StatusErr::InternalErr(format!(
            "Failed to obtain current time. It should not exceed u64::MAX, but got: {}",
            tm
        ))
    })
}

/// Connect to the first reachable resolved address within `timeout`.
pub fn create_tcp_socket<A: ToSocketAddrs>(
    addr: A,
    timeout: Duration,
) -> Result<TcpStream, StatusErr> {
    let mut last_err = None;

    for socket_addr in addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&socket_addr, timeout) {
            Ok(socket) => {
                socket.set_read_timeout(Some(timeout))?;
                socket.set_write_timeout(Some(timeout))?;

                return Ok(socket);
            }
            Err(err) => last_err = Some(err),
        }
    }

    Err(match last_err {
        Some(err) => StatusErr::IoErr(err),
        None => StatusErr::DataErr("Address resolved to nothing".into()),
    })
}

pub fn create_udp_socket(socket_conf: &SocketConf) -> Result<UdpSocket, StatusErr> {
    Ok(UdpSocket::bind((
        socket_conf.rep_udp_ipv4,
        socket_conf.rep_udp_port,
    ))?)
}

pub fn bufs_to_utf16_str(bufs: &[u8]) -> Result<String, StatusErr> {
    if bufs.len() % 2 != 0 {
        return Err(StatusErr::DataErr(format!(
            "Conversion from UTF-16 to string failed. Expected length to be even, but got: {}",
            bufs.len()
        )));
    }

    Ok(String::from_utf16(
        bufs.chunks(2)
            .map(|x| u16::from_be_bytes([x[0], x[1]]))
            .collect::<Vec<_>>()
            .as_slice(),
    )?)
}

pub fn str_to_utf16_bufs(str: &str) -> Vec<u8> {
    str.encode_utf16().flat_map(|x| x.to_be_bytes()).collect()
}

/// Read the kick packet every pre-Netty server answers a ping with.
///
/// Layout: `0xFF`, a u16 char count, then that many UTF-16BE code units.
pub fn read_kick_packet<R: Read>(reader: &mut R) -> Result<String, StatusErr> {
    let mut header = [0u8; 3];

    reader.read_exact(&mut header)?;

    if header[0] != 0xFF {
        return Err(StatusErr::DataErr(format!(
            "Server response data is invalid, it should start with: 0xFF, but got: 0x{:02X}",
            header[0]
        )));
    }

    let char_len = u16::from_be_bytes([header[1], header[2]]) as usize;
    let mut bufs = vec![0u8; char_len * 2];

    reader.read_exact(&mut bufs)?;
    bufs_to_utf16_str(&bufs)
}
