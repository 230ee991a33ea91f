use std::io::Read;

use crate::StatusErr;

const SEGMENT_BITS: u32 = 0x7F;
const CHECKER_BIT: u8 = 0x80;
const MAX_VARINT_LEN: usize = 5;

/// Encode the given number as a [VarInt](https://wiki.vg/Protocol#VarInt_and_VarLong).
pub fn encode_varint(num: i32) -> Vec<u8> {
    // Negative values always use the maximum number of bytes, which is
    // what encoding the two's complement as u32 produces.
    let mut num = num as u32;
    let mut result = Vec::<u8>::new();

    loop {
        if (num & (!SEGMENT_BITS)) == 0 {
            result.push(num as u8);

            return result;
        }

        result.push(((num & SEGMENT_BITS) | (!SEGMENT_BITS)) as u8);
        num >>= 7;
    }
}

/// Decode the given VarInt as a number
pub fn decode_varint(arr: &[u8]) -> Result<i32, StatusErr> {
    if arr.len() > MAX_VARINT_LEN {
        return Err(StatusErr::DataErr(format!(
            "VarInts are never longer than 5 bytes, but got {}",
            arr.len()
        )));
    }

    match arr.last() {
        Some(&n) => {
            if n & CHECKER_BIT != 0 {
                return Err(StatusErr::DataErr(format!(
                    "Invalid VarInt data: [{}]",
                    arr.iter()
                        .map(|&x| x.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                )));
            }

            let mut result = 0i32;

            for (i, &n) in arr.iter().enumerate() {
                result |= ((n as i32) & (SEGMENT_BITS as i32)) << (i * 7);
            }

            Ok(result)
        }
        None => Err(StatusErr::DataErr("VarInts is empty".into())),
    }
}

/// Read one VarInt from a stream, returning `(encoded_len, value)`.
pub fn read_varint<R: Read>(reader: &mut R) -> Result<(usize, i32), StatusErr> {
    let mut buffer = Vec::<u8>::new();
    let mut byte = [0u8; 1];

    loop {
        reader.read_exact(&mut byte)?;
        buffer.push(byte[0]);

        if byte[0] & CHECKER_BIT == 0 {
            break;
        }

        if buffer.len() >= MAX_VARINT_LEN {
            return Err(StatusErr::DataErr(
                "VarInt is longer than 5 bytes".into(),
            ));
        }
    }

    Ok((buffer.len(), decode_varint(&buffer)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn encodes_known_values() {
        assert_eq!(encode_varint(0), vec![0x00]);
        assert_eq!(encode_varint(127), vec![0x7F]);
        assert_eq!(encode_varint(128), vec![0x80, 0x01]);
        assert_eq!(encode_varint(25565), vec![0xDD, 0xC7, 0x01]);
        assert_eq!(encode_varint(-1), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn reads_from_stream() {
        let mut cursor = Cursor::new(vec![0xDD, 0xC7, 0x01, 0x05]);

        assert_eq!(read_varint(&mut cursor).unwrap(), (3, 25565));
        assert_eq!(read_varint(&mut cursor).unwrap(), (1, 5));
        assert!(read_varint(&mut cursor).is_err());
    }

    #[test]
    fn rejects_overlong() {
        let mut cursor = Cursor::new(vec![0xFF; 6]);

        assert!(read_varint(&mut cursor).is_err());
        assert!(decode_varint(&[0x80]).is_err());
    }
}
