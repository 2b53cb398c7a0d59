//! Big-endian primitives for the group binary format.
//!
//! Strings are written as a `u16` byte length followed by modified UTF-8
//! (the `DataOutputStream.writeUTF` encoding: NUL as `C0 80`, characters
//! outside the BMP as two 3-byte surrogates), integers as 4-byte big-endian
//! two's complement.

use std::io::{self, Read, Write};

/// Longest string the `u16` length prefix can describe.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

pub fn write_i32<W: Write + ?Sized>(writer: &mut W, value: i32) -> io::Result<()> {
    writer.write_all(&value.to_be_bytes())
}

pub fn read_i32<R: Read + ?Sized>(reader: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

pub fn write_u16<W: Write + ?Sized>(writer: &mut W, value: u16) -> io::Result<()> {
    writer.write_all(&value.to_be_bytes())
}

pub fn read_u16<R: Read + ?Sized>(reader: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

pub fn write_u8<W: Write + ?Sized>(writer: &mut W, value: u8) -> io::Result<()> {
    writer.write_all(&[value])
}

pub fn read_u8<R: Read + ?Sized>(reader: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Encode `value` as modified UTF-8.
pub fn encode_modified_utf8(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for unit in value.encode_utf16() {
        match unit {
            0x0001..=0x007f => out.push(unit as u8),
            0x0000 | 0x0080..=0x07ff => {
                out.push(0xc0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
            _ => {
                out.push(0xe0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3f) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
        }
    }
    out
}

/// Decode modified UTF-8. Surrogate pairs are joined; unpaired surrogates
/// and malformed sequences are `InvalidData`.
pub fn decode_modified_utf8(bytes: &[u8]) -> io::Result<String> {
    let invalid = |index: usize| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("malformed modified utf-8 at byte {}", index),
        )
    };
    let continuation = |index: usize| match bytes.get(index) {
        Some(&b) if b & 0xc0 == 0x80 => Ok(u16::from(b & 0x3f)),
        _ => Err(invalid(index)),
    };

    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b & 0x80 == 0 {
            units.push(u16::from(b));
            i += 1;
        } else if b & 0xe0 == 0xc0 {
            units.push(u16::from(b & 0x1f) << 6 | continuation(i + 1)?);
            i += 2;
        } else if b & 0xf0 == 0xe0 {
            units.push(u16::from(b & 0x0f) << 12 | continuation(i + 1)? << 6 | continuation(i + 2)?);
            i += 3;
        } else {
            return Err(invalid(i));
        }
    }

    String::from_utf16(&units).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write a length-prefixed string.
pub fn write_utf<W: Write + ?Sized>(writer: &mut W, value: &str) -> io::Result<()> {
    let bytes = encode_modified_utf8(value);
    if bytes.len() > MAX_STRING_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("string of {} bytes exceeds {} byte limit", bytes.len(), MAX_STRING_LEN),
        ));
    }
    write_u16(writer, bytes.len() as u16)?;
    writer.write_all(&bytes)
}

/// Read a length-prefixed string.
pub fn read_utf<R: Read + ?Sized>(reader: &mut R) -> io::Result<String> {
    let len = read_u16(reader)? as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    decode_modified_utf8(&buf)
}

/// Write a collection size as a signed 4-byte count.
pub fn write_count<W: Write + ?Sized>(writer: &mut W, count: usize) -> io::Result<()> {
    let value = i32::try_from(count).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("count {} does not fit in i32", count))
    })?;
    write_i32(writer, value)
}

/// Read a signed 4-byte count, rejecting negative values.
pub fn read_count<R: Read + ?Sized>(reader: &mut R) -> io::Result<usize> {
    let value = read_i32(reader)?;
    usize::try_from(value).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidData, format!("negative count: {}", value))
    })
}
