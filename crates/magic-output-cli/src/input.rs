use anyhow::Result;
use magic_output_core::LineStream;
use std::io::Read;

use crate::render::Render;

const READ_CHUNK: usize = 8 * 1024;

/// Decodes the complete UTF-8 prefix of `pending`, leaving a split trailing
/// sequence for the next read. Each invalid sequence becomes one U+FFFD.
pub fn decode_available(pending: &mut Vec<u8>) -> String {
    let mut text = String::new();
    let mut consumed = 0;
    loop {
        match std::str::from_utf8(&pending[consumed..]) {
            Ok(valid) => {
                text.push_str(valid);
                consumed = pending.len();
                break;
            }
            Err(err) => {
                let valid_end = consumed + err.valid_up_to();
                text.push_str(&String::from_utf8_lossy(&pending[consumed..valid_end]));
                match err.error_len() {
                    Some(invalid) => {
                        text.push(char::REPLACEMENT_CHARACTER);
                        consumed = valid_end + invalid;
                    }
                    // Incomplete sequence at the end: wait for more bytes.
                    None => {
                        consumed = valid_end;
                        break;
                    }
                }
            }
        }
    }
    pending.drain(..consumed);
    text
}

/// Reads `reader` to the end, rendering each line as soon as it is complete.
pub fn pump<R: Read>(mut reader: R, mut stream: LineStream, out: &mut dyn Render) -> Result<usize> {
    let mut pending = Vec::new();
    let mut buf = [0u8; READ_CHUNK];
    let mut lines = 0;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        pending.extend_from_slice(&buf[..n]);
        for event in stream.update(&decode_available(&mut pending)) {
            out.render(&event)?;
            lines += 1;
        }
    }

    // Whatever is left is a truncated sequence at end of input.
    let rest = String::from_utf8_lossy(&pending).into_owned();
    let mut events = stream.update(&rest);
    events.extend(stream.finish());
    for event in events {
        out.render(&event)?;
        lines += 1;
    }
    Ok(lines)
}
