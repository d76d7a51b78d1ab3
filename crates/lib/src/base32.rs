//! Base32 (RFC 4648) secret encoding, without padding.
//!
//! Decoding is deliberately forgiving on text typed by a person: whitespace
//! is skipped and the digits `0`, `1` and `8` — which are excluded from the
//! alphabet precisely because they look like letters — are read back as the
//! letters they are usually mistaken for.

use rand::Rng;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// A character outside the base32 alphabet was encountered. The decode as a
/// whole fails; there is no partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid base32 character {0:?}")]
pub struct DecodeError(pub char);

/// Generates `ceil(bytes * 8 / 5)` base32 characters of fresh entropy.
///
/// No padding is emitted: 10 bytes of entropy come out as exactly 16
/// characters.
pub fn encode_random(bytes: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..(bytes * 8 + 4) / 5)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Decodes a base32 string into raw bytes.
///
/// Symbols are read MSB-first, 5 bits each; a byte is emitted whenever 8 bits
/// have accumulated, and trailing bits short of a full byte are discarded.
/// The first `=` ends the input. With `from_user_input`, whitespace and the
/// common `0`/`1`/`8` mistypes are tolerated; without it, the text must be
/// clean base32.
pub fn decode(text: &str, from_user_input: bool) -> Result<Vec<u8>, DecodeError> {
    let mut output = Vec::with_capacity(text.len() * 5 / 8);
    let mut buffer: u16 = 0;
    let mut bits = 0u32;

    for mut c in text.chars() {
        if from_user_input {
            match c {
                ' ' | '\t' | '\r' | '\n' => continue,
                '0' => c = 'O',
                '1' => c = 'L',
                '8' => c = 'B',
                _ => {}
            }
        }
        if c == '=' {
            break;
        }
        let value = digit_value(c).ok_or(DecodeError(c))?;
        buffer = (buffer << 5) | u16::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            output.push((buffer >> bits) as u8);
        }
    }
    Ok(output)
}

/// Maps one base32 symbol to its 5-bit value: `A-Z` (either case) to 0..=25,
/// `2-7` to 26..=31.
fn digit_value(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(c as u8 - b'A'),
        'a'..='z' => Some(c as u8 - b'a'),
        '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}
