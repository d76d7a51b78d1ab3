//! RFC 4226 code generation.

use ::hmac::Mac;
use sha1::Sha1;

use crate::Result;

type Sha1Hmac = ::hmac::Hmac<Sha1>;

/// Codes are six decimal digits.
const DIGITS: u32 = 6;

/// Computes the code for one `(key, counter)` pair.
///
/// Purely a function of its arguments: repeated calls return the same code,
/// and no counter state is kept here. TOTP is the special case where the
/// caller derives `counter` from the clock.
pub fn generate(key: &[u8], counter: u64) -> Result<u32> {
    // Step 1: Generate an HMAC-SHA-1 value
    let hs = hmac(key, counter)?;

    // Step 2: Generate a 4-byte string (Dynamic Truncation)
    let sbits = dt(&hs);

    // Step 3: Compute an HOTP value
    let snum = u32::from_be_bytes(sbits);

    Ok(snum % 10_u32.pow(DIGITS))
}

fn hmac(key: &[u8], counter: u64) -> Result<[u8; 20]> {
    let mut mac = Sha1Hmac::new_from_slice(key)?;
    mac.update(&counter.to_be_bytes());
    Ok(mac.finalize().into_bytes().into())
}

fn dt(hs: &[u8; 20]) -> [u8; 4] {
    let offset = dt_offset(hs);
    let mut substr = dt_substr(hs, offset);
    substr[0] &= 0b0111_1111;
    substr
}

fn dt_substr(hs: &[u8; 20], offset: u8) -> [u8; 4] {
    let substr = &hs[offset as usize..(offset + 4) as usize];
    substr.try_into().unwrap()
}

fn dt_offset(hs: &[u8; 20]) -> u8 {
    hs[19] & 0b1111
}
