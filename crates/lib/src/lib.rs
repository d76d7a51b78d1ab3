pub mod base32;
pub mod hmac;
pub mod hotp;

use unix_time::Instant;

pub use base32::DecodeError;

/// Raw secret length in bytes, required of every key accepted here and
/// produced by [`Authenticator::generate_secret`].
pub const KEY_BYTE_LENGTH: usize = 10;

/// Width of one time step, in seconds.
pub const TIMESTAMP_GRANULARITY: u64 = 30;

/// How many time steps on each side of the expected one a code is still
/// accepted for.
const WINDOW: i64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The key is not valid base32 or decodes to fewer than
    /// [`KEY_BYTE_LENGTH`] raw bytes. Carries the offending key text.
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),
    #[error("error when computing HMAC")]
    Hmac(#[from] ::hmac::digest::InvalidLength),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Server side of Google-Authenticator-style 2-step verification.
///
/// A shared secret is exchanged with the user once, via
/// [`Self::generate_secret`]; afterwards [`Self::check_code`] verifies the
/// codes their device shows. The only state an instance holds is its clock,
/// so it can be shared freely across threads.
pub struct Authenticator {
    now: Box<dyn Fn() -> Instant + Send + Sync>,
}

impl Authenticator {
    /// An authenticator reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(Instant::now))
    }

    /// An authenticator with a custom function to provide the "now" value.
    pub fn with_clock(now: Box<dyn Fn() -> Instant + Send + Sync>) -> Self {
        Self { now }
    }

    /// Generates an 80-bit random secret as 16 base32 characters.
    ///
    /// Show it to the user exactly once, at enrollment. With `pretty` the
    /// characters come in easier-to-type groups of 4, each followed by a
    /// space; whitespace is ignored when the key is read back.
    pub fn generate_secret(&self, pretty: bool) -> String {
        let key = base32::encode_random(KEY_BYTE_LENGTH);
        if !pretty {
            return key;
        }
        let mut chunked = String::with_capacity(key.len() + key.len() / 4);
        for chunk in key.as_bytes().chunks(4) {
            chunked.extend(chunk.iter().map(|&b| b as char));
            chunked.push(' ');
        }
        chunked
    }

    /// Generates the code for `key` at `timestamp` (Unix seconds), or at the
    /// current time when `timestamp` is `None`.
    ///
    /// Typically this runs on the user's device, not the server; it is
    /// useful for demos or when acting as a client.
    pub fn code(&self, key: &str, timestamp: Option<u64>) -> Result<u32> {
        let raw_key = self.raw_key(key)?;
        hotp::generate(&raw_key, self.challenge(timestamp))
    }

    /// Checks a user-provided code against `key`.
    ///
    /// Codes from the immediately preceding and following time steps are
    /// accepted too, which compensates for clock skew between the device and
    /// the server and for the time the user spends typing. A mismatch is an
    /// ordinary `Ok(false)`; only a malformed key is an error.
    pub fn check_code(&self, code: u32, key: &str, timestamp: Option<u64>) -> Result<bool> {
        let raw_key = self.raw_key(key)?;
        let challenge = self.challenge(timestamp);

        for delta in -WINDOW..=WINDOW {
            if let Some(counter) = challenge.checked_add_signed(delta) {
                if hotp::generate(&raw_key, counter)? == code {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Decodes and validates the secret before any cryptographic use.
    fn raw_key(&self, key: &str) -> Result<Vec<u8>> {
        let raw = base32::decode(key, true).map_err(|_| Error::InvalidSecretKey(key.to_owned()))?;
        if raw.len() < KEY_BYTE_LENGTH {
            return Err(Error::InvalidSecretKey(key.to_owned()));
        }
        Ok(raw)
    }

    fn challenge(&self, timestamp: Option<u64>) -> u64 {
        let seconds =
            timestamp.unwrap_or_else(|| ((self.now)() - Instant::at(0, 0)).as_secs());
        seconds / TIMESTAMP_GRANULARITY
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new()
    }
}
