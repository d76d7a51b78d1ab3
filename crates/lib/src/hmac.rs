//! Portable HMAC (RFC 2104) over any hash with a 64-byte block.
//!
//! Production code paths key their hashes through the `hmac` crate (see
//! [`crate::hotp`]); this construction is kept for hosts without a usable
//! library primitive and must stay byte-identical to it. The tests hold both
//! to the same SHA-1 vectors.

use sha1::digest::Digest;

/// Internal block size of the SHA-1/SHA-256 family.
const BLOCK_SIZE: usize = 64;

/// Computes `H((key ^ opad) || H((key ^ ipad) || data))`.
///
/// Keys longer than one block are hashed first, then zero-padded to the
/// block size, as RFC 2104 requires.
pub fn hmac<D: Digest>(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut block = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        let digest = D::digest(key);
        block[..digest.len()].copy_from_slice(&digest);
    } else {
        block[..key.len()].copy_from_slice(key);
    }

    let mut inner = D::new();
    inner.update(block.map(|b| b ^ 0x36));
    inner.update(data);
    let inner_hash = inner.finalize();

    let mut outer = D::new();
    outer.update(block.map(|b| b ^ 0x5c));
    outer.update(inner_hash);
    outer.finalize().to_vec()
}

#[cfg(test)]
mod test {
    use ::hmac::Mac;
    use sha1::Sha1;

    use super::hmac;
    use crate::base32;

    #[test]
    fn it_matches_the_sha1_vector() {
        let key = base32::decode("2SH3V3GDW7ZNMGYE", false).unwrap();
        let hash = hmac::<Sha1>(&key, b"test");
        assert_eq!(hex::encode(hash), "7021a23ea60aa4438472079a19254e2ce531afc6");
    }

    #[test]
    fn it_hashes_keys_longer_than_one_block() {
        // 12 repetitions decode to 120 raw bytes, well past the block size.
        let key = base32::decode(&"2SH3V3GDW7ZNMGYE".repeat(12), false).unwrap();
        assert!(key.len() > 64);
        let hash = hmac::<Sha1>(&key, b"test");
        assert_eq!(hex::encode(hash), "4be9feb6cf041e067145d93cd4bbea90a71cfc25");
    }

    #[test]
    fn it_agrees_with_the_library_primitive() {
        let key = b"12345678901234567890";
        let cases: [&[u8]; 3] = [b"", b"test", b"The quick brown fox jumps over the lazy dog"];
        for data in cases {
            let mut mac = ::hmac::Hmac::<Sha1>::new_from_slice(key).unwrap();
            mac.update(data);
            let expected = mac.finalize().into_bytes().to_vec();
            assert_eq!(hmac::<Sha1>(key, data), expected);
        }
    }
}
