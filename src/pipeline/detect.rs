//! Encoding detection: statistically infer the charset of a byte stream.
//!
//! The detector is fed in fixed-size chunks so arbitrarily large inputs
//! never need to be buffered twice, then finalised and asked for its best
//! guess. Two rules shape the contract:
//!
//! * A stream that never leaves ASCII (including the empty stream and
//!   binary zero padding) carries no statistical signal; the result is the
//!   fixed UTF-8 default. That default is a legitimate outcome, not an
//!   error; ASCII is a UTF-8 subset, so it is also the correct decode.
//! * Detection never fails. Read faults are logged and treated as
//!   end-of-stream; whatever was fed so far decides the guess.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::io::{ErrorKind, Read};
use tracing::{debug, warn};

/// Chunk size for feeding the statistical detector.
pub const DETECTION_CHUNK_SIZE: usize = 4096;

/// Encoding used whenever detection is inconclusive.
pub fn default_encoding() -> &'static Encoding {
    UTF_8
}

/// Detect the character encoding of a byte stream.
///
/// Reads the stream once, in [`DETECTION_CHUNK_SIZE`] chunks. Returns
/// [`default_encoding`] when the stream is empty, pure ASCII, or unreadable.
pub fn detect_encoding(mut reader: impl Read) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    let mut buf = [0u8; DETECTION_CHUNK_SIZE];
    let mut saw_non_ascii = false;

    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                let chunk = &buf[..n];
                saw_non_ascii |= chunk.iter().any(|&b| b >= 0x80);
                detector.feed(chunk, false);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("encoding detection read failed, using data so far: {e}");
                break;
            }
        }
    }
    detector.feed(&[], true);

    if !saw_non_ascii {
        debug!(
            "no statistical signal in input, defaulting to {}",
            default_encoding().name()
        );
        return default_encoding();
    }

    let guess = detector.guess(None, true);
    debug!("detected encoding: {}", guess.name());
    guess
}

/// [`detect_encoding`] over an in-memory buffer.
pub fn detect_bytes(bytes: &[u8]) -> &'static Encoding {
    detect_encoding(bytes)
}
