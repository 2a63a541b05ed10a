//! Room code generation.

use cardroom_protocol::RoomCode;
use rand::Rng;

/// The code alphabet. Uppercase letters minus I, L, and O — the glyphs
/// people misread over a voice call or a cramped phone screen. Digits are
/// excluded for the same reason (0/O, 1/I).
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ";

/// Codes are always this many characters.
pub const CODE_LENGTH: usize = 4;

/// Draws one random code. Uniqueness against live rooms is the caller's
/// job — the registry retries under its lock.
pub(crate) fn random_code() -> RoomCode {
    let mut rng = rand::rng();
    let code: String = (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    RoomCode(code)
}

/// Returns `true` if `code` has the shape of a room code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}
