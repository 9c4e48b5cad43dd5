//! Snapshot id generation.

use rand::Rng;

use crate::clock;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 12;

/// Generate a globally unique snapshot id.
///
/// The id is the parse-time millisecond clock in base-36 plus a
/// random base-36 suffix, so ids sort roughly by creation time and
/// collide only if two snapshots in the same millisecond draw the
/// same 12-character suffix.
#[must_use]
pub fn generate_snapshot_id() -> String {
    let millis = clock::now_millis().max(0).unsigned_abs();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..RANDOM_LEN)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();
    format!("{}-{suffix}", to_base36(millis))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("alphabet is ASCII")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_unique_across_many_calls() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_snapshot_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_are_lowercase_base36_with_separator() {
        let id = generate_snapshot_id();
        let (stamp, suffix) = id.split_once('-').expect("separator present");
        assert!(!stamp.is_empty());
        assert_eq!(suffix.len(), RANDOM_LEN);
        assert!(
            id.chars()
                .all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(46_655), "zzz");
    }
}
