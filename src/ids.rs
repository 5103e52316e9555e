//! Session-unique identifier generation.
//!
//! Ids combine the current unix-millis timestamp with a random base-36
//! suffix, e.g. `apt-1739462400000-k3j9x0q2m`. Good enough to avoid
//! collisions within a single session; not cryptographically strong.

use rand::Rng;

const SUFFIX_LEN: usize = 9;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a prefixed, session-unique id.
pub fn generate_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{prefix}-{millis}-{suffix}")
}
