//! Opaque identifier generation
//!
//! Identifiers are 26-character base-36 strings (two concatenated 13-char
//! random fragments), collision-resistant within a single store.

use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FRAGMENT_LEN: usize = 13;

fn fragment(rng: &mut impl Rng) -> String {
    (0..FRAGMENT_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Generate a fresh opaque id.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    let mut id = fragment(&mut rng);
    id.push_str(&fragment(&mut rng));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), FRAGMENT_LEN * 2);
        assert!(id.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_ids_are_distinct() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
