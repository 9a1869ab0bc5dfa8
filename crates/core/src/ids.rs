use rand::Rng;

/// Alphabet used for client-generated identifiers.
pub const ID_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
/// Length of every client-generated identifier.
pub const ID_LENGTH: usize = 7;

/// Returns a random 7-character alphanumeric identifier.
///
/// There is no collision detection; uniqueness relies on 62^7 possible values.
pub fn nanoid() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generates_seven_alphanumeric_characters() {
        let id = nanoid();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.bytes().all(|byte| ID_ALPHABET.contains(&byte)));
    }

    #[test]
    fn thousand_ids_stay_well_formed_and_distinct() {
        let ids = (0..1_000).map(|_| nanoid()).collect::<Vec<_>>();

        assert!(ids.iter().all(|id| id.len() == ID_LENGTH));
        assert!(ids.iter().all(|id| id.chars().all(|ch| ch.is_ascii_alphanumeric())));

        // Probabilistic: 1000 draws from 62^7 values collide with negligible odds.
        let unique = ids.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), ids.len());
    }
}
