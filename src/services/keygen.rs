use crate::db::Repository;
use crate::error::{AppError, AppResult};

/// Character set for public keys. Alphanumeric with the ambiguous
/// characters removed: no '0'/'O', no '1'/'l'/'I'.
const KEY_ALPHABET: &[char] = &[
    '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M',
    'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Character set for secret keys. Secrets are never read back by humans,
/// so the full alphanumeric set applies.
const SECRET_ALPHABET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Service for generating unique link keys.
pub struct KeyService;

impl KeyService {
    /// Generate a unique public key that doesn't already exist in the
    /// database, active or not.
    ///
    /// Candidates are drawn at random and re-drawn on collision, up to
    /// `max_attempts` times.
    ///
    /// # Errors
    ///
    /// Returns `AppError::GenerationExhausted` if no unique key was found
    /// within the attempt budget.
    pub async fn generate_key(
        length: usize,
        max_attempts: u32,
        repository: &Repository,
    ) -> AppResult<String> {
        for _ in 0..max_attempts {
            let key = nanoid::nanoid!(length, KEY_ALPHABET);

            if !repository.key_exists(&key).await? {
                return Ok(key);
            }
        }

        Err(AppError::GenerationExhausted)
    }

    /// Generate a unique secret key. Longer and higher-entropy than the
    /// public key; same store-checked retry loop.
    pub async fn generate_secret_key(
        length: usize,
        max_attempts: u32,
        repository: &Repository,
    ) -> AppResult<String> {
        for _ in 0..max_attempts {
            let secret = nanoid::nanoid!(length, SECRET_ALPHABET);

            if !repository.secret_key_exists(&secret).await? {
                return Ok(secret);
            }
        }

        Err(AppError::GenerationExhausted)
    }
}
