use crate::error::RecipeError;
use crate::model::Recipe;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

mod file;
mod memory;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;

/// Extension of every stored recipe file
pub const RECIPE_EXTENSION: &str = "json";

/// Persistence for recipes, keyed by [`storage_key`] of the title.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Store a recipe, replacing any recipe with the same key.
    async fn save(&self, recipe: &Recipe) -> Result<(), RecipeError>;

    /// All stored recipes, ordered by storage key.
    async fn list(&self) -> Result<Vec<Recipe>, RecipeError>;

    /// Remove the recipe stored under `title`.
    ///
    /// Returns [`RecipeError::NotFound`] when nothing is stored under that key.
    async fn delete(&self, title: &str) -> Result<(), RecipeError>;
}

/// Longest key kept verbatim, in bytes. Leaves room for the extension under
/// the usual 255-byte filename limit.
pub const MAX_KEY_LEN: usize = 200;

/// Hex digits of the title digest appended to shortened keys.
const DIGEST_LEN: usize = 16;

/// Derive the storage key for a recipe title.
///
/// Spaces become `_`, letters, digits and `-` are kept as is (in any script),
/// and every other character is percent-encoded byte by byte. The mapping is
/// injective and never yields path separators or dots, so distinct titles
/// never share a file and no title can leave the recipe directory.
///
/// Keys longer than [`MAX_KEY_LEN`] are cut at a character boundary and end in
/// `~` plus a SHA-256 prefix of the title. `~` is always encoded otherwise, so
/// shortened keys never collide with full ones.
pub fn storage_key(title: &str) -> String {
    let mut key = String::with_capacity(title.len());
    let mut buf = [0; 4];
    for c in title.chars() {
        match c {
            ' ' => key.push('_'),
            c if c.is_alphanumeric() || c == '-' => key.push(c),
            c => {
                for byte in c.encode_utf8(&mut buf).bytes() {
                    key.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    if key.len() > MAX_KEY_LEN {
        shorten(&mut key, title);
    }
    key
}

fn shorten(key: &mut String, title: &str) {
    let mut cut = MAX_KEY_LEN - DIGEST_LEN - 1;
    while !key.is_char_boundary(cut) {
        cut -= 1;
    }
    key.truncate(cut);
    // never leave half of a %XX escape behind
    let bytes = key.as_bytes();
    let partial = (bytes.len().saturating_sub(2)..bytes.len()).find(|&i| bytes[i] == b'%');
    if let Some(pos) = partial {
        key.truncate(pos);
    }
    let digest = format!("{:x}", Sha256::digest(title.as_bytes()));
    key.push('~');
    key.push_str(&digest[..DIGEST_LEN]);
}

pub(crate) fn not_found() -> RecipeError {
    RecipeError::NotFound("Recipe not found.".to_string())
}

pub(crate) fn checked_key(title: &str) -> Result<String, RecipeError> {
    let key = storage_key(title);
    if key.is_empty() {
        return Err(RecipeError::validation("title is required."));
    }
    Ok(key)
}
