//! On-disk persistence for [`PatternIndex`]
//!
//! The index is a pure function of the vocabulary, so it is cached as a CBOR
//! blob keyed by the vocabulary fingerprint. Anything that does not match the
//! current vocabulary, or does not decode, is discarded and rebuilt.

use super::PatternIndex;
use crate::core::{Fingerprint, Vocabulary};
use crate::error::{Result, SolverError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Bumped whenever the serialized layout changes
pub const FORMAT_VERSION: u32 = 2;

#[derive(Serialize, Deserialize)]
struct CachedIndex {
    format_version: u32,
    fingerprint: Fingerprint,
    word_count: u32,
    /// SHA-256 over `offsets` and `targets`
    digest: Fingerprint,
    offsets: Vec<u16>,
    targets: Vec<u16>,
}

fn content_digest(offsets: &[u16], targets: &[u16]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(b"WORDLE_BOT:INDEX:v2");
    hasher.update((offsets.len() as u64).to_le_bytes());
    for offset in offsets {
        hasher.update(offset.to_le_bytes());
    }
    hasher.update((targets.len() as u64).to_le_bytes());
    for target in targets {
        hasher.update(target.to_le_bytes());
    }
    hasher.finalize().into()
}

/// How [`load_or_build_with`] obtained its index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Read from a matching cache file
    Loaded,
    /// No cache file existed; built and saved
    Built,
    /// The cache file was stale or unreadable; rebuilt and overwritten
    Rebuilt { reason: String },
}

/// Serialize an index to CBOR bytes
///
/// # Errors
/// Returns `CacheCorrupt` if encoding fails.
pub fn to_bytes(index: &PatternIndex) -> Result<Vec<u8>> {
    let offsets = index.raw_offsets().to_vec();
    let targets: Vec<u16> = index.raw_targets().collect();
    let cached = CachedIndex {
        format_version: FORMAT_VERSION,
        fingerprint: *index.fingerprint(),
        word_count: index.word_count() as u32,
        digest: content_digest(&offsets, &targets),
        offsets,
        targets,
    };
    serde_cbor::to_vec(&cached).map_err(|e| SolverError::CacheCorrupt(e.to_string()))
}

/// Decode an index for `vocab` from CBOR bytes
///
/// # Errors
/// - `CacheCorrupt` if the bytes do not decode, fail their content digest or
///   describe an invalid index
/// - `CacheMismatch` if the index was written for another vocabulary or format
pub fn from_bytes(bytes: &[u8], vocab: &Vocabulary) -> Result<PatternIndex> {
    let cached: CachedIndex =
        serde_cbor::from_slice(bytes).map_err(|e| SolverError::CacheCorrupt(e.to_string()))?;

    if cached.format_version != FORMAT_VERSION {
        return Err(SolverError::CacheMismatch(format!(
            "format version {}, expected {FORMAT_VERSION}",
            cached.format_version
        )));
    }
    if cached.fingerprint != vocab.fingerprint() || cached.word_count as usize != vocab.len() {
        return Err(SolverError::CacheMismatch(
            "vocabulary fingerprint differs".to_string(),
        ));
    }
    if content_digest(&cached.offsets, &cached.targets) != cached.digest {
        return Err(SolverError::CacheCorrupt(
            "index content digest differs".to_string(),
        ));
    }

    PatternIndex::from_parts(
        vocab.len(),
        cached.fingerprint,
        cached.offsets,
        cached.targets,
    )
}

/// Write an index to `path`
///
/// The blob is written to a sibling temp file and renamed into place, so
/// concurrent writers never leave a partial file behind.
///
/// # Errors
/// Returns `Io` on filesystem failures.
pub fn save(path: &Path, index: &PatternIndex) -> Result<()> {
    let bytes = to_bytes(index)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Read the index for `vocab` from `path`
///
/// # Errors
/// `Io` if the file cannot be read, otherwise as [`from_bytes`].
pub fn load(path: &Path, vocab: &Vocabulary) -> Result<PatternIndex> {
    let bytes = fs::read(path)?;
    from_bytes(&bytes, vocab)
}

/// Load the cached index, or build and save a fresh one
///
/// Mismatched or corrupt caches are replaced, never used.
///
/// # Errors
/// Returns `Io` if reading an existing file or saving the new one fails.
pub fn load_or_build(path: &Path, vocab: &Vocabulary) -> Result<(PatternIndex, CacheOutcome)> {
    load_or_build_with(path, vocab, PatternIndex::build)
}

/// [`load_or_build`] with a caller-supplied build function
///
/// # Errors
/// Returns `Io` if reading an existing file or saving the new one fails.
pub fn load_or_build_with(
    path: &Path,
    vocab: &Vocabulary,
    build: impl FnOnce(&Vocabulary) -> PatternIndex,
) -> Result<(PatternIndex, CacheOutcome)> {
    let outcome = if path.exists() {
        match load(path, vocab) {
            Ok(index) => return Ok((index, CacheOutcome::Loaded)),
            Err(e @ (SolverError::CacheMismatch(_) | SolverError::CacheCorrupt(_))) => {
                CacheOutcome::Rebuilt {
                    reason: e.to_string(),
                }
            }
            Err(e) => return Err(e),
        }
    } else {
        CacheOutcome::Built
    };

    let index = build(vocab);
    save(path, &index)?;
    Ok((index, outcome))
}

/// Distinguishes temp files of writers within one process
static SAVE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn temp_path(path: &Path) -> PathBuf {
    let sequence = SAVE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".tmp.{}.{sequence}", std::process::id()));
    path.with_file_name(name)
}
