//! Cache perturbation between trials.
//!
//! A [`CacheScrubber`] writes a buffer larger than the biggest cache level so
//! the next trial starts from a comparable cold cache. The buffer is allocated
//! and freed inside [`CacheScrubber::scrub`]; nothing escapes the call.

use crate::error::SetupError;
use std::hint::black_box;

/// Scrub size used when the host does not report its caches.
pub const FALLBACK_SCRUB_BYTES: usize = 10 * 1024 * 1024 * std::mem::size_of::<u64>();

/// Scrubs are this many times the largest cache level.
const CACHE_MULTIPLIER: usize = 2;

const PAGE_BYTES: usize = 4096;

/// Where the scrub size came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheSource {
    Sysconf,
    Sysfs,
    Fallback,
    Explicit,
}

#[derive(Clone, Debug)]
pub struct CacheScrubber {
    bytes: usize,
    source: CacheSource,
}

impl CacheScrubber {
    /// Size the scrub buffer from the host's largest cache level.
    pub fn detect() -> Self {
        match largest_cache_size() {
            Some((size, source)) => {
                let bytes = size.saturating_mul(CACHE_MULTIPLIER);
                log::debug!(
                    "largest cache level is {} bytes ({:?}); scrubbing {} bytes",
                    size,
                    source,
                    bytes
                );
                Self { bytes, source }
            }
            None => {
                log::warn!(
                    "cache sizes unavailable; scrubbing fallback of {} bytes",
                    FALLBACK_SCRUB_BYTES
                );
                Self {
                    bytes: FALLBACK_SCRUB_BYTES,
                    source: CacheSource::Fallback,
                }
            }
        }
    }

    /// Scrubber with an explicit buffer size.
    pub fn with_size(bytes: usize) -> Result<Self, SetupError> {
        if bytes == 0 {
            return Err(SetupError::EmptyScratchBuffer);
        }
        Ok(Self {
            bytes,
            source: CacheSource::Explicit,
        })
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }

    pub fn source(&self) -> CacheSource {
        self.source
    }

    /// Write every byte of a fresh buffer, then free it.
    ///
    /// Returns the number of bytes written. Must be called outside any timed
    /// region.
    #[inline(never)]
    pub fn scrub(&self) -> usize {
        let mut buffer = vec![0u8; self.bytes];
        let fill = black_box(0xA5u8);
        let mut touched = 0usize;
        for page in buffer.chunks_mut(PAGE_BYTES) {
            page.fill(fill);
            touched += page.len();
        }
        black_box(&mut buffer);
        drop(buffer);
        touched
    }
}

impl Default for CacheScrubber {
    fn default() -> Self {
        Self::detect()
    }
}

/// Largest data/unified cache level on this host, in bytes.
pub fn largest_cache_size() -> Option<(usize, CacheSource)> {
    if let Some(size) = sysconf_cache_size() {
        return Some((size, CacheSource::Sysconf));
    }
    sysfs_cache_size().map(|size| (size, CacheSource::Sysfs))
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn sysconf_cache_size() -> Option<usize> {
    let names = [
        libc::_SC_LEVEL1_DCACHE_SIZE,
        libc::_SC_LEVEL2_CACHE_SIZE,
        libc::_SC_LEVEL3_CACHE_SIZE,
        libc::_SC_LEVEL4_CACHE_SIZE,
    ];
    names
        .iter()
        .filter_map(|&name| {
            let size = unsafe { libc::sysconf(name) };
            (size > 0).then_some(size as usize)
        })
        .max()
}

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn sysconf_cache_size() -> Option<usize> {
    None
}

#[cfg(target_os = "linux")]
fn sysfs_cache_size() -> Option<usize> {
    let entries = std::fs::read_dir("/sys/devices/system/cpu/cpu0/cache").ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("index"))
        .filter_map(|entry| std::fs::read_to_string(entry.path().join("size")).ok())
        .filter_map(|text| parse_cache_size(&text))
        .max()
}

#[cfg(not(target_os = "linux"))]
fn sysfs_cache_size() -> Option<usize> {
    None
}

/// Parse sysfs cache sizes such as `32K`, `1024K` or `16M`.
pub fn parse_cache_size(text: &str) -> Option<usize> {
    let text = text.trim();
    let (digits, multiplier) = match text.chars().last()? {
        'K' | 'k' => (&text[..text.len() - 1], 1024),
        'M' | 'm' => (&text[..text.len() - 1], 1024 * 1024),
        'G' | 'g' => (&text[..text.len() - 1], 1024 * 1024 * 1024),
        _ => (text, 1),
    };
    let value: usize = digits.trim().parse().ok()?;
    (value > 0).then(|| value * multiplier)
}
