//! Persistent best-score storage
//!
//! A single integer under one LocalStorage key. Storage being unavailable
//! is non-fatal: the game keeps an in-memory best instead.

use serde::{Deserialize, Serialize};

/// Best score ever achieved on this machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snakeHighScore";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Record a score; persists and returns true when it sets a new best.
    /// The stored value never decreases.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            self.save();
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only). Any failure,
    /// from missing storage to an unparseable value, reads as 0.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<u32>(&raw) {
                    log::info!("Loaded high score: {}", best);
                    return Self { best };
                }
            }
        }

        log::info!("No stored high score, starting at 0");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only). The payload is the
    /// bare integer, nothing else.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(raw) = serde_json::to_string(&self.best) {
                let _ = storage.set_item(Self::STORAGE_KEY, &raw);
                log::info!("High score saved: {}", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_raises() {
        let mut high = HighScore::new(10);
        assert!(!high.record(5));
        assert_eq!(high.best, 10);
        assert!(!high.record(10));
        assert_eq!(high.best, 10);
        assert!(high.record(11));
        assert_eq!(high.best, 11);
    }

    #[test]
    fn test_stored_payload_is_a_bare_integer() {
        let high = HighScore::new(42);
        assert_eq!(serde_json::to_string(&high.best).unwrap(), "42");
        assert_eq!(serde_json::from_str::<u32>("42").unwrap(), high.best);
    }
}
