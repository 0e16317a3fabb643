//! Short highlight over rows reported by a line clear.

use crate::core::RowList;
use crate::types::LINE_FLASH_MS;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFlash {
    rows: RowList,
    remaining_ms: u32,
}

impl LineFlash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the flash over `rows`.
    pub fn trigger(&mut self, rows: &[u8]) {
        let cap = self.rows.capacity();
        self.rows.clear();
        self.rows.extend(rows.iter().copied().take(cap));
        self.remaining_ms = LINE_FLASH_MS;
    }

    /// Count the flash down; it clears itself when time runs out.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.rows.clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0 && !self.rows.is_empty()
    }

    /// Rows to highlight, empty when inactive.
    pub fn rows(&self) -> &[u8] {
        if self.is_active() {
            &self.rows
        } else {
            &[]
        }
    }

    /// Remaining intensity in `0..=LINE_FLASH_MS`, for fading.
    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_expires_after_duration() {
        let mut flash = LineFlash::new();
        flash.trigger(&[19, 18]);
        assert_eq!(flash.rows(), &[19, 18]);

        flash.advance(100);
        assert!(flash.is_active());
        flash.advance(50);
        assert!(!flash.is_active());
        assert!(flash.rows().is_empty());
    }

    #[test]
    fn retrigger_replaces_rows() {
        let mut flash = LineFlash::new();
        flash.trigger(&[19]);
        flash.advance(140);
        flash.trigger(&[5, 4]);
        assert_eq!(flash.rows(), &[5, 4]);
        assert_eq!(flash.remaining_ms(), LINE_FLASH_MS);
    }
}
