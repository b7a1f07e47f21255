use qrcode::QrCode;
use tracing::{debug, warn};

use crate::style::{EcLevel, FALLBACK_TEXT};

// Matrix provider
//------------------------------------------------------------------------------

/// Side length of the three fixed finder zones, in modules. Structural to the
/// symbol format; styling never moves or resizes them.
pub const FINDER_SPAN: usize = 7;

/// Immutable square module grid produced by the external symbol encoder.
/// Dimension depends only on the encoded text and EC level, never on styling.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Matrix {
    w: usize,
    cells: Vec<bool>,
}

impl Matrix {
    fn from_code(code: &QrCode) -> Self {
        let w = code.width();
        let cells = code.to_colors().iter().map(|c| *c == qrcode::Color::Dark).collect();
        Self { w, cells }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.w && y < self.w, "Module coordinate out of bounds");
        self.cells[y * self.w + x]
    }

    /// True when (x, y) falls inside one of the three canonical 7x7 finder
    /// zones: top-left, top-right, bottom-left.
    pub fn in_finder_zone(&self, x: usize, y: usize) -> bool {
        let near_start = |v: usize| v < FINDER_SPAN;
        let near_end = |v: usize| v + FINDER_SPAN >= self.w;
        (near_start(x) && near_start(y))
            || (near_end(x) && near_start(y))
            || (near_start(x) && near_end(y))
    }
}

/// Wraps the external encoder and caches the last grid. Pure style edits hit
/// the cache; only a text or EC change re-encodes.
#[derive(Debug, Default)]
pub struct MatrixProvider {
    cache: Option<(String, EcLevel, Matrix)>,
    encodes: usize,
}

impl MatrixProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actual encoder invocations, i.e. cache misses.
    pub fn encodes(&self) -> usize {
        self.encodes
    }

    pub fn encode(&mut self, text: &str, ecl: EcLevel) -> &Matrix {
        let hit = matches!(&self.cache, Some((t, e, _)) if t == text && *e == ecl);
        if !hit {
            self.encodes += 1;
            let matrix = Matrix::from_code(&encode_or_fallback(text, ecl));
            debug!(width = matrix.width(), "encoded symbol matrix");
            self.cache = Some((text.to_string(), ecl, matrix));
        }
        &self.cache.as_ref().expect("cache populated above").2
    }
}

/// Encoding never fails the render: empty text and encoder rejections both
/// fall back to a fixed known-good string.
pub(crate) fn encode_or_fallback(text: &str, ecl: EcLevel) -> QrCode {
    let ecl = qrcode::EcLevel::from(ecl);
    if !text.trim().is_empty() {
        match QrCode::with_error_correction_level(text.as_bytes(), ecl) {
            Ok(code) => return code,
            Err(e) => warn!(error = %e, "encoder rejected text, substituting fallback"),
        }
    }
    QrCode::with_error_correction_level(FALLBACK_TEXT.as_bytes(), ecl)
        .expect("fallback text must always encode")
}

#[cfg(test)]
mod matrix_tests {
    use super::*;

    #[test]
    fn test_dimension_ignores_reencode_of_same_input() {
        let mut provider = MatrixProvider::new();
        let w1 = provider.encode("https://example.com/a", EcLevel::Q).width();
        let w2 = provider.encode("https://example.com/a", EcLevel::Q).width();
        assert_eq!(w1, w2);
        assert_eq!(provider.encodes(), 1);
    }

    #[test]
    fn test_cache_invalidated_by_text_and_ec() {
        let mut provider = MatrixProvider::new();
        provider.encode("one", EcLevel::M);
        provider.encode("one", EcLevel::M);
        assert_eq!(provider.encodes(), 1);
        provider.encode("two", EcLevel::M);
        assert_eq!(provider.encodes(), 2);
        provider.encode("two", EcLevel::H);
        assert_eq!(provider.encodes(), 3);
    }

    #[test]
    fn test_empty_text_uses_fallback() {
        let mut provider = MatrixProvider::new();
        let from_empty = provider.encode("", EcLevel::M).clone();
        let mut provider = MatrixProvider::new();
        let from_fallback = provider.encode(FALLBACK_TEXT, EcLevel::M).clone();
        assert_eq!(from_empty, from_fallback);
    }

    #[test]
    fn test_finder_zones_fixed_at_corners() {
        let mut provider = MatrixProvider::new();
        let matrix = provider.encode("HELLO", EcLevel::H);
        let w = matrix.width();
        assert!(matrix.in_finder_zone(0, 0));
        assert!(matrix.in_finder_zone(6, 6));
        assert!(matrix.in_finder_zone(w - 1, 0));
        assert!(matrix.in_finder_zone(0, w - 1));
        assert!(!matrix.in_finder_zone(w - 1, w - 1));
        assert!(!matrix.in_finder_zone(7, 7));
        assert!(!matrix.in_finder_zone(w / 2, w / 2));
    }
}
