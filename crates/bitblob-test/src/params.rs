//! Regression test parameters and operations

use crate::error::TestError;
use crate::pattern::bitmap_to_rows;
use bitblob_core::Bitmap;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare values and report failures (default)
    #[default]
    Compare,
    /// Compare and also print every checked bitmap
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "conncomp")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let failure = TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            };
            eprintln!("Failure in {}_reg: {}", self.test_name, failure);
            self.failures.push(failure);
            false
        } else {
            true
        }
    }

    /// Compare two bitmaps for identical size and pixels
    ///
    /// In display mode both bitmaps are printed as ASCII art.
    pub fn compare_pix(&mut self, expected: &Bitmap, actual: &Bitmap) -> bool {
        self.index += 1;

        if self.display() {
            eprintln!("{}_reg index {}: expected", self.test_name, self.index);
            for row in bitmap_to_rows(expected) {
                eprintln!("  {}", row);
            }
            eprintln!("{}_reg index {}: actual", self.test_name, self.index);
            for row in bitmap_to_rows(actual) {
                eprintln!("  {}", row);
            }
        }

        if expected.equals(actual) {
            return true;
        }

        let failure = TestError::BitmapMismatch { index: self.index };
        eprintln!("Failure in {}_reg: {}", self.test_name, failure);
        self.failures.push(failure);
        false
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.failures.is_empty()
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap_from_rows;

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert!(matches!(
            rp.failures()[0],
            TestError::ValueMismatch { index: 1, .. }
        ));
    }

    #[test]
    fn test_compare_pix() {
        let mut rp = RegParams::new("test");
        let a = bitmap_from_rows(&["x.", ".x"]).unwrap();
        let b = bitmap_from_rows(&["x.", "x."]).unwrap();
        assert!(rp.compare_pix(&a, &a.clone()));
        assert!(!rp.compare_pix(&a, &b));
        assert!(!rp.cleanup());
    }
}
