//! Pre-defined physical page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between
//! portrait and landscape.
//!
//! # Example
//!
//! ```
//! use report_composer::pagesize::{A4, PageOrientation};
//!
//! let landscape = A4.landscape();
//! assert!(landscape.0 > landscape.1);
//! ```

use crate::units::*;

/// Physical page dimensions as (width, height) in millimetres.
pub type PageSize = (Mm, Mm);

// iso a-series
pub const A3: PageSize = (Mm(297.0), Mm(420.0));
pub const A4: PageSize = (Mm(210.0), Mm(297.0));
pub const A5: PageSize = (Mm(148.0), Mm(210.0));
pub const A6: PageSize = (Mm(105.0), Mm(148.0));

// north american sizes (converted from inches)
pub const LETTER: PageSize = (Mm(8.5 * MM_PER_INCH), Mm(11.0 * MM_PER_INCH));
pub const HALF_LETTER: PageSize = (Mm(5.5 * MM_PER_INCH), Mm(8.5 * MM_PER_INCH));
pub const LEGAL: PageSize = (Mm(8.5 * MM_PER_INCH), Mm(13.0 * MM_PER_INCH));

/// A4 less 18 mm in each dimension (192 x 279 mm); the sheet the
/// measurement report is printed on
pub const REPORT: PageSize = (Mm(210.0 - 20.0 + 2.0), Mm(297.0 - 20.0 + 2.0));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}
