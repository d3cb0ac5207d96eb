//! Physical page geometry and its device-pixel paint area.

use crate::pagesize::PageSize;
use crate::units::*;
use crate::ComposeError;
use serde::{Deserialize, Serialize};

/// Margins are given in millimetres and carve the paint area out of the
/// physical page. All layout coordinates are relative to the top-left corner
/// of that paint area.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: Mm,
    pub right: Mm,
    pub bottom: Mm,
    pub left: Mm,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Mm, right: Mm, bottom: Mm, left: Mm) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins in left, top, right, bottom order
    pub fn ltrb(left: Mm, top: Mm, right: Mm, bottom: Mm) -> Margins {
        Margins::trbl(top, right, bottom, left)
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Mm>>(value: D) -> Margins {
        let value: Mm = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Mm, horizontal: Mm) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Mm(0.0))
    }
}

/// The page geometry of one composition: physical size, margins and the
/// resolution used to convert them into device pixels. Created once per
/// document and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    size: PageSize,
    margins: Margins,
    dpi: f32,
    width: Px,
    height: Px,
}

impl PageGeometry {
    /// The reference resolution, in dots per inch
    pub const REFERENCE_DPI: f32 = 300.0;

    /// Build a geometry at the reference resolution
    pub fn new(size: PageSize, margins: Margins) -> Result<PageGeometry, ComposeError> {
        PageGeometry::with_resolution(size, margins, PageGeometry::REFERENCE_DPI)
    }

    /// Build a geometry at `dpi` dots per inch. Fails when the page or the
    /// area left inside the margins is empty.
    pub fn with_resolution(
        size: PageSize,
        margins: Margins,
        dpi: f32,
    ) -> Result<PageGeometry, ComposeError> {
        if !(dpi.is_finite() && dpi > 0.0) {
            return Err(ComposeError::InvalidGeometry(format!(
                "resolution must be positive, got {dpi}"
            )));
        }
        if !(size.0 .0 > 0.0 && size.1 .0 > 0.0) {
            return Err(ComposeError::InvalidGeometry(format!(
                "page size must be positive, got {}x{} mm",
                size.0, size.1
            )));
        }
        let Margins {
            top,
            right,
            bottom,
            left,
        } = margins;
        if [top, right, bottom, left].iter().any(|m| !(m.0 >= 0.0)) {
            return Err(ComposeError::InvalidGeometry(
                "margins must be zero or positive".into(),
            ));
        }

        let paint_width = size.0 - left - right;
        let paint_height = size.1 - top - bottom;
        if !(paint_width.0 > 0.0 && paint_height.0 > 0.0) {
            return Err(ComposeError::InvalidGeometry(format!(
                "margins leave no paint area on a {}x{} mm page",
                size.0, size.1
            )));
        }

        Ok(PageGeometry {
            size,
            margins,
            dpi,
            width: paint_width.to_px(dpi),
            height: paint_height.to_px(dpi),
        })
    }

    /// Build a margin-less geometry directly from a paint area in device
    /// pixels at the reference resolution
    pub fn from_pixels(width: Px, height: Px) -> Result<PageGeometry, ComposeError> {
        let dpi = PageGeometry::REFERENCE_DPI;
        let to_mm = |px: Px| Mm(px.0 * MM_PER_INCH / dpi);
        PageGeometry::with_resolution((to_mm(width), to_mm(height)), Margins::empty(), dpi)
    }

    /// Width of the paint area
    pub fn width(&self) -> Px {
        self.width
    }

    /// Height of the paint area
    pub fn height(&self) -> Px {
        self.height
    }

    pub fn resolution(&self) -> f32 {
        self.dpi
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn paint_area_excludes_margins() {
        let geometry = PageGeometry::new(
            (Mm(25.4 * 4.0), Mm(25.4 * 6.0)),
            Margins::all(Mm(25.4)),
        )
        .expect("valid geometry");
        assert!((geometry.width().0 - 600.0).abs() < 1e-2);
        assert!((geometry.height().0 - 1200.0).abs() < 1e-2);
    }

    #[test]
    fn from_pixels_round_trips() {
        let geometry = PageGeometry::from_pixels(Px(2000.0), Px(3000.0)).expect("valid");
        assert!((geometry.width().0 - 2000.0).abs() < 1e-2);
        assert!((geometry.height().0 - 3000.0).abs() < 1e-2);
    }

    #[test]
    fn margins_wider_than_page_are_rejected() {
        let result = PageGeometry::new(pagesize::A6, Margins::symmetric(Mm(10.0), Mm(60.0)));
        assert!(matches!(result, Err(ComposeError::InvalidGeometry(_))));
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let result = PageGeometry::with_resolution(pagesize::A4, Margins::empty(), 0.0);
        assert!(result.is_err());
    }

    #[test]
    fn nan_margins_are_rejected() {
        let margins = Margins::trbl(Mm(f32::NAN), Mm(0.0), Mm(0.0), Mm(0.0));
        let result = PageGeometry::new(pagesize::A4, margins);
        assert!(matches!(result, Err(ComposeError::InvalidGeometry(_))));
    }
}
