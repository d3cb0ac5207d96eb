use crate::units::*;
use serde::Serialize;

/// A rectangle, specified by two opposite corners.
///
/// In the PDF layer (`Rect<Pt>`) the first corner is the lower-left one. In
/// the layout layer (`Rect<Px>`) coordinates grow downwards from the top-left
/// corner of the paint area, so `(x1, y1)` is the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Rect<U = Pt> {
    pub x1: U,
    pub y1: U,
    pub x2: U,
    pub y2: U,
}

impl Rect<Px> {
    /// Create a layout rectangle from its top-left corner and its size
    pub fn from_ltwh(left: Px, top: Px, width: Px, height: Px) -> Rect<Px> {
        Rect {
            x1: left,
            y1: top,
            x2: left + width,
            y2: top + height,
        }
    }

    pub fn width(&self) -> Px {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Px {
        self.y2 - self.y1
    }
}

impl Rect<Pt> {
    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

impl From<&Rect> for pdf_writer::Rect {
    fn from(r: &Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}
