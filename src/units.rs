//! Linear units used throughout the crate.
//!
//! Layout happens in device pixels ([Px]) at the resolution of the page
//! geometry; the PDF layer works in points ([Pt], 1/72 in). Physical page
//! sizes and margins are given in millimetres ([Mm]) or inches ([In]).

use derive_more::{Add, AddAssign, Display, From, Into, Mul, MulAssign, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};

/// Millimetres per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Points per inch
pub const PT_PER_INCH: f32 = 72.0;

/// A length in PDF points (1/72 of an inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Sum,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct Pt(pub f32);

/// A length in device pixels, i.e. dots at the resolution of a
/// [PageGeometry](crate::PageGeometry)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Sum,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct Px(pub f32);

/// A length in millimetres
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Mul, Display, From, Into, Serialize, Deserialize,
)]
pub struct Mm(pub f32);

/// A length in inches
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Mul, Display, From, Into, Serialize, Deserialize,
)]
pub struct In(pub f32);

impl From<In> for Mm {
    fn from(value: In) -> Self {
        Mm(value.0 * MM_PER_INCH)
    }
}

impl From<Mm> for In {
    fn from(value: Mm) -> Self {
        In(value.0 / MM_PER_INCH)
    }
}

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * PT_PER_INCH)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * PT_PER_INCH / MM_PER_INCH)
    }
}

impl Pt {
    /// Convert to device pixels at `dpi` dots per inch
    pub fn to_px(self, dpi: f32) -> Px {
        Px(self.0 * dpi / PT_PER_INCH)
    }
}

impl Mm {
    /// Convert to device pixels at `dpi` dots per inch
    pub fn to_px(self, dpi: f32) -> Px {
        Px(self.0 * dpi / MM_PER_INCH)
    }
}

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// Convert to points, given the `dpi` these pixels were laid out at
    pub fn to_pt(self, dpi: f32) -> Pt {
        Pt(self.0 * PT_PER_INCH / dpi)
    }

    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }
}

impl std::ops::Div<f32> for Px {
    type Output = Px;

    fn div(self, rhs: f32) -> Px {
        Px(self.0 / rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl std::ops::Neg for Px {
    type Output = Px;

    fn neg(self) -> Px {
        Px(-self.0)
    }
}
