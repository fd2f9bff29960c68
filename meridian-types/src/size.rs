//! Size of a rectangular area, e.g. of a rendering surface.

use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Size of a rectangular area in abstract units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size<Num: num_traits::Num + PartialOrd + Copy = f64> {
    width: Num,
    height: Num,
}

impl<Num: num_traits::Num + FromPrimitive + PartialOrd + Copy> Size<Num> {
    /// Creates a new size instance.
    pub fn new(width: Num, height: Num) -> Self {
        Self { width, height }
    }

    /// Width of the area.
    pub fn width(&self) -> Num {
        self.width
    }

    /// Half width of the area.
    pub fn half_width(&self) -> Num {
        self.width / Num::from_f64(2.0).expect("const conversion failed")
    }

    /// Height of the area.
    pub fn height(&self) -> Num {
        self.height
    }

    /// Half height of the area.
    pub fn half_height(&self) -> Num {
        self.height / Num::from_f64(2.0).expect("const conversion failed")
    }

    /// Returns true if either of the dimensions is zero.
    pub fn is_zero(&self) -> bool {
        self.width.is_zero() || self.height.is_zero()
    }
}
