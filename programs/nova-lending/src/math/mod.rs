//! Math library modules for safe arithmetic operations

pub mod safe_math;
pub mod wad;
pub mod units;
pub mod accrual;
pub mod liquidation;

pub use safe_math::*;
pub use wad::*;
pub use units::*;
pub use accrual::*;
pub use liquidation::*;
