use std::fmt::Debug;

use num_traits::Float;

/// A trait for types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. The search relies on an
/// infinite initial bound and on every non-NaN value being totally ordered, which only holds for the
/// IEEE float types.
pub trait Coordinate: private::Sealed + Float + Debug + Send + Sync + 'static {}

impl Coordinate for f32 {}

impl Coordinate for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
