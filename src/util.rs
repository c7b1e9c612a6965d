/// Numeric conversion helpers.
///
/// KPL has a single number type (`f64`), but loop bounds, loop variables, and
/// array indices are integers. These helpers convert between the two without
/// silently truncating or rounding.
pub mod num;
