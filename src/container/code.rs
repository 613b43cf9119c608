use std::fmt::Debug;
use std::hash::Hash;

/// Categorical allele code carried by concrete genotype containers.
///
/// Codes are either integer-coded (`u8`: 0 = missing, 1 = major, 2 = minor)
/// or string-coded (`String`: empty string = missing). Codes carry no
/// meaningful ordering: containers expose elementwise equality only.
pub trait AlleleCode: Clone + Eq + Ord + Hash + Debug {
    /// Whether this code type is integer-coded. Gates the operations that
    /// are only defined for integral codes (e.g. sparse `empty_like`).
    const INTEGRAL: bool;

    /// The per-type code standing for a missing observation.
    fn missing_code() -> Self;

    /// The default reference code assumed by sparse containers.
    fn reference_default() -> Self;
}

impl AlleleCode for u8 {
    const INTEGRAL: bool = true;

    fn missing_code() -> Self { 0 }

    fn reference_default() -> Self { 0 }
}

impl AlleleCode for String {
    const INTEGRAL: bool = false;

    fn missing_code() -> Self { String::new() }

    fn reference_default() -> Self { String::from("0") }
}
