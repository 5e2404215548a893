//! Costs of edges, paths and heuristic estimates.

/// A numeric cost.
///
/// Costs are totally ordered so they can rank frontier entries. Edge costs are
/// expected to be non-negative, but signed and float costs can still express
/// negative values, which the search engine rejects before expanding anything.
pub trait Cost:
    Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + core::cmp::Eq
    + PartialOrd
    + Ord
    + num_traits::SaturatingAdd
    + num_traits::bounds::UpperBounded
    + num_traits::Zero
    + std::ops::Add<Self, Output = Self>
    + std::ops::AddAssign
{
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != num_traits::bounds::UpperBounded::max_value()
    }

    /// Whether the cost is below zero.
    #[inline(always)]
    fn is_negative(&self) -> bool {
        *self < Self::zero()
    }
}

impl Cost for u32 {}
impl Cost for u64 {}
impl Cost for i32 {}
impl Cost for i64 {}
