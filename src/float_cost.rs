use std::cmp::Eq;
use std::fmt::Debug;
use std::str::FromStr;

use derive_more::Display;
use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::FloatCore;
use ordered_float::OrderedFloat;

use crate::cost::Cost;

/// A floating point cost with a total order.
///
/// `NaN` sorts above every other value (including infinity) and is never a
/// valid cost.
#[derive(Copy, Clone, Default, Debug, Display)]
#[repr(transparent)]
#[display("{_0}")]
pub struct FloatCost<F: FloatCore>(pub OrderedFloat<F>);

impl<F> Cost for FloatCost<F>
where
    FloatCost<F>: Debug + std::ops::AddAssign + Ord + Eq + UpperBounded,
    F: FloatCore + std::fmt::Display,
{
    #[inline(always)]
    fn valid(&self) -> bool {
        !self.0.is_nan() && !self.0.is_infinite()
    }
}

impl<F> FloatCost<F>
where
    F: FloatCore,
{
    pub fn new(f: F) -> Self {
        Self(OrderedFloat(f))
    }

    #[inline(always)]
    pub fn infinity() -> Self {
        Self(OrderedFloat(F::infinity()))
    }

    #[inline(always)]
    pub fn get(&self) -> F {
        self.0.0
    }
}

impl<F> From<u8> for FloatCost<F>
where
    F: FloatCore + From<u8>,
{
    fn from(v: u8) -> Self {
        Self::new(<F as From<u8>>::from(v))
    }
}

impl<F> FromStr for FloatCost<F>
where
    F: FloatCore + FromStr,
{
    type Err = F::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<F>().map(Self::new)
    }
}

impl<F> std::ops::Add for FloatCost<F>
where
    OrderedFloat<F>: std::ops::Add<OrderedFloat<F>, Output = OrderedFloat<F>>,
    F: FloatCore,
{
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<F> std::ops::AddAssign for FloatCost<F>
where
    OrderedFloat<F>: std::ops::AddAssign,
    F: FloatCore,
{
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Float addition already saturates at infinity.
impl<F> SaturatingAdd for FloatCost<F>
where
    OrderedFloat<F>: std::ops::Add<OrderedFloat<F>, Output = OrderedFloat<F>>,
    F: FloatCore,
{
    fn saturating_add(&self, rhs: &Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<F> Zero for FloatCost<F>
where
    OrderedFloat<F>: std::ops::Add<OrderedFloat<F>, Output = OrderedFloat<F>>,
    F: FloatCore,
{
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.0 == OrderedFloat(F::zero())
    }
    #[inline(always)]
    fn zero() -> Self {
        Self(OrderedFloat(F::zero()))
    }
}

impl<F> UpperBounded for FloatCost<F>
where
    F: FloatCore,
{
    fn max_value() -> Self {
        Self(OrderedFloat(F::infinity()))
    }
}

impl<F> PartialOrd for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        // `PartialOrd` is forwarded to `OrderedFloat`
        Some(self.0.cmp(&other.0))
    }
}
impl<F> Ord for FloatCost<F>
where
    OrderedFloat<F>: Ord,
    F: FloatCore,
{
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // `Ord` is forwarded to `OrderedFloat`
        self.0.cmp(&other.0)
    }
}
impl<F> PartialEq for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}
impl<F> Eq for FloatCost<F> where F: FloatCore {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert!(FloatCost::new(0.0f64).is_zero());
        assert!(!FloatCost::new(0.0f64).is_negative());
    }

    #[test]
    fn negative() {
        assert!(FloatCost::new(-0.5f64).is_negative());
        assert!(!FloatCost::new(f64::NAN).is_negative());
        assert!(!FloatCost::new(f64::NAN).valid());
    }

    #[test]
    fn sum() {
        let mut f = FloatCost::new(0.0f32);
        f += FloatCost::new(1.5f32);
        f += FloatCost::new(1.5f32);
        assert!(f == FloatCost::new(3.0f32));
        f += FloatCost::infinity();
        assert!(f == FloatCost::max_value());
        assert!(!f.valid());
    }

    #[test]
    fn parse_and_display() {
        let c: FloatCost<f64> = "2.5".parse().unwrap();
        assert_eq!(c, FloatCost::new(2.5));
        assert_eq!(FloatCost::<f64>::from(8u8).to_string(), "8");
        assert!("two".parse::<FloatCost<f64>>().is_err());
    }
}
