use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Monetary amount in paise (₹1 = 100 paise).
///
/// All money in the system is integer minor units so that the split-sum
/// invariant can be checked with exact equality. Amounts may be negative
/// in intermediate arithmetic (e.g. diagnostics); the validator rejects
/// negative fields before anything is persisted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Paise(pub i64);

impl Paise {
    pub const ZERO: Paise = Paise(0);

    /// Whole-rupee constructor, the unit admin screens work in.
    pub const fn from_rupees(rupees: i64) -> Self {
        Paise(rupees * 100)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Paise {
    type Output = Paise;

    fn add(self, rhs: Paise) -> Paise {
        Paise(self.0 + rhs.0)
    }
}

impl AddAssign for Paise {
    fn add_assign(&mut self, rhs: Paise) {
        self.0 += rhs.0;
    }
}

impl Sub for Paise {
    type Output = Paise;

    fn sub(self, rhs: Paise) -> Paise {
        Paise(self.0 - rhs.0)
    }
}

impl Mul<i64> for Paise {
    type Output = Paise;

    fn mul(self, rhs: i64) -> Paise {
        Paise(self.0 * rhs)
    }
}

impl Sum for Paise {
    fn sum<I: Iterator<Item = Paise>>(iter: I) -> Paise {
        iter.fold(Paise::ZERO, Add::add)
    }
}

/// Renders as rupees: `₹45`, `₹45.50`, `-₹0.05`.
impl fmt::Display for Paise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let rupees = abs / 100;
        let paise = abs % 100;
        if paise == 0 {
            write!(f, "{sign}₹{rupees}")
        } else {
            write!(f, "{sign}₹{rupees}.{paise:02}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rupees_scales_by_hundred() {
        assert_eq!(Paise::from_rupees(50), Paise(5000));
        assert_eq!(Paise::from_rupees(0), Paise::ZERO);
        assert_eq!(Paise::from_rupees(-3), Paise(-300));
    }

    #[test]
    fn arithmetic_is_exact() {
        let total = Paise(1000) + Paise(500) + Paise(3500);
        assert_eq!(total, Paise::from_rupees(50));
        assert_eq!(Paise(5000) - Paise(4500), Paise(500));
        assert_eq!(Paise(3500) * 30, Paise(105_000));
    }

    #[test]
    fn sum_over_iterator() {
        let amounts = [Paise(450), Paise(220)];
        let total: Paise = amounts.into_iter().sum();
        assert_eq!(total, Paise(670));
        let empty: Paise = std::iter::empty::<Paise>().sum();
        assert_eq!(empty, Paise::ZERO);
    }

    #[test]
    fn display_renders_rupees() {
        assert_eq!(Paise::from_rupees(45).to_string(), "₹45");
        assert_eq!(Paise(4550).to_string(), "₹45.50");
        assert_eq!(Paise(-5).to_string(), "-₹0.05");
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&Paise(5000)).unwrap();
        assert_eq!(json, "5000");
        let back: Paise = serde_json::from_str("5000").unwrap();
        assert_eq!(back, Paise(5000));
    }
}
