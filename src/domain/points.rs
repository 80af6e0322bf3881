use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Loyalty points, kept at a fixed two-digit scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Points(Decimal);

impl Points {
    pub const TARGET_DECIMALS: u32 = 2;

    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Normalises to two decimals, ties go to the even neighbour.
    pub fn new(value: Decimal) -> Self {
        let mut rounded =
            value.round_dp_with_strategy(Self::TARGET_DECIMALS, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(Self::TARGET_DECIMALS);
        Self(rounded)
    }

    #[cfg(test)]
    pub fn from_decimal_str(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        s.parse::<Decimal>().ok().map(Self::new)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl From<u32> for Points {
    fn from(value: u32) -> Self {
        Self::new(Decimal::from(value))
    }
}

impl core::fmt::Display for Points {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// The wire carries plain JSON numbers.
impl Serialize for Points {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self
            .0
            .to_f64()
            .ok_or_else(|| serde::ser::Error::custom(format!("Points out of range: {}", self.0)))?;
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for Points {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Decimal accepts integers, floats and strings alike. The inherent
        // `Decimal::deserialize` reads raw bytes, so name the serde impl.
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Ok(Points::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::Points;

    #[test]
    fn bankers_round_half_even() {
        let v = Points::from_decimal_str("1.245").unwrap();
        assert_eq!(format!("{}", v), "1.24");
        let v = Points::from_decimal_str("1.255").unwrap();
        assert_eq!(format!("{}", v), "1.26");
        let v = Points::from_decimal_str("-1.245").unwrap();
        assert_eq!(format!("{}", v), "-1.24");
        let v = Points::from_decimal_str("150").unwrap();
        assert_eq!(format!("{}", v), "150.00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Points::from_decimal_str("").is_none());
        assert!(Points::from_decimal_str("12a").is_none());
        assert!(Points::from_decimal_str("1.2.3").is_none());
    }

    #[test]
    fn reads_json_numbers_and_strings() {
        let v: Points = serde_json::from_str("729.98").unwrap();
        assert_eq!(v, Points::from_decimal_str("729.98").unwrap());
        let v: Points = serde_json::from_str("500").unwrap();
        assert_eq!(v, Points::from(500));
        let v: Points = serde_json::from_str("\"42.5\"").unwrap();
        assert_eq!(format!("{}", v), "42.50");
    }

    #[test]
    fn reads_csv_fields_through_serde() {
        #[derive(serde::Deserialize)]
        struct Row {
            amount: Points,
        }

        let mut reader = csv::Reader::from_reader("amount\n12.345\n7\n".as_bytes());
        let rows: Vec<Points> = reader
            .deserialize::<Row>()
            .map(|row| row.unwrap().amount)
            .collect();
        assert_eq!(rows, vec![Points::from_decimal_str("12.34").unwrap(), Points::from(7)]);
    }

    #[test]
    fn writes_json_numbers() {
        let v = Points::from_decimal_str("99.5").unwrap();
        assert_eq!(serde_json::to_string(&v).unwrap(), "99.5");
    }
}
