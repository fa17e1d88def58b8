use std::fmt;

/// A city from an instance's coordinate section.
///
/// `id` keeps the literal token from the instance file so it compares exactly
/// against tour-file tokens (`"07"` and `"7"` are different cities).
#[derive(Clone, Debug, PartialEq)]
pub struct City {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    /// Straight-line distance, using `hypot` to avoid overflow on large coordinates.
    pub fn dist(&self, rhs: &Self) -> f64 {
        (self.x - rhs.x).hypot(self.y - rhs.y)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(f, "{} {} {}", self.id, b1.format(self.x), b2.format(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::City;

    #[test]
    fn dist_is_symmetric_and_zero_for_same_city() {
        let a = City::new("1", 0.0, 0.0);
        let b = City::new("2", 3.0, 4.0);

        assert_eq!(a.dist(&b), 5.0);
        assert_eq!(b.dist(&a), 5.0);
        assert_eq!(a.dist(&a), 0.0);
    }

    #[test]
    fn dist_does_not_overflow_on_extreme_coordinates() {
        let a = City::new("1", 0.0, 0.0);
        let b = City::new("2", 1e300, 1e300);

        let d = a.dist(&b);
        assert!(d.is_finite());
        assert!((d / 1e300 - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn display_formats_id_and_coordinates() {
        let city = City::new("12", 1.5, -2.25);
        assert_eq!(city.to_string(), "12 1.5 -2.25");
    }
}
