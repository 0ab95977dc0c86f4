/// World position of a unit.
///
/// Distances are planar (x/z); `y` is the height axis and is compared
/// separately by the engagement height threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Facing in radians.
    pub heading: f32,
}

impl Position {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        heading: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            heading: 0.0,
        }
    }

    /// Planar distance in yalms.
    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Absolute height difference.
    pub fn height_difference(&self, other: &Position) -> f32 {
        (self.y - other.y).abs()
    }

    /// Heading that faces `other` from this position.
    pub fn heading_to(&self, other: &Position) -> f32 {
        (other.z - self.z).atan2(other.x - self.x)
    }

    /// Returns the point `distance` yalms short of `other` along the line from
    /// this position. Returns `other` when already closer than `distance`.
    pub fn approach(&self, other: &Position, distance: f32) -> Position {
        let total = self.distance(other);
        if total <= distance || total == 0.0 {
            return *other;
        }

        let ratio = (total - distance) / total;
        Position {
            x: self.x + (other.x - self.x) * ratio,
            y: other.y,
            z: self.z + (other.z - self.z) * ratio,
            heading: self.heading_to(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_ignores_height() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 50.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.height_difference(&b), 50.0);
    }

    #[test]
    fn approach_stops_short_of_destination() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(10.0, 0.0, 0.0);

        let stop = a.approach(&b, 3.0);
        assert!((stop.x - 7.0).abs() < 1e-4);
        assert!((stop.distance(&b) - 3.0).abs() < 1e-4);
    }

    #[test]
    fn approach_returns_destination_when_already_close() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(1.0, 0.0, 0.0);
        assert_eq!(a.approach(&b, 3.0), b);
    }
}
