use serde::{Deserialize, Serialize};

/// Cardinal direction a d-lit image is lit from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One optional entry per lighting direction.
///
/// Used for file paths, decoded images and unit-interval planes alike. An
/// absent direction is `None`, never a placeholder image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalSet<T> {
    pub top: Option<T>,
    pub bottom: Option<T>,
    pub left: Option<T>,
    pub right: Option<T>,
}

impl<T> Default for DirectionalSet<T> {
    fn default() -> Self {
        Self {
            top: None,
            bottom: None,
            left: None,
            right: None,
        }
    }
}

impl<T> DirectionalSet<T> {
    pub fn get(&self, direction: Direction) -> Option<&T> {
        match direction {
            Direction::Top => self.top.as_ref(),
            Direction::Bottom => self.bottom.as_ref(),
            Direction::Left => self.left.as_ref(),
            Direction::Right => self.right.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, direction: Direction) -> &mut Option<T> {
        match direction {
            Direction::Top => &mut self.top,
            Direction::Bottom => &mut self.bottom,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Present entries in `Direction::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|v| (d, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Transform every present entry, short-circuiting on the first error.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(Direction, &T) -> Result<U, E>,
    ) -> Result<DirectionalSet<U>, E> {
        let mut out = DirectionalSet::default();
        for (direction, value) in self.iter() {
            *out.slot_mut(direction) = Some(f(direction, value)?);
        }
        Ok(out)
    }

    /// Fill entries absent in `self` from `fallback`.
    pub fn or(mut self, fallback: DirectionalSet<T>) -> Self {
        self.top = self.top.or(fallback.top);
        self.bottom = self.bottom.or(fallback.bottom);
        self.left = self.left.or(fallback.left);
        self.right = self.right.or(fallback.right);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_follows_direction_order() {
        let set = DirectionalSet {
            top: None,
            bottom: Some(2),
            left: None,
            right: Some(4),
        };
        let seen: Vec<_> = set.iter().map(|(d, v)| (d, *v)).collect();
        assert_eq!(seen, vec![(Direction::Bottom, 2), (Direction::Right, 4)]);
        assert_eq!(set.len(), 2);
        assert!(DirectionalSet::<u8>::default().is_empty());
    }

    #[test]
    fn or_keeps_present_entries() {
        let primary = DirectionalSet {
            top: Some("a"),
            ..Default::default()
        };
        let fallback = DirectionalSet {
            top: Some("b"),
            left: Some("c"),
            ..Default::default()
        };
        let merged = primary.or(fallback);
        assert_eq!(merged.top, Some("a"));
        assert_eq!(merged.left, Some("c"));
        assert_eq!(merged.right, None);
    }
}
