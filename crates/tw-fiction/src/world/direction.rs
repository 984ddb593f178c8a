use std::fmt;

/// Direction of an exit between rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// North.
    North,
    /// Northeast.
    Northeast,
    /// Northwest.
    Northwest,
    /// South.
    South,
    /// Southeast.
    Southeast,
    /// Southwest.
    Southwest,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Left.
    Left,
    /// Right.
    Right,
}

impl Direction {
    /// Every direction, in declaration order.
    pub const ALL: [Direction; 12] = [
        Self::North,
        Self::Northeast,
        Self::Northwest,
        Self::South,
        Self::Southeast,
        Self::Southwest,
        Self::East,
        Self::West,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
    ];

    /// Parse a full direction name, ignoring case. Abbreviations and
    /// prefixes are not directions.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::South => "south",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Capitalized name, as shown in exit listings.
    pub fn title(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::Northeast => "Northeast",
            Self::Northwest => "Northwest",
            Self::South => "South",
            Self::Southeast => "Southeast",
            Self::Southwest => "Southwest",
            Self::East => "East",
            Self::West => "West",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }

    /// The direction leading back.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Northeast => Self::Southwest,
            Self::Southwest => Self::Northeast,
            Self::Northwest => Self::Southeast,
            Self::Southeast => Self::Northwest,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Direction::parse("east"), Some(Direction::East));
        assert_eq!(Direction::parse("EAST"), Some(Direction::East));
        assert_eq!(Direction::parse("NorthWest"), Some(Direction::Northwest));
        assert_eq!(Direction::parse("left"), Some(Direction::Left));
    }

    #[test]
    fn parse_rejects_prefixes_and_abbreviations() {
        assert_eq!(Direction::parse("e"), None);
        assert_eq!(Direction::parse("nor"), None);
        assert_eq!(Direction::parse("northward"), None);
        assert_eq!(Direction::parse(""), None);
    }

    #[test]
    fn every_name_round_trips() {
        for d in Direction::ALL {
            assert_eq!(Direction::parse(d.name()), Some(d));
            assert_eq!(Direction::parse(d.title()), Some(d));
        }
    }

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::ALL {
            assert_ne!(d.opposite(), d);
            assert_eq!(d.opposite().opposite(), d);
        }
        assert_eq!(Direction::Northeast.opposite(), Direction::Southwest);
    }

    #[test]
    fn display_is_title_case() {
        assert_eq!(Direction::Up.to_string(), "Up");
    }
}
