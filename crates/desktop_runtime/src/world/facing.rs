use super::Vec2;

/// Sprite direction, sampled from velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Idle,
    Up,
    TopLeft,
    Left,
    BottomLeft,
    Down,
    BottomRight,
    Right,
    TopRight,
}

impl Facing {
    /// Classifies a velocity into one of eight 45 degree sectors.
    ///
    /// Screen y grows downward, so positive angles point down.
    pub fn from_velocity(velocity: Vec2, threshold: f64) -> Self {
        if velocity.x.abs() <= threshold && velocity.y.abs() <= threshold {
            return Self::Idle;
        }
        let angle = velocity.y.atan2(velocity.x).to_degrees();
        match angle {
            a if (-22.5..22.5).contains(&a) => Self::Right,
            a if (22.5..67.5).contains(&a) => Self::BottomRight,
            a if (67.5..112.5).contains(&a) => Self::Down,
            a if (112.5..157.5).contains(&a) => Self::BottomLeft,
            a if !(-157.5..157.5).contains(&a) => Self::Left,
            a if (-157.5..-112.5).contains(&a) => Self::TopLeft,
            a if (-112.5..-67.5).contains(&a) => Self::Up,
            _ => Self::TopRight,
        }
    }

    pub const fn sprite_url(self) -> &'static str {
        match self {
            Self::Idle => "/assets/player/idle.gif",
            Self::Up => "/assets/player/walkingup.gif",
            Self::TopLeft => "/assets/player/walkingupleft.gif",
            Self::Left => "/assets/player/walkingleft.gif",
            Self::BottomLeft => "/assets/player/walkingdownleft.gif",
            Self::Down => "/assets/player/walkingdown.gif",
            Self::BottomRight => "/assets/player/walkingdownright.gif",
            Self::Right => "/assets/player/walkingright.gif",
            Self::TopRight => "/assets/player/walkingupright.gif",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn facing(x: f64, y: f64) -> Facing {
        Facing::from_velocity(Vec2 { x, y }, 0.1)
    }

    #[test]
    fn slow_velocity_is_idle() {
        assert_eq!(facing(0.1, -0.05), Facing::Idle);
        assert_eq!(facing(0.0, 0.0), Facing::Idle);
    }

    #[test]
    fn eight_sectors() {
        assert_eq!(facing(1.0, 0.0), Facing::Right);
        assert_eq!(facing(1.0, 1.0), Facing::BottomRight);
        assert_eq!(facing(0.0, 1.0), Facing::Down);
        assert_eq!(facing(-1.0, 1.0), Facing::BottomLeft);
        assert_eq!(facing(-1.0, 0.0), Facing::Left);
        assert_eq!(facing(-1.0, -0.0001), Facing::Left);
        assert_eq!(facing(-1.0, -1.0), Facing::TopLeft);
        assert_eq!(facing(0.0, -1.0), Facing::Up);
        assert_eq!(facing(1.0, -1.0), Facing::TopRight);
    }

    #[test]
    fn sprites_follow_direction() {
        assert_eq!(Facing::TopLeft.sprite_url(), "/assets/player/walkingupleft.gif");
        assert_eq!(Facing::Idle.sprite_url(), "/assets/player/idle.gif");
    }
}
