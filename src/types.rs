#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Unit vector for a heading in degrees, 0 pointing along +x.
    pub fn from_degrees(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Vector2D::new(radians.cos(), radians.sin())
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }

    pub fn add(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(&self, other: Vector2D) -> f64 {
        self.sub(other).length()
    }
}

/// Playfield dimensions shared by every entity update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Arena { width, height }
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Toroidal wrap used by the ship: the result always lies in `[0, max)`.
pub fn wrap_coordinate(value: f64, max: f64) -> f64 {
    let wrapped = value % max;
    if wrapped < 0.0 {
        wrapped + max
    } else {
        wrapped
    }
}

/// Edge teleport used by asteroids and projectiles. Leaving `[-margin, max + margin]`
/// on one side puts the entity on the opposite boundary of that band.
pub fn teleport_coordinate(value: f64, max: f64, margin: f64) -> f64 {
    if value < -margin {
        max + margin
    } else if value > max + margin {
        -margin
    } else {
        value
    }
}

/// Circle overlap test used for every entity pair.
pub fn circles_overlap(a: Vector2D, radius_a: f64, b: Vector2D, radius_b: f64) -> bool {
    let reach = radius_a + radius_b;
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy < reach * reach
}
