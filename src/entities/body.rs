/// Integer axis-aligned rectangle used for every overlap test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Kinematic state shared by every simulated object
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: i32,
    pub height: i32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub active: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            vel_x: 0.0,
            vel_y: 0.0,
            active: true,
        }
    }

    pub fn with_velocity(mut self, vel_x: f32, vel_y: f32) -> Self {
        self.vel_x = vel_x;
        self.vel_y = vel_y;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width as f32 / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height as f32 / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height as f32
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}
