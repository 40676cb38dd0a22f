use super::body::Rect;

/// Static level geometry; never moves once the world is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    bounds: Rect,
}

impl Platform {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            bounds: Rect::new(x, y, width, height),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn top(&self) -> f32 {
        self.bounds.y as f32
    }
}

/// Industrial stage layout for the 900x700 world
pub fn default_layout() -> Vec<Platform> {
    vec![
        // Ground floor
        Platform::new(0, 640, 900, 60),
        // Low shelves
        Platform::new(50, 510, 220, 18),
        Platform::new(630, 510, 220, 18),
        // Centre bridge
        Platform::new(280, 430, 340, 18),
        // High gantries
        Platform::new(60, 310, 200, 18),
        Platform::new(640, 310, 200, 18),
        // Top catwalk
        Platform::new(310, 190, 280, 18),
    ]
}
