/// An 8 bit per channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Channels mapped to 0..1, as the fragment shaders expect them.
    pub fn to_vec4(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// One row of the per-corner `uvec4` color attribute.
    pub fn to_attrib_row(&self) -> [u32; 4] {
        [self.r as u32, self.g as u32, self.b as u32, self.a as u32]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// One color per quad corner, ordered upper-left, lower-left, upper-right, lower-right.
/// This is the vertex order of the quad triangle strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CornerColors(pub [Color; 4]);

impl CornerColors {
    pub const UPPER_LEFT: usize = 0;
    pub const LOWER_LEFT: usize = 1;
    pub const UPPER_RIGHT: usize = 2;
    pub const LOWER_RIGHT: usize = 3;

    pub fn new(upper_left: Color, lower_left: Color, upper_right: Color, lower_right: Color) -> Self {
        Self([upper_left, lower_left, upper_right, lower_right])
    }

    pub fn uniform(color: Color) -> Self {
        Self([color; 4])
    }

    pub fn corners(&self) -> &[Color; 4] {
        &self.0
    }

    pub fn to_attrib_rows(&self) -> [[u32; 4]; 4] {
        self.0.map(|c| c.to_attrib_row())
    }
}

impl From<Color> for CornerColors {
    fn from(color: Color) -> Self {
        CornerColors::uniform(color)
    }
}
