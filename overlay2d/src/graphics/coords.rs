//! Pixel space to clip space conversions for 2D quads.
//!
//! Every rectangle handed to the drawing functions is in pixels, with the origin at the
//! top-left of the screen and Y growing downward. The GPU wants clip space coordinates in
//! `[-1, 1]` with Y growing upward, and texture coordinates in `[0, 1]`.

/// Actual size of the screen (or of the viewport being drawn into), in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle given by its upper-left and lower-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T> {
    pub upper_left: [T; 2],
    pub lower_right: [T; 2],
}

impl<T: Copy + PartialOrd + std::ops::Sub<Output = T>> Rect<T> {
    pub const fn new(x0: T, y0: T, x1: T, y1: T) -> Self {
        Self {
            upper_left: [x0, y0],
            lower_right: [x1, y1],
        }
    }

    /// A rectangle is valid when its lower-right corner is not above or left of its upper-left one.
    pub fn is_valid(&self) -> bool {
        self.lower_right[0] >= self.upper_left[0] && self.lower_right[1] >= self.upper_left[1]
    }

    pub fn width(&self) -> T {
        self.lower_right[0] - self.upper_left[0]
    }

    pub fn height(&self) -> T {
        self.lower_right[1] - self.upper_left[1]
    }
}

impl Rect<f32> {
    /// Drops the fractional part of every coordinate (truncation toward zero).
    pub fn truncate(&self) -> Rect<i32> {
        Rect::new(
            self.upper_left[0] as i32,
            self.upper_left[1] as i32,
            self.lower_right[0] as i32,
            self.lower_right[1] as i32,
        )
    }
}

/// A destination rectangle, either snapped to whole pixels or sub-pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DestRect {
    Pixels(Rect<i32>),
    SubPixels(Rect<f32>),
}

impl DestRect {
    /// `[x0, y0, x1, y1]` as floats.
    pub fn corners(&self) -> [f32; 4] {
        match self {
            DestRect::Pixels(r) => [
                r.upper_left[0] as f32,
                r.upper_left[1] as f32,
                r.lower_right[0] as f32,
                r.lower_right[1] as f32,
            ],
            DestRect::SubPixels(r) => [
                r.upper_left[0],
                r.upper_left[1],
                r.lower_right[0],
                r.lower_right[1],
            ],
        }
    }

    /// The rectangle in whole pixels. Sub-pixel rectangles are truncated.
    pub fn to_pixels(&self) -> Rect<i32> {
        match self {
            DestRect::Pixels(r) => *r,
            DestRect::SubPixels(r) => r.truncate(),
        }
    }
}

impl From<Rect<i32>> for DestRect {
    fn from(rect: Rect<i32>) -> Self {
        DestRect::Pixels(rect)
    }
}

impl From<Rect<f32>> for DestRect {
    fn from(rect: Rect<f32>) -> Self {
        DestRect::SubPixels(rect)
    }
}

/// Where a quad lands on screen and which part of its texture it samples.
///
/// `center` and `size` are in clip space. `size` is the half extent, which is what the
/// quad shaders multiply their `[-1, 1]` corner positions by. `tex_center` and `tex_size`
/// follow the same center / half extent convention in texture space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuadPlacement {
    pub center: [f32; 2],
    pub size: [f32; 2],
    pub tex_center: [f32; 2],
    pub tex_size: [f32; 2],
}

impl QuadPlacement {
    /// Places a textured quad.
    ///
    /// Render targets are stored bottom-up, so their vertical texture axis is flipped.
    pub fn compute(
        screen: ScreenSize,
        texture_size: (u32, u32),
        is_render_target: bool,
        dest: DestRect,
        source: &Rect<i32>,
    ) -> Self {
        let mut placement = Self::screen_only(screen, dest);

        let tex_w = texture_size.0 as f32 * 2.0;
        let tex_h = texture_size.1 as f32 * 2.0;
        let [sx0, sy0] = source.upper_left;
        let [sx1, sy1] = source.lower_right;
        placement.tex_center = [(sx0 + sx1) as f32 / tex_w, (sy0 + sy1) as f32 / tex_h];
        placement.tex_size = [(sx1 - sx0) as f32 / tex_w, (sy1 - sy0) as f32 / tex_h];

        if is_render_target {
            placement.tex_size[1] = -placement.tex_size[1];
        }
        placement
    }

    /// Places an untextured quad; the texture fields stay zero.
    pub fn screen_only(screen: ScreenSize, dest: DestRect) -> Self {
        let screen_w = screen.width as f32;
        let screen_h = screen.height as f32;
        let [x0, y0, x1, y1] = dest.corners();
        Self {
            center: [(x0 + x1) / screen_w - 1.0, 1.0 - (y0 + y1) / screen_h],
            size: [(x1 - x0) / screen_w, (y1 - y0) / screen_h],
            tex_center: [0.0, 0.0],
            tex_size: [0.0, 0.0],
        }
    }
}

/// A scissor box in framebuffer space (origin at the bottom-left), as `glScissor` takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScissorBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScissorBox {
    /// Converts a top-left origin clip rectangle. Returns `None` for an invalid rectangle,
    /// in which case nothing should be drawn at all.
    pub fn from_clip(clip: &Rect<i32>, screen: ScreenSize) -> Option<Self> {
        if !clip.is_valid() {
            return None;
        }
        Some(Self {
            x: clip.upper_left[0],
            y: screen.height as i32 - clip.lower_right[1],
            width: clip.width(),
            height: clip.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn assert_close(actual: [f32; 2], expected: [f32; 2]) {
        assert!(
            (actual[0] - expected[0]).abs() < EPS && (actual[1] - expected[1]).abs() < EPS,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn center_and_size_for_pixel_rect() {
        let screen = ScreenSize::new(800, 600);
        let p = QuadPlacement::screen_only(screen, Rect::new(100, 50, 300, 250).into());
        assert_close(p.center, [400.0 / 800.0 - 1.0, 1.0 - 300.0 / 600.0]);
        assert_close(p.size, [200.0 / 800.0, 200.0 / 600.0]);
    }

    #[test]
    fn sub_pixel_rect_uses_the_same_formula() {
        let screen = ScreenSize::new(1024, 768);
        let p = QuadPlacement::screen_only(screen, Rect::new(10.5f32, 20.25, 110.5, 70.75).into());
        assert_close(p.center, [121.0 / 1024.0 - 1.0, 1.0 - 91.0 / 768.0]);
        assert_close(p.size, [100.0 / 1024.0, 50.5 / 768.0]);

        let snapped = QuadPlacement::screen_only(screen, Rect::new(10, 20, 110, 70).into());
        let unsnapped = QuadPlacement::screen_only(screen, Rect::new(10.0f32, 20.0, 110.0, 70.0).into());
        assert_eq!(snapped, unsnapped);
    }

    #[test]
    fn full_screen_rect_covers_clip_space() {
        let screen = ScreenSize::new(640, 480);
        let p = QuadPlacement::screen_only(screen, Rect::new(0, 0, 640, 480).into());
        assert_close(p.center, [0.0, 0.0]);
        assert_close(p.size, [1.0, 1.0]);
    }

    #[test]
    fn texture_coordinates_use_half_extents() {
        let screen = ScreenSize::new(640, 480);
        let source = Rect::new(16, 32, 48, 64);
        let p = QuadPlacement::compute(screen, (64, 128), false, Rect::new(0, 0, 32, 32).into(), &source);
        assert_close(p.tex_center, [64.0 / 128.0, 96.0 / 256.0]);
        assert_close(p.tex_size, [32.0 / 128.0, 32.0 / 256.0]);
        assert!(p.tex_size[1] > 0.0);
    }

    #[test]
    fn render_target_flips_vertical_texture_axis() {
        let screen = ScreenSize::new(640, 480);
        let dest: DestRect = Rect::new(5, 5, 69, 69).into();
        let source = Rect::new(0, 8, 32, 40);
        let plain = QuadPlacement::compute(screen, (64, 64), false, dest, &source);
        let flipped = QuadPlacement::compute(screen, (64, 64), true, dest, &source);
        assert_eq!(flipped.tex_size[1], -plain.tex_size[1]);
        assert_eq!(flipped.tex_size[0], plain.tex_size[0]);
        assert_eq!(flipped.tex_center, plain.tex_center);
        assert_eq!(flipped.center, plain.center);
    }

    #[test]
    fn opaque_64px_texture_in_top_left_corner() {
        let screen = ScreenSize::new(640, 480);
        let p = QuadPlacement::compute(
            screen,
            (64, 64),
            false,
            Rect::new(0, 0, 64, 64).into(),
            &Rect::new(0, 0, 64, 64),
        );
        assert_close(p.center, [64.0 / 640.0 - 1.0, 1.0 - 64.0 / 480.0]);
        assert_close(p.size, [64.0 / 640.0, 64.0 / 480.0]);
        assert_close(p.tex_center, [0.5, 0.5]);
        assert_close(p.tex_size, [0.5, 0.5]);
    }

    #[test]
    fn degenerate_rect_gives_zero_size_quad() {
        let p = QuadPlacement::screen_only(ScreenSize::new(100, 100), Rect::new(30, 30, 30, 30).into());
        assert_close(p.size, [0.0, 0.0]);
    }

    #[test]
    fn scissor_box_is_bottom_left_based() {
        let screen = ScreenSize::new(800, 600);
        let scissor = ScissorBox::from_clip(&Rect::new(10, 20, 110, 220), screen);
        assert_eq!(
            scissor,
            Some(ScissorBox {
                x: 10,
                y: 600 - 220,
                width: 100,
                height: 200,
            })
        );
    }

    #[test]
    fn inverted_clip_has_no_scissor_box() {
        let screen = ScreenSize::new(800, 600);
        assert!(ScissorBox::from_clip(&Rect::new(100, 0, 50, 10), screen).is_none());
        assert!(ScissorBox::from_clip(&Rect::new(0, 100, 10, 50), screen).is_none());
        // Zero area is still valid: it clips everything away.
        assert!(ScissorBox::from_clip(&Rect::new(5, 5, 5, 5), screen).is_some());
    }

    #[test]
    fn truncation_goes_toward_zero() {
        let r = Rect::new(1.9f32, -1.9, 10.5, 20.99).truncate();
        assert_eq!(r, Rect::new(1, -1, 10, 20));
        assert_eq!(DestRect::from(Rect::new(0.7f32, 0.2, 3.3, 4.8)).to_pixels(), Rect::new(0, 0, 3, 4));
    }
}
