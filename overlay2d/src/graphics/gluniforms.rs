#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
    Int(i32),
}

/// Uniform values for one draw call, applied in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Uniforms {
    pub data: Vec<(&'static str, UniformValue)>,
}

impl Uniforms {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn add(&mut self, name: &'static str, value: UniformValue) -> &mut Self {
        self.data.push((name, value));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.data.iter().map(|(n, _)| *n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_keep_insertion_order() {
        let mut uniforms = Uniforms::new();
        uniforms
            .add("center", UniformValue::Vec2([0.0, 0.0]))
            .add("custom_alpha", UniformValue::Float(0.5))
            .add("color", UniformValue::Vec4([1.0; 4]));
        assert_eq!(
            uniforms.names().collect::<Vec<_>>(),
            vec!["center", "custom_alpha", "color"]
        );
        assert_eq!(uniforms.data[1].1, UniformValue::Float(0.5));
    }
}
