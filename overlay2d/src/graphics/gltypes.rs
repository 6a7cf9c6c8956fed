/// Internal representation for the OpenGL attribute types used by the 2D shaders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GLTypes {
    Vec2,
    Vec3,
    /// Four unsigned bytes, normalized to 0..1 in the shader (packed vertex color).
    ColorU8x4,
    /// Four unsigned 32 bit integers, read as an integer `uvec4` in the shader.
    UVec4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageHint {
    Position,
    Normal,
    TexCoord,
    Color,
    Tangent,
}

/// How the GPU should interpret one component of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttribKind {
    Float,
    NormalizedU8,
    UnsignedInt,
}

impl GLTypes {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            GLTypes::Vec2 => 8,
            GLTypes::Vec3 => 12,
            GLTypes::ColorU8x4 => 4,
            GLTypes::UVec4 => 16,
        }
    }

    pub fn component_count(&self) -> usize {
        match self {
            GLTypes::Vec2 => 2,
            GLTypes::Vec3 => 3,
            GLTypes::ColorU8x4 => 4,
            GLTypes::UVec4 => 4,
        }
    }

    pub fn attrib_kind(&self) -> AttribKind {
        match self {
            GLTypes::Vec2 | GLTypes::Vec3 => AttribKind::Float,
            GLTypes::ColorU8x4 => AttribKind::NormalizedU8,
            GLTypes::UVec4 => AttribKind::UnsignedInt,
        }
    }
}

/// One attribute pointer, ready to be handed to `glVertexAttrib(I)Pointer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttrib {
    pub location: u32,
    pub components: i32,
    pub kind: AttribKind,
    pub stride: i32,
    pub offset: i32,
}

impl VertexAttrib {
    /// Integer attributes go through `glVertexAttribIPointer` and are never normalized.
    pub fn is_integer(&self) -> bool {
        self.kind == AttribKind::UnsignedInt
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutField {
    pub name: String,
    pub gl_type: GLTypes,
    pub usage: Option<UsageHint>,
    pub location: u32,
}

/// Represents how a piece of vertex data is supposed to be understood by the GPU.
/// This is akin to a type, but it exists at runtime for introspection.
///
/// In OpenGL, all data is stored in a buffer containing bytes.
/// This array of bytes is interpreted as SomeType[] where SomeType is a struct with various fields.
/// DataLayout is a runtime representation of SomeType.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataLayout {
    pub fields: Vec<LayoutField>,
}

impl DataLayout {
    pub fn new() -> Self {
        Self { fields: vec![] }
    }

    /// Adds a field bound to an explicit attribute location.
    /// The 2D shaders share fixed locations (position 0, color 2, texcoord 3) with the 3D ones.
    pub fn add_field_at(
        &mut self,
        location: u32,
        name: &str,
        gl_type: GLTypes,
        usage: Option<UsageHint>,
    ) -> &mut Self {
        self.fields.push(LayoutField {
            name: name.to_string(),
            gl_type,
            usage,
            location,
        });
        self
    }

    /// Returns the size in bytes of one row of the layout
    pub fn stride(&self) -> usize {
        self.fields.iter().map(|f| f.gl_type.size_in_bytes()).sum()
    }

    /// The attribute pointers of this layout, with offsets packed in field order.
    pub fn attribs(&self) -> Vec<VertexAttrib> {
        let stride = self.stride() as i32;
        let mut offset = 0;
        self.fields
            .iter()
            .map(|field| {
                let attrib = VertexAttrib {
                    location: field.location,
                    components: field.gl_type.component_count() as i32,
                    kind: field.gl_type.attrib_kind(),
                    stride,
                    offset,
                };
                offset += field.gl_type.size_in_bytes() as i32;
                attrib
            })
            .collect()
    }

    /// Checks that a vertex buffer only contains complete rows for this layout.
    pub fn is_sound(&self, vertices: &[u8]) -> Option<String> {
        let stride = self.stride();
        // 0 data per row means the buffer needs to be empty for this to be valid.
        if stride == 0 {
            if vertices.is_empty() {
                return None;
            }
            return Some("Layout has no data, but buffer is not empty".to_string());
        }
        if !vertices.len().is_multiple_of(stride) {
            return Some(format!(
                "A row is incomplete, the row is made of {stride} bytes but the vertex buffer has {} bytes",
                vertices.len()
            ));
        }
        None
    }
}

/// Describes the vertex struct the caller's raw vertex bytes are made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexLayout {
    /// position, normal, packed color, texcoord
    Standard,
    /// `Standard` followed by a second texcoord
    TwoTexCoords,
    /// `Standard` followed by a tangent and a binormal
    Tangents,
}

impl VertexLayout {
    pub fn data_layout(&self) -> DataLayout {
        let mut layout = DataLayout::new();
        layout
            .add_field_at(0, "Position", GLTypes::Vec3, Some(UsageHint::Position))
            .add_field_at(1, "Normal", GLTypes::Vec3, Some(UsageHint::Normal))
            .add_field_at(2, "Color", GLTypes::ColorU8x4, Some(UsageHint::Color))
            .add_field_at(3, "Texcoord", GLTypes::Vec2, Some(UsageHint::TexCoord));
        match self {
            VertexLayout::Standard => {}
            VertexLayout::TwoTexCoords => {
                layout.add_field_at(4, "SecondTexcoord", GLTypes::Vec2, Some(UsageHint::TexCoord));
            }
            VertexLayout::Tangents => {
                layout
                    .add_field_at(5, "Tangent", GLTypes::Vec3, Some(UsageHint::Tangent))
                    .add_field_at(6, "Bitangent", GLTypes::Vec3, Some(UsageHint::Tangent));
            }
        }
        layout
    }

    pub fn stride(&self) -> usize {
        self.data_layout().stride()
    }
}

/// How a list of vertices is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    Points,
    LineStrip,
    LineLoop,
    Lines,
    TriangleStrip,
    TriangleFan,
    Triangles,
}

impl PrimitiveTopology {
    pub fn to_gl_enum(&self) -> u32 {
        match self {
            PrimitiveTopology::Points => glow::POINTS,
            PrimitiveTopology::LineStrip => glow::LINE_STRIP,
            PrimitiveTopology::LineLoop => glow::LINE_LOOP,
            PrimitiveTopology::Lines => glow::LINES,
            PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
            PrimitiveTopology::TriangleFan => glow::TRIANGLE_FAN,
            PrimitiveTopology::Triangles => glow::TRIANGLES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexWidth {
    U16,
    U32,
}

impl IndexWidth {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            IndexWidth::U16 => 2,
            IndexWidth::U32 => 4,
        }
    }

    pub fn to_gl_enum(&self) -> u32 {
        match self {
            IndexWidth::U16 => glow::UNSIGNED_SHORT,
            IndexWidth::U32 => glow::UNSIGNED_INT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_strides() {
        assert_eq!(VertexLayout::Standard.stride(), 36);
        assert_eq!(VertexLayout::TwoTexCoords.stride(), 44);
        assert_eq!(VertexLayout::Tangents.stride(), 60);
    }

    #[test]
    fn standard_layout_locations_and_offsets() {
        let attribs = VertexLayout::Standard.data_layout().attribs();
        let summary: Vec<(u32, i32, i32)> = attribs
            .iter()
            .map(|a| (a.location, a.components, a.offset))
            .collect();
        assert_eq!(summary, vec![(0, 3, 0), (1, 3, 12), (2, 4, 24), (3, 2, 28)]);
        assert!(attribs.iter().all(|a| a.stride == 36));
        assert_eq!(attribs[2].kind, AttribKind::NormalizedU8);
    }

    #[test]
    fn tangent_layout_skips_second_texcoord_location() {
        let locations: Vec<u32> = VertexLayout::Tangents
            .data_layout()
            .attribs()
            .iter()
            .map(|a| a.location)
            .collect();
        assert_eq!(locations, vec![0, 1, 2, 3, 5, 6]);
    }

    #[test]
    fn explicit_locations_pack_offsets_in_field_order() {
        let mut layout = DataLayout::new();
        layout
            .add_field_at(4, "a", GLTypes::Vec2, None)
            .add_field_at(2, "b", GLTypes::UVec4, Some(UsageHint::Color));
        let attribs = layout.attribs();
        assert_eq!(attribs[1].location, 2);
        assert_eq!(attribs[1].offset, 8);
        assert_eq!(attribs[1].stride, 24);
        assert!(attribs[1].is_integer());
    }

    #[test]
    fn incomplete_rows_are_not_sound() {
        let layout = VertexLayout::Standard.data_layout();
        assert!(layout.is_sound(&[0u8; 72]).is_none());
        assert!(layout.is_sound(&[0u8; 40]).is_some());
        assert!(DataLayout::new().is_sound(&[]).is_none());
        assert!(DataLayout::new().is_sound(&[1]).is_some());
    }
}
