//! GLSL bodies of the 2D programs. The `#version` line is prepended at compile time.
//!
//! Attribute locations are shared by every program: 0 position, 2 color, 3 texcoord.

/// Unit quad scaled by `size` around `center`, sampling around `texcenter`.
pub const TEXTURED_QUAD_VERTEX_SHADER_SOURCE: &str = r#"
    uniform vec2 center;
    uniform vec2 size;
    uniform vec2 texcenter;
    uniform vec2 texsize;
    layout (location = 0) in vec2 Position;
    layout (location = 3) in vec2 Texcoord;
    out vec2 uv;
    void main() {
        uv = Texcoord * texsize + texcenter;
        gl_Position = vec4(Position * size + center, 0.0, 1.0);
    }"#;

pub const TEXTURED_QUAD_FRAG_SHADER_SOURCE: &str = r#"precision mediump float;
    uniform sampler2D tex;
    in vec2 uv;
    out vec4 frag_color;
    void main() {
        frag_color = texture(tex, uv);
    }"#;

pub const UNIFORM_COLOR_TEXTURED_QUAD_FRAG_SHADER_SOURCE: &str = r#"precision mediump float;
    uniform sampler2D tex;
    uniform vec4 color;
    in vec2 uv;
    out vec4 frag_color;
    void main() {
        frag_color = texture(tex, uv) * color;
    }"#;

/// Same placement as the textured quad, plus one integer RGBA color per corner.
pub const COLOR_TEXTURED_QUAD_VERTEX_SHADER_SOURCE: &str = r#"
    uniform vec2 center;
    uniform vec2 size;
    uniform vec2 texcenter;
    uniform vec2 texsize;
    layout (location = 0) in vec2 Position;
    layout (location = 2) in uvec4 Color;
    layout (location = 3) in vec2 Texcoord;
    out vec2 uv;
    out vec4 corner_color;
    void main() {
        corner_color = vec4(Color) / 255.0;
        uv = Texcoord * texsize + texcenter;
        gl_Position = vec4(Position * size + center, 0.0, 1.0);
    }"#;

pub const COLOR_TEXTURED_QUAD_FRAG_SHADER_SOURCE: &str = r#"precision mediump float;
    uniform sampler2D tex;
    in vec2 uv;
    in vec4 corner_color;
    out vec4 frag_color;
    void main() {
        frag_color = texture(tex, uv) * corner_color;
    }"#;

pub const COLORED_QUAD_VERTEX_SHADER_SOURCE: &str = r#"
    uniform vec2 center;
    uniform vec2 size;
    layout (location = 0) in vec2 Position;
    void main() {
        gl_Position = vec4(Position * size + center, 0.0, 1.0);
    }"#;

pub const COLORED_QUAD_FRAG_SHADER_SOURCE: &str = r#"precision mediump float;
    uniform vec4 color;
    out vec4 frag_color;
    void main() {
        frag_color = color;
    }"#;

/// Vertices arrive in screen pixels (top-left origin) with a packed BGRA color.
pub const PRIMITIVE_LIST_VERTEX_SHADER_SOURCE: &str = r#"
    uniform vec2 screen_size;
    layout (location = 0) in vec3 Position;
    layout (location = 2) in vec4 Color;
    layout (location = 3) in vec2 Texcoord;
    out vec2 uv;
    out vec4 vertex_color;
    void main() {
        vertex_color = Color.zyxw;
        vec2 p = 2.0 * Position.xy / screen_size - 1.0;
        gl_Position = vec4(p.x, -p.y, 0.0, 1.0);
        uv = Texcoord;
    }"#;

pub const TRANSPARENT_FRAG_SHADER_SOURCE: &str = r#"precision mediump float;
    uniform sampler2D tex;
    uniform float custom_alpha;
    in vec2 uv;
    in vec4 vertex_color;
    out vec4 frag_color;
    void main() {
        vec4 col = texture(tex, uv) * vertex_color;
        col.a *= custom_alpha;
        frag_color = vec4(col.rgb * col.a, col.a);
    }"#;
