//! The noise shaders shipped with the gallery, in display order.
use uniforms::{ScalarParams, UniformSpec};

use crate::definition::ShaderDefinition;

const PERLIN_SOURCE: &str = include_str!("../shaders/perlin.frag.glsl");
const SIMPLEX_SOURCE: &str = include_str!("../shaders/simplex.frag.glsl");
const WORLEY_SOURCE: &str = include_str!("../shaders/worley.frag.glsl");
const ISLAND_SOURCE: &str = include_str!("../shaders/island.frag.glsl");
const ISLAND_PERLIN_SOURCE: &str = include_str!("../shaders/island-perlin.frag.glsl");
const ISLAND_SIMPLEX_SOURCE: &str = include_str!("../shaders/island-simplex.frag.glsl");

pub const DEFAULT_SHADER_ID: &str = "island-perlin";

pub fn builtin_shaders() -> Vec<(&'static str, ShaderDefinition)> {
    vec![
        ("perlin", fbm("Perlin", PERLIN_SOURCE, 0.75)),
        ("simplex", fbm("Simplex", SIMPLEX_SOURCE, 0.75)),
        ("worley", worley()),
        ("island", island()),
        (
            "island-perlin",
            masked_fbm("Island (Perlin)", ISLAND_PERLIN_SOURCE, 0.75),
        ),
        (
            "island-simplex",
            masked_fbm("Island (Simplex)", ISLAND_SIMPLEX_SOURCE, 0.4),
        ),
    ]
}

fn position() -> (&'static str, UniformSpec) {
    ("position", UniformSpec::vector2("Position", [0.0, 0.0]))
}

fn octaves() -> (&'static str, UniformSpec) {
    (
        "octaves",
        UniformSpec::int("Octaves", ScalarParams::new(4.0).with_range(1.0, 7.0)),
    )
}

fn radius_smooth() -> (&'static str, UniformSpec) {
    (
        "radius_smooth",
        UniformSpec::float("Radius Smooth", ScalarParams::new(0.202).with_step(0.001)),
    )
}

fn fbm(title: &str, source: &str, scale: f64) -> ShaderDefinition {
    ShaderDefinition::new(
        title,
        source,
        [
            position(),
            (
                "scale",
                UniformSpec::float("Scale", ScalarParams::new(scale).with_step(0.01)),
            ),
            octaves(),
        ],
    )
}

fn worley() -> ShaderDefinition {
    ShaderDefinition::new(
        "Worley",
        WORLEY_SOURCE,
        [
            position(),
            ("scale", UniformSpec::float("Scale", ScalarParams::new(10.0))),
            (
                "mode",
                UniformSpec::int("Mode", ScalarParams::new(0.0).with_range(0.0, 63.0)),
            ),
        ],
    )
}

fn island() -> ShaderDefinition {
    ShaderDefinition::new(
        "Island",
        ISLAND_SOURCE,
        [
            position(),
            ("scale", UniformSpec::float("Scale", ScalarParams::new(1.0))),
            (
                "radius",
                UniformSpec::float("Radius", ScalarParams::new(0.448).with_step(0.001)),
            ),
            radius_smooth(),
        ],
    )
}

fn masked_fbm(title: &str, source: &str, scale: f64) -> ShaderDefinition {
    ShaderDefinition::new(
        title,
        source,
        [
            position(),
            (
                "scale",
                UniformSpec::float("Scale", ScalarParams::new(scale).with_step(0.01)),
            ),
            octaves(),
            (
                "amplitude",
                UniformSpec::float(
                    "Amplitude",
                    ScalarParams::new(50.0)
                        .with_range(-100.0, 100.0)
                        .with_step(1.0)
                        .with_divider(100.0),
                ),
            ),
            (
                "radius",
                UniformSpec::float(
                    "Radius",
                    ScalarParams::new(44.8)
                        .with_range(0.0, 100.0)
                        .with_step(0.001)
                        .with_divider(100.0),
                ),
            ),
            radius_smooth(),
        ],
    )
}
