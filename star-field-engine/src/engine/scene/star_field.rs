/// Billboarded star point cloud with per-star colour and pixel size
use bevy::asset::RenderAssetUsages;
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::mesh::{
    Indices, MeshVertexAttribute, MeshVertexBufferLayoutRef, PrimitiveTopology,
};
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError, VertexFormat,
};
use constants::class::{UNKNOWN_CLASS_HSL, spectral_class};
use constants::render_settings::{
    HIGHLIGHT_LIGHTNESS_BOOST, HIGHLIGHT_SIZE_FACTOR, STAR_SIZE_MAX, STAR_SIZE_MIN,
    STAR_SIZE_PIVOT,
};

use super::error::SceneBuildError;
use crate::engine::catalog::Star;

const STAR_FIELD_SHADER: &str = "shaders/star_field.wgsl";

/// Quad corner in [-1, 1]², expanded to a screen-space square in the shader.
pub const ATTRIBUTE_STAR_CORNER: MeshVertexAttribute =
    MeshVertexAttribute::new("StarCorner", 988_540_917, VertexFormat::Float32x2);

/// Point diameter in pixels.
pub const ATTRIBUTE_STAR_SIZE: MeshVertexAttribute =
    MeshVertexAttribute::new("StarSize", 988_540_918, VertexFormat::Float32);

const QUAD_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Additively blended star material.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct StarFieldMaterial {
    /// x: global size scale, y: opacity.
    #[uniform(0)]
    pub params: Vec4,
}

impl Default for StarFieldMaterial {
    fn default() -> Self {
        Self {
            params: Vec4::new(1.0, 1.0, 0.0, 0.0),
        }
    }
}

impl Material for StarFieldMaterial {
    fn vertex_shader() -> ShaderRef {
        STAR_FIELD_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        STAR_FIELD_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_STAR_CORNER.at_shader_location(1),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
            ATTRIBUTE_STAR_SIZE.at_shader_location(3),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        Ok(())
    }
}

/// Palette colour for a star; highlighted stars are lighter.
pub fn star_colour(star: &Star, highlighted: bool) -> Color {
    let (hue, saturation, mut lightness) = star
        .spectral_letter()
        .and_then(spectral_class)
        .map(|class| class.hsl)
        .unwrap_or(UNKNOWN_CLASS_HSL);
    if highlighted {
        lightness = (lightness + HIGHLIGHT_LIGHTNESS_BOOST).min(1.0);
    }
    Color::hsl(hue * 360.0, saturation, lightness)
}

/// Brighter (lower magnitude) stars are drawn larger.
pub fn star_size(star: &Star, highlighted: bool) -> f32 {
    let magnitude = star.apparent_magnitude;
    let base = if magnitude.is_finite() {
        (STAR_SIZE_PIVOT - magnitude).clamp(STAR_SIZE_MIN, STAR_SIZE_MAX)
    } else {
        STAR_SIZE_MIN
    };
    if highlighted {
        base * HIGHLIGHT_SIZE_FACTOR
    } else {
        base
    }
}

/// Build the star-field mesh: one quad per star, in input order.
///
/// Stars tagged with `highlight` (the selected constellation) get the
/// highlight colour and size.
pub fn build_star_field_mesh(
    stars: &[Star],
    highlight: Option<&str>,
) -> Result<Mesh, SceneBuildError> {
    let mut positions = Vec::with_capacity(stars.len() * 4);
    let mut corners = Vec::with_capacity(stars.len() * 4);
    let mut colours = Vec::with_capacity(stars.len() * 4);
    let mut sizes = Vec::with_capacity(stars.len() * 4);
    let mut indices = Vec::with_capacity(stars.len() * 6);

    for (i, star) in stars.iter().enumerate() {
        let position = star.world_position();
        if !position.is_finite() {
            return Err(SceneBuildError::NonFiniteGeometry {
                node: format!("star {}", star.id),
            });
        }
        let highlighted = highlight.is_some_and(|code| star.in_constellation(code));
        let colour = star_colour(star, highlighted).to_linear().to_f32_array();
        let size = star_size(star, highlighted);

        for corner in QUAD_CORNERS {
            positions.push(position.to_array());
            corners.push(corner);
            colours.push(colour);
            sizes.push(size);
        }
        let base = (i * 4) as u32;
        indices.extend(QUAD_INDICES.iter().map(|k| base + k));
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(ATTRIBUTE_STAR_CORNER, corners);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colours);
    mesh.insert_attribute(ATTRIBUTE_STAR_SIZE, sizes);
    mesh.insert_indices(Indices::U32(indices));
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(id: u32, mag: f32, spectral: Option<&str>) -> Star {
        let mut star = Star::new(id, [1.0, 0.0, -1.0], mag, 1.0);
        star.spectral_type = spectral.map(str::to_string);
        star.constellation_code = Some("Cas".to_string());
        star
    }

    #[test]
    fn size_has_floor_ceiling_and_highlight() {
        assert_eq!(star_size(&star(1, 1.0, None), false), 9.0);
        assert_eq!(star_size(&star(1, 9.5, None), false), 2.0);
        assert_eq!(star_size(&star(1, -26.7, None), false), 12.0);
        assert_eq!(star_size(&star(1, f32::NAN, None), false), 2.0);
        assert_eq!(star_size(&star(1, 4.0, None), true), 9.0);
    }

    fn assert_hsl(colour: Color, expected: (f32, f32, f32)) {
        let hsla = Hsla::from(colour);
        assert!((hsla.hue - expected.0).abs() < 1e-3, "hue {}", hsla.hue);
        assert!((hsla.saturation - expected.1).abs() < 1e-5);
        assert!((hsla.lightness - expected.2).abs() < 1e-5);
    }

    #[test]
    fn colour_follows_class_palette() {
        assert_hsl(star_colour(&star(1, 1.0, Some("G2V")), false), (144.0, 1.0, 0.5));
        assert_hsl(star_colour(&star(1, 1.0, None), false), (0.0, 0.0, 1.0));
        assert_hsl(star_colour(&star(1, 1.0, Some("M0")), true), (108.0, 1.0, 0.6));
        assert_hsl(star_colour(&star(1, 1.0, Some("O5")), true), (216.0, 1.0, 1.0));
    }

    #[test]
    fn mesh_has_one_quad_per_star() {
        let stars = [star(1, 1.0, Some("A0")), star(2, 3.0, None)];
        let mesh = build_star_field_mesh(&stars, None).unwrap();
        assert_eq!(mesh.count_vertices(), 8);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(12));
        let Some(bevy::render::mesh::VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        assert_eq!(positions[0], [100.0, 0.0, -100.0]);
    }

    #[test]
    fn highlighted_stars_are_larger() {
        let stars = [star(1, 4.0, None)];
        let mesh = build_star_field_mesh(&stars, Some("Cas")).unwrap();
        let Some(bevy::render::mesh::VertexAttributeValues::Float32(sizes)) =
            mesh.attribute(ATTRIBUTE_STAR_SIZE)
        else {
            panic!("sizes missing");
        };
        assert_eq!(sizes[0], 9.0);
    }

    #[test]
    fn non_finite_positions_abort_the_build() {
        let mut bad = star(3, 1.0, None);
        bad.position = [f32::INFINITY, 0.0, 0.0];
        assert!(matches!(
            build_star_field_mesh(&[bad], None),
            Err(SceneBuildError::NonFiniteGeometry { .. })
        ));
    }
}
