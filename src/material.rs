//! Blinn-Phong MTL materials to glTF metallic-roughness materials.

use crate::error::Result;
use crate::json::material::{NormalTexture, OcclusionTexture};
use crate::json::{AlphaMode, Checked, Index, Material, PbrMetallicRoughness, Texture, TextureInfo};
use crate::mtl;

/// Base colour used when a material has no `Kd`.
pub const DEFAULT_DIFFUSE: [f32; 3] = [0.315, 0.315, 0.315];

/// Roughness estimated from the specular exponent. Lossy and not physically
/// derived; downstream output depends on the exact formula.
pub fn roughness(specular_exponent: Option<f32>) -> f32 {
    (1.0 - specular_exponent.unwrap_or(0.0) / 1000.0).clamp(0.0, 1.0)
}

/// Translate one MTL material. `resolve` turns a map file name into a
/// texture, or `None` if the file cannot be used.
pub fn convert_material<F>(name: &str, mtl: &mtl::Material, mut resolve: F) -> Result<Material>
where
    F: FnMut(&str) -> Result<Option<Index<Texture>>>,
{
    let mut material = Material {
        name: Some(name.to_string()),
        ..Material::default()
    };

    let mut metallic = 0.0;
    let mut roughness_factor = None;
    if mtl.specular.is_some() {
        roughness_factor = Some(roughness(mtl.specular_exponent));
    }

    let mut emissive = mtl.emissive.as_ref().map(|c| c.to_rgb());
    let mut base_rgb = mtl
        .diffuse
        .as_ref()
        .map(|c| c.to_rgb())
        .unwrap_or(DEFAULT_DIFFUSE);
    let mut base_color_texture = None;
    let mut metallic_roughness_texture = None;

    if let Some(file) = &mtl.emissive_map {
        if let Some(texture) = resolve(file)? {
            emissive = Some([1.0, 1.0, 1.0]);
            material.emissive_texture = Some(TextureInfo::new(texture));
        }
    }
    if let Some(file) = &mtl.diffuse_map {
        if let Some(texture) = resolve(file)? {
            base_rgb = [1.0, 1.0, 1.0];
            base_color_texture = Some(TextureInfo::new(texture));
        }
    }
    if let Some(file) = &mtl.specular_map {
        metallic = 1.0;
        metallic_roughness_texture = resolve(file)?.map(TextureInfo::new);
    }
    if let Some(file) = &mtl.bump_map {
        material.normal_texture = resolve(file)?.map(|index| NormalTexture {
            index,
            tex_coord: None,
            scale: Some(1.0),
        });
    }
    if let Some(file) = &mtl.ambient_map {
        material.occlusion_texture = resolve(file)?.map(|index| OcclusionTexture {
            index,
            tex_coord: None,
            strength: None,
        });
    }

    let (alpha, transparent) = match mtl.dissolve_map {
        Some(_) => (1.0, true),
        None => {
            let alpha = mtl.dissolve.unwrap_or(1.0);
            (alpha, alpha < 1.0)
        }
    };

    material.emissive_factor = emissive;
    material.double_sided = transparent;
    material.alpha_mode = Some(Checked::Valid(if transparent {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    }));
    material.pbr_metallic_roughness = Some(PbrMetallicRoughness {
        base_color_factor: Some([base_rgb[0], base_rgb[1], base_rgb[2], alpha]),
        base_color_texture,
        metallic_factor: Some(metallic),
        roughness_factor,
        metallic_roughness_texture,
    });
    Ok(material)
}

/// A copy of `material` with no base-colour texture, for primitives that have
/// no texture coordinates to sample it with.
pub fn without_base_color_texture(material: &Material) -> Option<Material> {
    let pbr = material.pbr_metallic_roughness.as_ref()?;
    pbr.base_color_texture.as_ref()?;
    let mut stripped = material.clone();
    if let Some(pbr) = stripped.pbr_metallic_roughness.as_mut() {
        pbr.base_color_texture = None;
    }
    Some(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mtl::{parse_mtl, MtlColor};
    use float_cmp::approx_eq;

    fn no_textures(_: &str) -> Result<Option<Index<Texture>>> {
        Ok(None)
    }

    fn pbr(material: &Material) -> &PbrMetallicRoughness {
        material.pbr_metallic_roughness.as_ref().unwrap()
    }

    #[test]
    fn roughness_formula() {
        assert!(approx_eq!(f32, roughness(None), 1.0));
        assert!(approx_eq!(f32, roughness(Some(250.0)), 0.75));
        assert!(approx_eq!(f32, roughness(Some(5000.0)), 0.0));
        assert!(approx_eq!(f32, roughness(Some(-10.0)), 1.0));
    }

    #[test]
    fn plain_material() {
        let material = convert_material("empty", &mtl::Material::default(), no_textures).unwrap();
        assert_eq!(material.name.as_deref(), Some("empty"));
        assert_eq!(pbr(&material).base_color_factor, Some([0.315, 0.315, 0.315, 1.0]));
        assert_eq!(pbr(&material).metallic_factor, Some(0.0));
        assert_eq!(pbr(&material).roughness_factor, None);
        assert_eq!(material.alpha_mode, Some(Checked::Valid(AlphaMode::Opaque)));
        assert!(!material.double_sided);
        assert_eq!(material.emissive_factor, None);
    }

    #[test]
    fn blinn_phong_terms() {
        let library = parse_mtl(
            "newmtl shiny\nKd 0.5 0.25 1\nKs 1 1 1\nNs 100\nKe 0.1 0.2 0.3\nd 0.5\n".as_bytes(),
        )
        .unwrap();
        let material = convert_material("shiny", library.get("shiny").unwrap(), no_textures).unwrap();
        let pbr = pbr(&material);
        assert_eq!(pbr.base_color_factor, Some([0.5, 0.25, 1.0, 0.5]));
        assert!(approx_eq!(f32, pbr.roughness_factor.unwrap(), 0.9));
        assert_eq!(pbr.metallic_factor, Some(0.0));
        assert_eq!(material.emissive_factor, Some([0.1, 0.2, 0.3]));
        assert_eq!(material.alpha_mode, Some(Checked::Valid(AlphaMode::Blend)));
        assert!(material.double_sided);
    }

    #[test]
    fn texture_slots() {
        let mtl = mtl::Material {
            diffuse: Some(MtlColor::Rgb([0.2, 0.2, 0.2])),
            diffuse_map: Some("diffuse.png".to_string()),
            emissive_map: Some("glow.png".to_string()),
            specular_map: Some("spec.png".to_string()),
            bump_map: Some("bump.png".to_string()),
            ambient_map: Some("missing.png".to_string()),
            dissolve_map: Some("alpha.png".to_string()),
            dissolve: Some(0.1),
            ..mtl::Material::default()
        };
        let mut requested = Vec::new();
        let material = convert_material("textured", &mtl, |file| {
            requested.push(file.to_string());
            Ok(match file {
                "missing.png" => None,
                _ => Some(Index::new(requested.len() as u32 - 1)),
            })
        })
        .unwrap();

        assert_eq!(
            requested,
            vec!["glow.png", "diffuse.png", "spec.png", "bump.png", "missing.png"]
        );
        assert_eq!(material.emissive_texture, Some(TextureInfo::new(Index::new(0))));
        assert_eq!(material.emissive_factor, Some([1.0, 1.0, 1.0]));
        let pbr = pbr(&material);
        assert_eq!(pbr.base_color_texture, Some(TextureInfo::new(Index::new(1))));
        assert_eq!(pbr.base_color_factor, Some([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(pbr.metallic_roughness_texture, Some(TextureInfo::new(Index::new(2))));
        assert_eq!(pbr.metallic_factor, Some(1.0));
        assert_eq!(material.normal_texture.as_ref().unwrap().scale, Some(1.0));
        assert_eq!(material.occlusion_texture, None);
        assert_eq!(material.alpha_mode, Some(Checked::Valid(AlphaMode::Blend)));

        let stripped = without_base_color_texture(&material).unwrap();
        assert_eq!(stripped.pbr_metallic_roughness.as_ref().unwrap().base_color_texture, None);
        assert!(without_base_color_texture(&stripped).is_none());
    }
}
