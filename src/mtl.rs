//! This module reads WaveFront material libraries (`.mtl`).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::lexer::{parse_f32, Lexer, ParseError, Statement};

/// Linear sRGB from CIE 1931 XYZ (D65).
const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// Stand-in for spectral curves, which are not sampled.
const SPECTRAL_PLACEHOLDER: [f32; 3] = [0.5, 0.5, 0.5];

#[derive(Debug, Clone, PartialEq)]
pub enum MtlColor {
    Rgb([f32; 3]),
    Xyz([f32; 3]),
    Spectral { file: String, factor: f32 },
}

impl MtlColor {
    pub fn to_rgb(&self) -> [f32; 3] {
        match self {
            MtlColor::Rgb(rgb) => *rgb,
            MtlColor::Xyz(xyz) => {
                let mut rgb = [0.0; 3];
                for (out, row) in rgb.iter_mut().zip(XYZ_TO_RGB.iter()) {
                    *out = row[0] * xyz[0] + row[1] * xyz[1] + row[2] * xyz[2];
                }
                rgb
            }
            MtlColor::Spectral { file, .. } => {
                warn!(file = %file, "spectral colours are not supported, using neutral gray");
                SPECTRAL_PLACEHOLDER
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub ambient: Option<MtlColor>,
    pub diffuse: Option<MtlColor>,
    pub specular: Option<MtlColor>,
    pub emissive: Option<MtlColor>,
    pub transmission_filter: Option<MtlColor>,
    pub illumination: Option<u32>,
    pub dissolve: Option<f32>,
    pub specular_exponent: Option<f32>,
    pub optical_density: Option<f32>,
    pub ambient_map: Option<String>,
    pub diffuse_map: Option<String>,
    pub specular_map: Option<String>,
    pub emissive_map: Option<String>,
    pub dissolve_map: Option<String>,
    pub bump_map: Option<String>,
}

/// Materials in declaration order. A repeated `newmtl` name replaces the
/// earlier definition in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MtlLibrary {
    pub materials: Vec<(String, Material)>,
}

impl MtlLibrary {
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, material)| material)
    }

    fn insert(&mut self, name: String, material: Material) {
        match self.materials.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = material,
            None => self.materials.push((name, material)),
        }
    }
}

pub fn load_mtl(path: &Path) -> Result<MtlLibrary, ParseError> {
    parse_mtl(BufReader::new(File::open(path)?))
}

pub fn parse_mtl<R: BufRead>(reader: R) -> Result<MtlLibrary, ParseError> {
    let mut library = MtlLibrary::default();
    let mut current: Option<(String, Material)> = None;

    for statement in Lexer::new(reader) {
        let statement = statement?;
        if statement.directive == "newmtl" {
            if statement.tail.is_empty() {
                return Err(statement.missing_argument());
            }
            if let Some((name, material)) = current.take() {
                library.insert(name, material);
            }
            current = Some((statement.tail.clone(), Material::default()));
            continue;
        }

        // Attributes before the first `newmtl` have nowhere to go.
        let material = match current.as_mut() {
            Some((_, material)) => material,
            None => continue,
        };
        match statement.directive.as_str() {
            "Ka" => material.ambient = Some(parse_color(&statement)?),
            "Kd" => material.diffuse = Some(parse_color(&statement)?),
            "Ks" => material.specular = Some(parse_color(&statement)?),
            "Ke" => material.emissive = Some(parse_color(&statement)?),
            "Tf" => material.transmission_filter = Some(parse_color(&statement)?),
            "Ns" => parse_lenient(&statement, &mut material.specular_exponent)?,
            "Ni" => parse_lenient(&statement, &mut material.optical_density)?,
            "illum" => parse_lenient(&statement, &mut material.illumination)?,
            "d" => parse_lenient(&statement, &mut material.dissolve)?,
            "map_Ka" => material.ambient_map = Some(parse_map(&statement)?),
            "map_Kd" => material.diffuse_map = Some(parse_map(&statement)?),
            "map_Ks" => material.specular_map = Some(parse_map(&statement)?),
            "map_Ke" => material.emissive_map = Some(parse_map(&statement)?),
            "map_d" => material.dissolve_map = Some(parse_map(&statement)?),
            "bump" | "map_bump" | "map_Bump" => material.bump_map = Some(parse_map(&statement)?),
            _ => {}
        }
    }

    if let Some((name, material)) = current {
        library.insert(name, material);
    }
    Ok(library)
}

/// Scalars whose malformed values are skipped rather than rejected.
fn parse_lenient<T: std::str::FromStr>(
    statement: &Statement,
    slot: &mut Option<T>,
) -> Result<(), ParseError> {
    let arg = statement
        .args()
        .first()
        .copied()
        .ok_or_else(|| statement.missing_argument())?;
    if let Ok(value) = arg.parse() {
        *slot = Some(value);
    }
    Ok(())
}

fn parse_triple(statement: &Statement, args: &[&str]) -> Result<[f32; 3], ParseError> {
    match args {
        [v] => {
            let v = parse_f32(v, statement.line)?;
            Ok([v, v, v])
        }
        [r, g, b, ..] => Ok([
            parse_f32(r, statement.line)?,
            parse_f32(g, statement.line)?,
            parse_f32(b, statement.line)?,
        ]),
        other => Err(statement.arity("1 or 3", other.len())),
    }
}

fn parse_color(statement: &Statement) -> Result<MtlColor, ParseError> {
    let args = statement.args();
    match args.as_slice() {
        [] => Err(statement.missing_argument()),
        ["xyz", rest @ ..] => Ok(MtlColor::Xyz(parse_triple(statement, rest)?)),
        ["spectral"] => Err(statement.missing_argument()),
        ["spectral", file, rest @ ..] => {
            let factor = match rest.first() {
                Some(factor) => parse_f32(factor, statement.line)?,
                None => 1.0,
            };
            Ok(MtlColor::Spectral {
                file: file.to_string(),
                factor,
            })
        }
        rgb @ ([_] | [_, _, _]) => Ok(MtlColor::Rgb(parse_triple(statement, rgb)?)),
        other => Err(statement.arity("1 or 3", other.len())),
    }
}

/// Texture file of a `map_*` statement. Option flags (`-bm 0.5 file.png`)
/// precede the file name, so only the last token counts then.
fn parse_map(statement: &Statement) -> Result<String, ParseError> {
    let tail = statement.tail.as_str();
    if tail.is_empty() {
        return Err(statement.missing_argument());
    }
    if tail.starts_with('-') {
        return statement
            .args()
            .last()
            .map(|file| file.to_string())
            .ok_or_else(|| statement.missing_argument());
    }
    Ok(tail.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    const LIBRARY: &str = "\
# Blender MTL File
newmtl red
Ns 250.000000
Ka 1 1 1
Kd 0.8 0.0 0.0
Ks 0.5
Ke xyz 0.5
Ni 1.45
d 0.75
illum 2
map_Kd -bm 1.0 textures/red.png

newmtl glass pane
Kd spectral glass.rfl 0.5
Tf 1 1 1
map_d alpha mask.png
bump normal.jpg
Ns not-a-number
";

    fn parse(text: &str) -> MtlLibrary {
        parse_mtl(text.as_bytes()).unwrap()
    }

    #[test]
    fn reads_materials_in_order() {
        let library = parse(LIBRARY);
        let names: Vec<&str> = library.materials.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["red", "glass pane"]);
    }

    #[test]
    fn reads_colors_and_scalars() {
        let library = parse(LIBRARY);
        let red = library.get("red").unwrap();
        assert_eq!(red.diffuse, Some(MtlColor::Rgb([0.8, 0.0, 0.0])));
        assert_eq!(red.specular, Some(MtlColor::Rgb([0.5, 0.5, 0.5])));
        assert_eq!(red.emissive, Some(MtlColor::Xyz([0.5, 0.5, 0.5])));
        assert_eq!(red.specular_exponent, Some(250.0));
        assert_eq!(red.optical_density, Some(1.45));
        assert_eq!(red.dissolve, Some(0.75));
        assert_eq!(red.illumination, Some(2));
        assert_eq!(red.diffuse_map.as_deref(), Some("textures/red.png"));
    }

    #[test]
    fn reads_maps_and_spectral_colors() {
        let library = parse(LIBRARY);
        let glass = library.get("glass pane").unwrap();
        assert_eq!(
            glass.diffuse,
            Some(MtlColor::Spectral {
                file: "glass.rfl".to_string(),
                factor: 0.5
            })
        );
        assert_eq!(glass.dissolve_map.as_deref(), Some("alpha mask.png"));
        assert_eq!(glass.bump_map.as_deref(), Some("normal.jpg"));
        // Unparseable exponents are skipped.
        assert_eq!(glass.specular_exponent, None);
    }

    #[test]
    fn xyz_white_maps_to_rgb_white() {
        let rgb = MtlColor::Xyz([0.95047, 1.0, 1.08883]).to_rgb();
        for channel in rgb.iter() {
            assert!(approx_eq!(f32, *channel, 1.0, epsilon = 0.001));
        }
    }

    #[test]
    fn spectral_is_placeholder_gray() {
        let color = MtlColor::Spectral {
            file: "x.rfl".to_string(),
            factor: 1.0,
        };
        assert_eq!(color.to_rgb(), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn two_component_rgb_is_rejected() {
        assert!(matches!(
            parse_mtl("newmtl a\nKd 1 1\n".as_bytes()),
            Err(ParseError::Arity { line: 2, found: 2, .. })
        ));
    }

    #[test]
    fn missing_arguments_are_fatal() {
        assert!(matches!(
            parse_mtl("newmtl a\nKd\n".as_bytes()),
            Err(ParseError::MissingArgument { line: 2, .. })
        ));
        assert!(matches!(
            parse_mtl("newmtl\n".as_bytes()),
            Err(ParseError::MissingArgument { line: 1, .. })
        ));
        assert!(matches!(
            parse_mtl("newmtl a\nKd 1 x 1\n".as_bytes()),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn redefinition_replaces_material() {
        let library = parse("newmtl a\nKd 1 0 0\nnewmtl b\nnewmtl a\nKd 0 1 0\n");
        assert_eq!(library.materials.len(), 2);
        assert_eq!(
            library.get("a").unwrap().diffuse,
            Some(MtlColor::Rgb([0.0, 1.0, 0.0]))
        );
    }
}
