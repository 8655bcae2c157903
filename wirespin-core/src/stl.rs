/// STL file parser for binary and ASCII formats
use nalgebra::Point3;
use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    combinator::opt,
    multi::{count, many0},
    number::complete::{double, le_f32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geometry::{Model, Triangle};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Parse a binary STL file
///
/// Layout: 80-byte header, little-endian `u32` triangle count, then per
/// triangle a normal, three vertices (all `f32` triples) and a `u16`
/// attribute count. Normals and attributes are discarded.
pub fn parse_binary_stl(data: &[u8]) -> Result<Model> {
    if data.len() < HEADER_LEN + 4 {
        return Err(Error::StlTooShort(data.len()));
    }

    let (body, triangle_count) = binary_header(data)
        .map_err(|_| Error::StlTooShort(data.len()))?;
    let triangle_count = triangle_count as usize;

    let available = body.len() / FACET_LEN;
    if available < triangle_count {
        return Err(Error::StlTruncated {
            expected: triangle_count,
            found: available,
        });
    }

    let (_, triangles) = count(binary_facet, triangle_count)(body).map_err(|_| {
        Error::StlTruncated {
            expected: triangle_count,
            found: available,
        }
    })?;

    let mut model = Model::with_capacity(triangles.len());
    for triangle in triangles {
        model.add_triangle(triangle);
    }
    Ok(model)
}

fn binary_header(input: &[u8]) -> IResult<&[u8], u32> {
    preceded(take(HEADER_LEN), le_u32)(input)
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Triangle> {
    let (input, _normal) = binary_vector3(input)?;
    let (input, (v1, v2, v3)) = tuple((binary_vector3, binary_vector3, binary_vector3))(input)?;
    let (input, _attributes) = le_u16(input)?;
    Ok((input, Triangle::new(v1, v2, v3)))
}

fn binary_vector3(input: &[u8]) -> IResult<&[u8], Point3<f64>> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, Point3::new(x as f64, y as f64, z as f64)))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Model> {
    match ascii_solid(input) {
        Ok((_, model)) => Ok(model),
        Err(e) => Err(Error::StlAscii(format!("{:?}", e))),
    }
}

fn ascii_solid(input: &str) -> IResult<&str, Model> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, triangles) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = opt(not_line_ending)(input)?;

    let mut model = Model::with_capacity(triangles.len());
    for triangle in triangles {
        model.add_triangle(triangle);
    }

    Ok((input, model))
}

fn ascii_facet(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = ascii_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v1) = ascii_vertex(input)?;
    let (input, v2) = ascii_vertex(input)?;
    let (input, v3) = ascii_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, Triangle::new(v1, v2, v3)))
}

fn ascii_vertex(input: &str) -> IResult<&str, Point3<f64>> {
    preceded(multispace0, preceded(tag("vertex"), ascii_vector3))(input)
}

fn ascii_vector3(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = multispace0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = double(input)?;
    Ok((input, Point3::new(x, y, z)))
}

/// Detect and parse STL data (binary or ASCII)
///
/// Data starting with `solid` is tried as ASCII first; binary files are
/// allowed to start with that word too, so a failed ASCII parse falls back
/// to binary. When both fail the ASCII error is reported.
pub fn parse_stl(data: &[u8]) -> Result<Model> {
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            let ascii_err = match parse_ascii_stl(text) {
                Ok(model) => return Ok(model),
                Err(e) => e,
            };
            debug!(error = %ascii_err, "ASCII STL parse failed, trying binary");
            return parse_binary_stl(data).map_err(|_| ascii_err);
        }
    }

    parse_binary_stl(data)
}

/// Read and parse an STL file from disk
pub fn load_stl(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let model = parse_stl(&data)?;
    info!(
        path = %path.display(),
        triangles = model.triangle_count(),
        "loaded STL model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_stl(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for triangle in triangles {
            for value in [0.0f32, 0.0, 1.0] {
                data.extend_from_slice(&value.to_le_bytes());
            }
            for vertex in triangle {
                for value in vertex {
                    data.extend_from_slice(&value.to_le_bytes());
                }
            }
            data.extend_from_slice(&0u16.to_le_bytes());
        }
        data
    }

    const ASCII_CUBE_FACE: &str = "solid face
  facet normal 0 0 1
    outer loop
      vertex -1 -1 1
      vertex 1 -1 1
      vertex 1 1 1
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex -1.0 -1.0 1.0
      vertex 1.0 1.0 1.0
      vertex -1.0 1.0 1.5e0
    endloop
  endfacet
endsolid face
";

    #[test]
    fn test_parse_binary_header() {
        let mut data = vec![0u8; 84];
        // Set triangle count to 0
        data[80..84].copy_from_slice(&0u32.to_le_bytes());

        let result = parse_binary_stl(&data);
        assert!(result.is_ok());
        let model = result.unwrap();
        assert_eq!(model.triangle_count(), 0);
    }

    #[test]
    fn test_parse_binary_triangles() {
        let data = binary_stl(&[
            [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
            [[-1.0, -2.0, -3.0], [0.5, 0.25, 0.0], [10.0, 0.0, 0.0]],
        ]);
        let model = parse_stl(&data).unwrap();
        assert_eq!(model.triangle_count(), 2);
        assert_eq!(model.vertices()[0], Point3::new(1.0, 2.0, 3.0));
        assert_eq!(model.vertices()[4], Point3::new(0.5, 0.25, 0.0));
        assert_eq!(model.vertices()[5], Point3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_binary_too_short() {
        assert!(matches!(
            parse_binary_stl(&[0u8; 10]),
            Err(Error::StlTooShort(10))
        ));
    }

    #[test]
    fn test_binary_truncated() {
        let mut data = binary_stl(&[[[0.0; 3]; 3], [[1.0; 3]; 3]]);
        data.truncate(data.len() - 10);
        assert!(matches!(
            parse_binary_stl(&data),
            Err(Error::StlTruncated {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_parse_ascii() {
        let model = parse_stl(ASCII_CUBE_FACE.as_bytes()).unwrap();
        assert_eq!(model.triangle_count(), 2);
        assert_eq!(model.vertices()[1], Point3::new(1.0, -1.0, 1.0));
        assert_eq!(model.vertices()[5], Point3::new(-1.0, 1.0, 1.5));
    }

    #[test]
    fn test_binary_with_solid_header() {
        let mut data = binary_stl(&[[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]]);
        data[..5].copy_from_slice(b"solid");
        let model = parse_stl(&data).unwrap();
        assert_eq!(model.triangle_count(), 1);
    }

    #[test]
    fn test_broken_ascii_reports_ascii_error() {
        let text = "solid broken\n  facet normal 0 0 1\n    outer loop\n      vertex 1 2\n";
        assert!(matches!(parse_stl(text.as_bytes()), Err(Error::StlAscii(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_stl("definitely/not/here.stl").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("here.stl"));
    }
}
