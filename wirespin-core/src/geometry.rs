/// Geometry primitives for wireframe rendering
use nalgebra::Point3;

/// A triangle defined by three model-space points
///
/// Edges run point 1 → 2, 2 → 3 and 3 → 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self {
            points: [p1, p2, p3],
        }
    }
}

/// A model stored as a flat vertex list
///
/// Consecutive triples `[3k, 3k+1, 3k+2]` form the triangles. A trailing
/// group of one or two vertices is kept but never drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    vertices: Vec<Point3<f64>>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * 3),
        }
    }

    pub fn from_vertices(vertices: Vec<Point3<f64>>) -> Self {
        Self { vertices }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.vertices.extend_from_slice(&triangle.points);
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Iterate over complete triangles, ignoring a trailing partial group
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        triangles_of(&self.vertices)
    }

    /// Scale every coordinate by a uniform factor
    pub fn scaled(mut self, factor: f64) -> Self {
        for vertex in &mut self.vertices {
            vertex.coords *= factor;
        }
        self
    }

    /// A single triangle with half-extent `half`, lying in the plane z = `half`
    pub fn triangle(half: f64) -> Self {
        let mut model = Self::with_capacity(1);
        model.add_triangle(Triangle::new(
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
            Point3::new(-half, -half, half),
        ));
        model
    }

    /// Two triangles forming a square of side `size` in the z = 0 plane
    pub fn double_triangle(size: f64) -> Self {
        let half = size / 2.0;
        let mut model = Self::with_capacity(2);
        model.add_triangle(Triangle::new(
            Point3::new(-half, -half, 0.0),
            Point3::new(half, -half, 0.0),
            Point3::new(half, half, 0.0),
        ));
        model.add_triangle(Triangle::new(
            Point3::new(-half, -half, 0.0),
            Point3::new(half, half, 0.0),
            Point3::new(-half, half, 0.0),
        ));
        model
    }

    /// An axis-aligned cube of side `size` centred on the origin (12 triangles)
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let p = |x: f64, y: f64, z: f64| Point3::new(x * h, y * h, z * h);
        let mut model = Self::with_capacity(12);

        // Front / back
        model.add_triangle(Triangle::new(p(-1., -1., 1.), p(1., -1., 1.), p(1., 1., 1.)));
        model.add_triangle(Triangle::new(p(-1., -1., 1.), p(1., 1., 1.), p(-1., 1., 1.)));
        model.add_triangle(Triangle::new(p(-1., -1., -1.), p(-1., 1., -1.), p(1., 1., -1.)));
        model.add_triangle(Triangle::new(p(-1., -1., -1.), p(1., 1., -1.), p(1., -1., -1.)));

        // Top / bottom
        model.add_triangle(Triangle::new(p(-1., 1., -1.), p(-1., 1., 1.), p(1., 1., 1.)));
        model.add_triangle(Triangle::new(p(-1., 1., -1.), p(1., 1., 1.), p(1., 1., -1.)));
        model.add_triangle(Triangle::new(p(-1., -1., -1.), p(1., -1., -1.), p(1., -1., 1.)));
        model.add_triangle(Triangle::new(p(-1., -1., -1.), p(1., -1., 1.), p(-1., -1., 1.)));

        // Right / left
        model.add_triangle(Triangle::new(p(1., -1., -1.), p(1., 1., -1.), p(1., 1., 1.)));
        model.add_triangle(Triangle::new(p(1., -1., -1.), p(1., 1., 1.), p(1., -1., 1.)));
        model.add_triangle(Triangle::new(p(-1., -1., -1.), p(-1., -1., 1.), p(-1., 1., 1.)));
        model.add_triangle(Triangle::new(p(-1., -1., -1.), p(-1., 1., 1.), p(-1., 1., -1.)));

        model
    }
}

/// Group a flat vertex slice into triangles by consecutive triples
pub fn triangles_of(vertices: &[Point3<f64>]) -> impl Iterator<Item = Triangle> + '_ {
    vertices
        .chunks_exact(3)
        .map(|chunk| Triangle::new(chunk[0], chunk[1], chunk[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_group_is_ignored() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(6.0, 6.0, 6.0),
        ];
        let model = Model::from_vertices(vertices);
        assert_eq!(model.vertices().len(), 5);
        assert_eq!(model.triangle_count(), 1);

        let triangles: Vec<Triangle> = model.triangles().collect();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0].points[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_cube_has_twelve_triangles() {
        let cube = Model::cube(2.0);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube
            .vertices()
            .iter()
            .all(|v| v.x.abs() == 1.0 && v.y.abs() == 1.0 && v.z.abs() == 1.0));
    }

    #[test]
    fn test_scaled() {
        let model = Model::triangle(1.0).scaled(2.5);
        assert_eq!(model.vertices()[0], Point3::new(2.5, 2.5, 2.5));
        assert_eq!(model.vertices()[2], Point3::new(-2.5, -2.5, 2.5));
    }

    #[test]
    fn test_empty_model() {
        let model = Model::new();
        assert!(model.is_empty());
        assert_eq!(model.triangles().count(), 0);
        assert_eq!(Model::double_triangle(1.0).triangle_count(), 2);
    }
}
