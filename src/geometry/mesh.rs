use crate::math::Vector3;

/// A triangle in a mesh
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// The vertices of the triangle
    pub vertices: [Vector3; 3],
}

impl Triangle {
    /// Creates a new triangle from three vertices
    pub fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Returns the normal of the triangle
    pub fn normal(&self) -> Vector3 {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];
        edge1.cross(&edge2).normalize()
    }

    /// Returns the area of the triangle
    pub fn area(&self) -> f32 {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];
        edge1.cross(&edge2).length() * 0.5
    }

    /// Returns true for a zero-area triangle
    pub fn is_degenerate(&self) -> bool {
        crate::math::approx_zero(self.area())
    }
}

/// A triangular collision mesh in local space
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// The vertices of the mesh
    vertices: Vec<Vector3>,

    /// The indices of the triangles
    indices: Vec<u32>,
}

impl TriangleMesh {
    /// Creates a mesh from vertices and triangle indices
    ///
    /// Index triples that are out of range or span a zero-area triangle are
    /// dropped; they would contribute nothing to contact generation.
    pub fn from_vertices_and_indices(vertices: Vec<Vector3>, indices: Vec<u32>) -> Self {
        let mut kept = Vec::with_capacity(indices.len());

        for triple in indices.chunks_exact(3) {
            let (a, b, c) = (triple[0], triple[1], triple[2]);

            let in_range = (a as usize) < vertices.len()
                && (b as usize) < vertices.len()
                && (c as usize) < vertices.len();
            if !in_range {
                continue;
            }

            let triangle = Triangle::new(
                vertices[a as usize],
                vertices[b as usize],
                vertices[c as usize],
            );
            if triangle.is_degenerate() {
                continue;
            }

            kept.push(a);
            kept.push(b);
            kept.push(c);
        }

        Self {
            vertices,
            indices: kept,
        }
    }

    /// Returns the vertices of the mesh
    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    /// Returns the triangle indices of the mesh
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the local-space triangle at the given index
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        let base = index * 3;
        if base + 2 >= self.indices.len() {
            return None;
        }

        Some(Triangle::new(
            self.vertices[self.indices[base] as usize],
            self.vertices[self.indices[base + 1] as usize],
            self.vertices[self.indices[base + 2] as usize],
        ))
    }
}
