//! Procedural producers. Everything spans -1..1 on the axes it covers.

use crate::common::IdGenerator;
use crate::mesh::{IndexedPositions, NormalMesh};
use genmesh::generators::{Cube, IndexedPolygon, Plane, SharedVertex};
use genmesh::{Quad, Triangulate, Vertex, Vertices};
use itertools::Itertools;

fn from_generator<G>(ids: &IdGenerator, generator: G) -> NormalMesh
where
    G: SharedVertex<Vertex> + IndexedPolygon<Quad<usize>>,
{
    let (positions, normals): (Vec<_>, Vec<_>) = generator
        .shared_vertex_iter()
        .map(|v| {
            (
                glm::vec3(v.pos.x, v.pos.y, v.pos.z),
                glm::vec3(v.normal.x, v.normal.y, v.normal.z),
            )
        })
        .unzip();

    let indices = generator
        .indexed_polygon_iter()
        .triangulate()
        .vertices()
        .map(|i| i as u32)
        .collect_vec();

    NormalMesh::new(ids, indices, positions, normals)
}

/// One counter-clockwise triangle in the xy plane.
pub fn triangle(ids: &IdGenerator) -> IndexedPositions {
    IndexedPositions::new(
        ids,
        vec![0, 1, 2],
        vec![
            glm::vec3(-1.0, -1.0, 0.0),
            glm::vec3(1.0, -1.0, 0.0),
            glm::vec3(0.0, 1.0, 0.0),
        ],
    )
    .with_name("triangle")
}

/// Axis-aligned cube with flat faces (four vertices per face).
pub fn cube(ids: &IdGenerator) -> NormalMesh {
    from_generator(ids, Cube::new()).with_name("cube")
}

/// Plane facing +z, cut into a grid of `x` by `y` quads. Zero counts are
/// treated as one.
pub fn plane(ids: &IdGenerator, x: usize, y: usize) -> NormalMesh {
    from_generator(ids, Plane::subdivide(x.max(1), y.max(1))).with_name("plane")
}
