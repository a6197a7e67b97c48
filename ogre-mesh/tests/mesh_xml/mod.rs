//! `mesh.xml` text builders for import tests.
//!
//! Element order follows what the Ogre XML converter writes: faces come
//! before the geometry inside a submesh.

#![allow(dead_code)]

/// Wrap a document body in `<mesh>`
pub fn mesh(body: &str) -> String {
    format!("<?xml version=\"1.0\"?>\n<mesh>\n{body}</mesh>\n")
}

/// Wrap submesh elements in `<submeshes>`
pub fn submeshes(body: &str) -> String {
    format!("<submeshes>\n{body}</submeshes>\n")
}

/// `<submesh>` with extra attributes written verbatim
pub fn submesh(material: &str, attrs: &str, body: &str) -> String {
    format!("<submesh material=\"{material}\" {attrs}>\n{body}</submesh>\n")
}

/// `<faces>` block holding the given triangles
pub fn faces(triangles: &[[u32; 3]]) -> String {
    let mut xml = format!("<faces count=\"{}\">\n", triangles.len());
    for [a, b, c] in triangles {
        xml.push_str(&format!("<face v1=\"{a}\" v2=\"{b}\" v3=\"{c}\"/>\n"));
    }
    xml.push_str("</faces>\n");
    xml
}

/// Vertex with only a position
pub fn position_vertex(p: [f32; 3]) -> String {
    format!(
        "<vertex><position x=\"{}\" y=\"{}\" z=\"{}\"/></vertex>\n",
        p[0], p[1], p[2]
    )
}

/// `<geometry>` with a position-only vertex buffer
pub fn position_geometry(positions: &[[f32; 3]]) -> String {
    geometry(
        positions.len(),
        "positions=\"true\"",
        &positions.iter().map(|p| position_vertex(*p)).collect::<String>(),
    )
}

/// `<geometry>` with one vertex buffer declared by `buffer_attrs`
pub fn geometry(vertex_count: usize, buffer_attrs: &str, vertices: &str) -> String {
    format!(
        "<geometry vertexcount=\"{vertex_count}\">\n<vertexbuffer {buffer_attrs}>\n{vertices}</vertexbuffer>\n</geometry>\n"
    )
}

/// `<sharedgeometry>` with a position-only vertex buffer
pub fn shared_geometry(positions: &[[f32; 3]]) -> String {
    format!(
        "<sharedgeometry vertexcount=\"{}\">\n<vertexbuffer positions=\"true\">\n{}</vertexbuffer>\n</sharedgeometry>\n",
        positions.len(),
        positions.iter().map(|p| position_vertex(*p)).collect::<String>()
    )
}

/// `<boneassignments>` from (vertex, bone, weight) triples
pub fn bone_assignments(assignments: &[(i32, i32, f32)]) -> String {
    let mut xml = String::from("<boneassignments>\n");
    for (vertex, bone, weight) in assignments {
        xml.push_str(&format!(
            "<vertexboneassignment vertexindex=\"{vertex}\" boneindex=\"{bone}\" weight=\"{weight}\"/>\n"
        ));
    }
    xml.push_str("</boneassignments>\n");
    xml
}

/// `<lodfacelist>` for one submesh
pub fn lod_face_list(submesh: usize, triangles: &[[u32; 3]]) -> String {
    let mut xml = format!(
        "<lodfacelist submeshindex=\"{submesh}\" numfaces=\"{}\">\n",
        triangles.len()
    );
    for [a, b, c] in triangles {
        xml.push_str(&format!("<face v1=\"{a}\" v2=\"{b}\" v3=\"{c}\"/>\n"));
    }
    xml.push_str("</lodfacelist>\n");
    xml
}

/// Unit quad: four corners, two triangles
pub const QUAD: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
];

pub const QUAD_FACES: [[u32; 3]; 2] = [[0, 1, 2], [2, 1, 3]];
