//! Turn a parsed [`MeshDocument`] into a scene [`Node`]

use std::sync::Arc;

use hashbrown::HashMap;

use crate::buffer::{BufferKind, Usage};
use crate::document::MeshDocument;
use crate::mesh::Mesh;
use crate::scene::{AnimControl, Node};

/// Buffers a shared-vertex submesh takes over from the shared geometry after bind-posing
const SHARED_SKINNING_BUFFERS: [BufferKind; 6] = [
    BufferKind::Position,
    BufferKind::Normal,
    BufferKind::BindPosePosition,
    BufferKind::BindPoseNormal,
    BufferKind::BoneIndex,
    BufferKind::BoneWeight,
];

/// Attach every geometry of `document` to a new node named `node_name`
///
/// With animation data, each mesh owning its vertices gets a bind pose and
/// an [`AnimControl`] is installed. Submeshes using shared vertices get the
/// shared geometry's bound.
pub fn compile(document: MeshDocument, node_name: impl Into<String>) -> Node {
    let (mut records, shared, anim_data) = document.into_parts();
    let mut node = Node::new(node_name);

    if let Some(anim_data) = anim_data {
        let mut skinned_meshes = Vec::new();
        for index in 0..records.len() {
            if !records[index].uses_shared_vertices {
                create_bind_pose(&mut records[index].geometry.mesh);
                skinned_meshes.push(index);
                continue;
            }

            let Some(shared_record) = shared.and_then(|i| records.get(i)) else {
                continue;
            };
            let buffers: Vec<_> = SHARED_SKINNING_BUFFERS
                .iter()
                .filter_map(|&kind| shared_record.mesh().buffer(kind).cloned())
                .collect();
            let max_weights = shared_record.mesh().max_num_weights();

            let mesh = &mut records[index].geometry.mesh;
            for buffer in buffers {
                mesh.set_shared_buffer(buffer);
            }
            mesh.set_max_num_weights(max_weights);
        }

        let animations: HashMap<_, _> = anim_data
            .animations
            .into_iter()
            .map(|anim| (anim.name.clone(), anim))
            .collect();
        tracing::debug!(
            "binding {} animations to {} skinned meshes",
            animations.len(),
            skinned_meshes.len()
        );
        node.set_anim_control(AnimControl {
            skinned_meshes,
            skeleton: anim_data.skeleton,
            animations,
        });
    }

    let shared_bound = shared
        .and_then(|i| records.get(i))
        .and_then(|r| r.mesh().bound().copied());
    for mut record in records {
        if record.uses_shared_vertices {
            record.geometry.mesh.set_bound(shared_bound);
        }
        node.attach_child(record.geometry);
    }
    node
}

/// Keep a CPU copy of the rest pose and mark the animated streams as rewritten per frame
fn create_bind_pose(mesh: &mut Mesh) {
    for (kind, bind_kind) in [
        (BufferKind::Position, BufferKind::BindPosePosition),
        (BufferKind::Normal, BufferKind::BindPoseNormal),
    ] {
        let Some(buffer) = mesh.buffer(kind).cloned() else {
            continue;
        };
        mesh.set_shared_buffer(Arc::new(buffer.clone_as(bind_kind, Usage::CpuOnly)));
        mesh.set_shared_buffer(Arc::new((*buffer).clone().with_usage(Usage::Stream)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Format, TypedBuffer};
    use crate::mesh::Topology;
    use crate::scene::{AnimData, BoneAnimation, CullHint};

    fn document_with_shared(anim: bool) -> MeshDocument {
        let mut doc = MeshDocument::new(Some("Box.mesh".into()));
        let shared = doc.begin_shared_geometry("Box.mesh-sharedgeom".into(), 2);
        let mut pos = TypedBuffer::new(BufferKind::Position, 2, 3, Format::Float).unwrap();
        pos.push_floats(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        doc.mesh_mut(shared).unwrap().set_buffer(pos);
        doc.finish_mesh(shared);

        let sub = doc
            .begin_submesh("Box.mesh-geom-1".into(), "m", true, false, Topology::TriangleList)
            .unwrap();
        doc.finish_mesh(sub);

        if anim {
            doc.set_anim_data(Some(AnimData {
                animations: vec![BoneAnimation {
                    name: "Walk".into(),
                    length: 1.5,
                }],
                ..Default::default()
            }));
        }
        doc
    }

    #[test]
    fn shared_bound_propagates() {
        let node = compile(document_with_shared(false), "Box.mesh-ogremesh");
        let sub = node.child("Box.mesh-geom-1").unwrap();
        let shared = node.child("Box.mesh-sharedgeom").unwrap();
        assert_eq!(sub.mesh.bound(), shared.mesh.bound());
        assert_eq!(shared.cull_hint, CullHint::Always);
        assert!(node.anim_control().is_none());
    }

    #[test]
    fn bind_pose_is_shared_with_shared_vertex_submeshes() {
        let node = compile(document_with_shared(true), "n");
        let shared = &node.children()[0].mesh;
        let sub = &node.children()[1].mesh;

        let bind = shared.buffer(BufferKind::BindPosePosition).unwrap();
        assert_eq!(bind.usage(), Usage::CpuOnly);
        assert_eq!(bind.as_f32().unwrap(), [0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(shared.buffer(BufferKind::Position).unwrap().usage(), Usage::Stream);

        for kind in [BufferKind::Position, BufferKind::BindPosePosition] {
            assert!(Arc::ptr_eq(
                shared.buffer(kind).unwrap(),
                sub.buffer(kind).unwrap()
            ));
        }

        let control = node.anim_control().unwrap();
        assert_eq!(control.skinned_meshes, [0]);
        assert_eq!(control.animation_names(), ["Walk"]);
    }
}
