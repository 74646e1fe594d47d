use crate::draw::config::{DrawConfig, Rgba};
use crate::geom::mesh::{HasMesh, Mesh};
use crate::geom::point::Point;
use crate::scene::Scene;
use anyhow::{Context, Result};
use rerun as rr;
use tracing::warn;

fn color(rgba: Rgba) -> rr::Color {
    let (r, g, b, a) = rgba;
    rr::Color(rr::Rgba32::from_linear_unmultiplied_rgba_f32(r, g, b, a))
}

fn positions(pts: &[Point]) -> Vec<[f32; 3]> {
    pts.iter().map(|p| p.to_f32()).collect()
}

pub fn start_session(config: &DrawConfig) -> Result<rr::RecordingStream> {
    let session = rr::RecordingStreamBuilder::new(config.session_name.as_str())
        .spawn()
        .context("Failed to spawn the Rerun viewer")?;

    Ok(session)
}

fn draw_mesh(session: &rr::RecordingStream, name: String, mesh: Mesh, rgba: Rgba) -> Result<()> {
    let (r, g, b, a) = rgba;
    let triangles: Vec<[u32; 3]> = mesh
        .faces
        .iter()
        .map(|t| [t.0 as u32, t.1 as u32, t.2 as u32])
        .collect();
    let normals: Vec<[f32; 3]> = mesh.vertex_normals().into_iter().map(|n| n.to_f32()).collect();
    session.log_static(
        name,
        &rr::Mesh3D::new(positions(&mesh.vertices))
            .with_vertex_normals(normals)
            .with_triangle_indices(triangles)
            .with_albedo_factor(rr::Rgba32::from_linear_unmultiplied_rgba_f32(r, g, b, a)),
    )?;
    Ok(())
}

fn draw_lines(
    session: &rr::RecordingStream,
    name: String,
    lines: Vec<Vec<[f32; 3]>>,
    radius: f32,
    rgba: Rgba,
) -> Result<()> {
    let radii = vec![radius; lines.len()];
    let colors = vec![color(rgba); lines.len()];
    session.log_static(
        name,
        &rr::LineStrips3D::new(lines)
            .with_radii(radii)
            .with_colors(colors),
    )?;
    Ok(())
}

/// Logs every part of the scene to the Rerun session.
///
/// Shadows that cannot be triangulated (self-intersecting outlines) are
/// drawn as outlines only.
pub fn draw_scene(session: &rr::RecordingStream, scene: &Scene, config: &DrawConfig) -> Result<()> {
    let prefix = &config.entity_prefix;

    draw_mesh(
        session,
        format!("{prefix}/ground"),
        scene.ground.copy_mesh()?,
        config.ground_color,
    )?;

    for (i, prism) in scene.prisms.iter().enumerate() {
        draw_mesh(
            session,
            format!("{prefix}/buildings/{i}/faces"),
            prism.copy_mesh()?,
            config.building_color,
        )?;

        let mut edges: Vec<Vec<[f32; 3]>> = vec![positions(&prism.base), positions(&prism.top)];
        for wall in prism.walls.iter() {
            edges.push(positions(&[wall[0], wall[3]]));
        }
        draw_lines(
            session,
            format!("{prefix}/buildings/{i}/edges"),
            edges,
            config.edge_radius,
            config.edge_color,
        )?;
    }

    for (i, shadow) in scene.shadows.iter().enumerate() {
        match shadow.copy_mesh() {
            Ok(mesh) => draw_mesh(
                session,
                format!("{prefix}/shadows/{i}/surface"),
                mesh,
                config.shadow_color,
            )?,
            Err(e) => warn!("Shadow {i} drawn as outline only: {e}"),
        }
        draw_lines(
            session,
            format!("{prefix}/shadows/{i}/outline"),
            vec![positions(&shadow.vertices)],
            config.edge_radius,
            config.shadow_edge_color,
        )?;
    }

    session.log_static(
        format!("{prefix}/sun"),
        &rr::Points3D::new([scene.sun.to_f32()])
            .with_radii([config.sun_radius])
            .with_colors([color(config.sun_color)])
            .with_labels(["Sun"]),
    )?;

    let rays: Vec<Vec<[f32; 3]>> = scene
        .rays
        .iter()
        .map(|ray| positions(&[ray.from, ray.to]))
        .collect();
    draw_lines(
        session,
        format!("{prefix}/rays"),
        rays,
        config.ray_radius,
        config.ray_color,
    )?;

    let anchors: Vec<[f32; 3]> = scene.labels.iter().map(|l| l.anchor.to_f32()).collect();
    let texts: Vec<String> = scene.labels.iter().map(|l| l.text.clone()).collect();
    session.log_static(
        format!("{prefix}/labels"),
        &rr::Points3D::new(anchors)
            .with_radii(vec![config.label_radius; texts.len()])
            .with_colors(vec![color(config.label_color); texts.len()])
            .with_labels(texts),
    )?;

    Ok(())
}
