use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::core::coordinates::{Coordinates, EARTH_RADIUS_KM};
use crate::core::screen::AppScreen;
use crate::impact::{LatLng, SessionMessage};

pub const BASE_LAYER_TEXTURE: &str = "world_shaded_32k.png";
/// Presses held longer than this are camera drags, not impact picks.
const MAX_CLICK_DURATION: Duration = Duration::from_millis(300);

/// Plugin for the clickable globe on the impact map screen
pub struct EarthPlugin;

impl Plugin for EarthPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppScreen::ImpactMap), spawn_earth);
    }
}

#[derive(Component)]
pub struct Earth;

pub fn spawn_earth(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let mesh_handle = meshes.add(generate_icosphere(5));

    // Seam triangles sample u slightly above 1.0, so wrap horizontally.
    let texture = asset_server.load_with_settings(
        BASE_LAYER_TEXTURE,
        |settings: &mut ImageLoaderSettings| {
            settings.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                address_mode_u: ImageAddressMode::Repeat,
                ..default()
            });
        },
    );
    let material_handle = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture),
        perceptual_roughness: 1.0,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(mesh_handle),
            MeshMaterial3d(material_handle),
            Transform::default(),
            Earth,
            DespawnOnExit(AppScreen::ImpactMap),
            Name::new("Earth"),
        ))
        .observe(
            |mut event: On<Pointer<Click>>, mut messages: MessageWriter<SessionMessage>| {
                event.propagate(false);
                if !is_impact_pick(event.button, event.duration) {
                    return;
                }
                if let Some(pos) = event.hit.position {
                    let latlng = surface_point_to_lat_lng(pos);
                    debug!("[MAP] click at {}", latlng);
                    messages.write(SessionMessage::MapClicked(latlng));
                }
            },
        );
    info!("[INIT] Earth spawned");
}

/// Only short primary clicks place an impact; anything else is camera input.
pub fn is_impact_pick(button: PointerButton, duration: Duration) -> bool {
    button == PointerButton::Primary && duration <= MAX_CLICK_DURATION
}

pub fn surface_point_to_lat_lng(pos: Vec3) -> LatLng {
    let (lat, lng) = Coordinates::from(pos).as_degrees();
    LatLng::new(lat, lng)
}

/// Unit icosahedron refined `subdivisions` times and scaled to Earth radius.
/// Each level quadruples the triangle count.
pub fn generate_icosphere(subdivisions: u32) -> Mesh {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut positions: Vec<Vec3> = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7,
        1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9,
        8, 1,
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut refined = Vec::with_capacity(indices.len() * 4);
        for tri in indices.chunks_exact(3) {
            let (v1, v2, v3) = (tri[0], tri[1], tri[2]);
            let a = midpoint(&mut positions, &mut midpoints, v1, v2);
            let b = midpoint(&mut positions, &mut midpoints, v2, v3);
            let c = midpoint(&mut positions, &mut midpoints, v3, v1);
            refined.extend_from_slice(&[v1, a, c, v2, b, a, v3, c, b, a, b, c]);
        }
        indices = refined;
    }

    let mut normals: Vec<Vec3> = positions.clone();
    let mut uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| {
            let (u, v) = Coordinates::from(*p).uv_equirectangular();
            [u, v]
        })
        .collect();
    let mut vertices: Vec<Vec3> = positions.iter().map(|p| *p * EARTH_RADIUS_KM).collect();

    wrap_seam_triangles(&mut vertices, &mut uvs, &mut normals, &mut indices);

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_indices(Indices::U32(indices));
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh
}

fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    v1: u32,
    v2: u32,
) -> u32 {
    let key = (v1.min(v2), v1.max(v2));
    *cache.entry(key).or_insert_with(|| {
        let mid = ((positions[v1 as usize] + positions[v2 as usize]) / 2.0).normalize();
        positions.push(mid);
        positions.len() as u32 - 1
    })
}

/// Triangles straddling the antimeridian get their low-u corners duplicated
/// with u shifted by one, so they do not smear across the whole texture.
fn wrap_seam_triangles(
    vertices: &mut Vec<Vec3>,
    uvs: &mut Vec<[f32; 2]>,
    normals: &mut Vec<Vec3>,
    indices: &mut [u32],
) {
    for tri in indices.chunks_exact_mut(3) {
        let us = [
            uvs[tri[0] as usize][0],
            uvs[tri[1] as usize][0],
            uvs[tri[2] as usize][0],
        ];
        let span = us.iter().cloned().fold(f32::MIN, f32::max)
            - us.iter().cloned().fold(f32::MAX, f32::min);
        if span <= 0.5 {
            continue;
        }
        for (corner, u) in tri.iter_mut().zip(us) {
            if u < 0.25 {
                let idx = *corner as usize;
                vertices.push(vertices[idx]);
                normals.push(normals[idx]);
                uvs.push([u + 1.0, uvs[idx][1]]);
                *corner = vertices.len() as u32 - 1;
            }
        }
    }
}
