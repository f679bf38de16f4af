//! Simple path tracer example.
//!
//! Renders a field of random spheres and saves it as a PNG. An optional
//! first argument names a JSON render configuration.

use anyhow::{Context, Result};
use lumen_math::sampling::random_vec;
use lumen_renderer::{
    render, Actor, Background, Camera, CheckerTexture, Color, Dielectric, Lambertian,
    MarbleTexture, Material, Metal, MovingSphere, Perlin, RenderConfig, Scene, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {path}"))?;
            RenderConfig::from_json(&json)?
        }
        None => RenderConfig::default()
            .with_resolution(800, 450)
            .with_quality(50, 10),
    };

    let mut rng = StdRng::seed_from_u64(config.seed);

    let camera = Camera::new()
        .with_position(
            Vec3::new(13.0, 2.0, 3.0), // look_from
            Vec3::new(0.0, 0.0, 0.0),  // look_at
            Vec3::new(0.0, 1.0, 0.0),  // vup
        )
        .with_aspect_ratio(config.aspect_ratio())
        .with_lens(20.0, 0.1, 10.0)
        .with_shutter(0.0, 1.0);

    let start = std::time::Instant::now();
    let actors = build_actors(&mut rng);
    let background = Background::Gradient {
        bottom: Color::ONE,
        top: Color::new(0.5, 0.7, 1.0),
    };
    let scene = Scene::with_index(camera, actors, background, &mut rng)?;
    log::info!("Scene built in {:?}", start.elapsed());

    let image = render(&scene, &config)?;

    let filename = "output.png";
    image
        .to_image()
        .save(filename)
        .with_context(|| format!("Failed to save {filename}"))?;
    log::info!("Saved to {}", filename);
    Ok(())
}

fn sphere(center: Vec3, radius: f64, material: Arc<dyn Material>) -> Actor {
    Actor::new(Arc::new(Sphere::new(center, radius)), material)
}

fn build_actors(rng: &mut StdRng) -> Vec<Actor> {
    let mut actors = Vec::new();

    // Ground
    let checker = CheckerTexture::from_colors(Color::new(0.2, 0.3, 0.1), Color::splat(0.9), 10.0);
    actors.push(sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Arc::new(checker))),
    ));

    // Small random spheres
    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            if choose_mat < 0.8 {
                // Diffuse, bouncing during the shutter
                let albedo = Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                let center1 = center + Vec3::new(0.0, 0.5 * rng.gen::<f64>(), 0.0);
                actors.push(Actor::new(
                    Arc::new(MovingSphere::new(center, center1, 0.0, 1.0, 0.2)),
                    Arc::new(Lambertian::from_color(albedo)),
                ));
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vec(rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                actors.push(sphere(center, 0.2, Arc::new(Metal::new(albedo, fuzz))));
            } else {
                // Glass
                actors.push(sphere(center, 0.2, Arc::new(Dielectric::new(1.5))));
            }
        }
    }

    // Three main spheres
    actors.push(sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5))));
    let marble = MarbleTexture::new(Perlin::new(rng.gen()), 7, 10.0, 4.0);
    actors.push(sphere(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Arc::new(marble))),
    ));
    actors.push(sphere(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    actors
}
