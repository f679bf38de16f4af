//! End-to-end rendering scenarios.

use lumen_renderer::{
    render, render_scanline, to_byte, Actor, Background, Bvh, Camera, Color, Cuboid, Dielectric,
    DiffuseLight, FlipFace, Fog, HittableList, Interval, Isotropic, Lambertian, Material, Metal,
    MovingSphere, Ray, RenderConfig, RotateY, Scene, Sphere, Translate, Vec3, XyRect, XzRect,
    YzRect,
};
use lumen_renderer::{Aabb, Geometry, Hittable, RenderError, SurfaceHit};
use rand::RngCore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn sky() -> Background {
    Background::Gradient {
        bottom: Color::ONE,
        top: Color::new(0.5, 0.7, 1.0),
    }
}

fn sphere(center: Vec3, radius: f64, material: Arc<dyn Material>) -> Actor {
    Actor::new(Arc::new(Sphere::new(center, radius)), material)
}

#[test]
fn ground_sphere_is_uniform_gray() {
    let _ = env_logger::builder().is_test(true).try_init();

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
        .with_lens(60.0, 0.0, 5.0);
    let ground = sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::from_color(Color::splat(0.5))),
    );
    let mut rng = StdRng::seed_from_u64(1);
    let scene =
        Scene::with_index(camera, vec![ground], Background::Solid(Color::ONE), &mut rng).unwrap();
    let config = RenderConfig::default()
        .with_resolution(32, 16)
        .with_quality(4, 5)
        .with_seed(9);

    let image = render(&scene, &config).unwrap();

    for pixel in &image.pixels {
        assert!(!pixel.is_nan());
        assert!((*pixel - Color::splat(0.5)).length() < 1e-9, "pixel = {pixel}");
    }
    let gray = to_byte(0.5);
    assert!(image.to_rgb8().iter().all(|&b| b == gray));
}

#[test]
fn three_spheres_against_sky() {
    let diffuse_albedo = Color::new(0.8, 0.3, 0.3);
    let metal_albedo = Color::new(0.8, 0.6, 0.2);
    let actors = vec![
        sphere(
            Vec3::new(-4.0, 0.0, -6.0),
            1.0,
            Arc::new(Lambertian::from_color(diffuse_albedo)),
        ),
        sphere(Vec3::new(0.0, 0.0, -6.0), 1.0, Arc::new(Dielectric::new(1.5))),
        sphere(
            Vec3::new(4.0, 0.0, -6.0),
            1.0,
            Arc::new(Metal::new(metal_albedo, 0.0)),
        ),
    ];
    let mut rng = StdRng::seed_from_u64(2);
    let scene = Scene::with_index(Camera::new(), actors, sky(), &mut rng).unwrap();
    let config = RenderConfig::default()
        .with_resolution(80, 40)
        .with_quality(1, 10)
        .with_seed(4);

    let image = render(&scene, &config).unwrap();

    // Sphere centers project to columns 26.7, 40 and 53.3 on scanline 20,
    // which is buffer row 19
    let window = |columns: std::ops::RangeInclusive<u32>, rows: std::ops::RangeInclusive<u32>| {
        rows.flat_map(|y| columns.clone().map(move |x| (x, y)))
            .map(|(x, y)| image.get(x, y))
            .collect::<Vec<Color>>()
    };

    // The sky is fully blue at every height, so blue carries the attenuation
    // of any path that escapes
    let diffuse = window(26..=27, 18..=20);
    let escaped = diffuse
        .iter()
        .filter(|c| (c.z - diffuse_albedo.z).abs() < 1e-9)
        .count();
    assert!(escaped * 2 >= diffuse.len());
    for c in &diffuse {
        assert!(c.x <= diffuse_albedo.x + 1e-9);
    }

    let glass = window(39..=41, 18..=20);
    let passed = glass.iter().filter(|c| (c.z - 1.0).abs() < 1e-9).count();
    assert!(passed * 2 >= glass.len());
    for c in &glass {
        assert!(c.x >= 0.0 && c.x <= 1.0 + 1e-9);
    }

    // Near-normal reflections head straight back out to the sky
    for c in window(53..=53, 19..=20) {
        assert!((c.z - metal_albedo.z).abs() < 1e-9);
        assert!(c.x >= metal_albedo.x * 0.5 - 1e-9 && c.x <= metal_albedo.x + 1e-9);
    }

    assert!(image.pixels.iter().all(|c| !c.is_nan()));
}

fn cornell_scene() -> Scene {
    let red: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::splat(15.0)));

    let mut actors = vec![
        Actor::new(
            Arc::new(FlipFace::new(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 555.0)))),
            green,
        ),
        Actor::new(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 0.0)), red),
        Actor::new(
            Arc::new(XzRect::new(213.0, 343.0, 227.0, 332.0, 554.0)),
            light,
        ),
        Actor::new(
            Arc::new(FlipFace::new(Arc::new(XzRect::new(0.0, 555.0, 0.0, 555.0, 555.0)))),
            white.clone(),
        ),
        Actor::new(Arc::new(XzRect::new(0.0, 555.0, 0.0, 555.0, 0.0)), white.clone()),
        Actor::new(
            Arc::new(FlipFace::new(Arc::new(XyRect::new(0.0, 555.0, 0.0, 555.0, 555.0)))),
            white.clone(),
        ),
    ];

    let tall = Translate::new(
        Arc::new(RotateY::new(
            Arc::new(Cuboid::new(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0))),
            15.0,
        )),
        Vec3::new(265.0, 0.0, 295.0),
    );
    actors.push(Actor::new(
        Arc::new(Fog::new(Arc::new(tall), 0.01)),
        Arc::new(Isotropic::from_color(Color::ZERO)),
    ));
    let short = Translate::new(
        Arc::new(RotateY::new(
            Arc::new(Cuboid::new(Vec3::ZERO, Vec3::splat(165.0))),
            -18.0,
        )),
        Vec3::new(130.0, 0.0, 65.0),
    );
    actors.push(Actor::new(Arc::new(short), white));

    let camera = Camera::new()
        .with_position(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_aspect_ratio(1.0)
        .with_lens(40.0, 0.0, 10.0);
    let mut rng = StdRng::seed_from_u64(3);
    Scene::with_index(camera, actors, Background::Solid(Color::ZERO), &mut rng).unwrap()
}

#[test]
fn render_is_idempotent_across_thread_counts() {
    let scene = cornell_scene();
    let config = RenderConfig::default()
        .with_resolution(24, 24)
        .with_quality(4, 8)
        .with_seed(17);

    let first = render(&scene, &config.clone().with_threads(1)).unwrap();
    let second = render(&scene, &config.clone().with_threads(4)).unwrap();
    let third = render(&scene, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, third);
    assert!(first.pixels.iter().all(|c| c.is_finite() && c.min_element() >= 0.0));
    // The ceiling light is visible from inside the box
    assert!(first.pixels.iter().any(|c| c.length() > 0.0));
}

#[test]
fn seed_changes_the_noise() {
    let scene = cornell_scene();
    let config = RenderConfig::default().with_resolution(16, 16).with_quality(2, 4);

    let a = render(&scene, &config.clone().with_seed(1)).unwrap();
    let b = render(&scene, &config.with_seed(2)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn buffer_rows_run_top_down() {
    let scene = Scene::new(Camera::new(), HittableList::new(), sky());
    let config = RenderConfig::default()
        .with_resolution(8, 6)
        .with_quality(2, 3)
        .with_seed(5);

    let image = render(&scene, &config).unwrap();

    // Sky is bluer (less red) toward the top
    assert!(image.get(3, 0).x < image.get(3, 5).x);

    // Buffer row 0 is the topmost scanline
    let mut row = vec![Color::ZERO; 8];
    render_scanline(&scene, &config, 5, &mut row);
    assert_eq!(image.row(0), row.as_slice());
    render_scanline(&scene, &config, 0, &mut row);
    assert_eq!(image.row(5), row.as_slice());
}

#[test]
fn bvh_matches_linear_scan() {
    let mut rng = StdRng::seed_from_u64(31);
    let material: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::splat(0.5)));

    let mut actors = Vec::new();
    for _ in 0..30 {
        let center = Vec3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        actors.push(sphere(center, rng.gen_range(0.3..1.2), material.clone()));
    }
    for _ in 0..10 {
        let c0 = Vec3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        let c1 = c0 + Vec3::new(0.0, rng.gen_range(0.0..2.0), 0.0);
        actors.push(Actor::new(
            Arc::new(MovingSphere::new(c0, c1, 0.0, 1.0, 0.5)),
            material.clone(),
        ));
    }
    for _ in 0..10 {
        let p0 = Vec3::new(
            rng.gen_range(-10.0..8.0),
            rng.gen_range(-10.0..8.0),
            rng.gen_range(-10.0..8.0),
        );
        let p1 = p0 + Vec3::new(rng.gen_range(0.5..2.0), 1.0, rng.gen_range(0.5..2.0));
        let rotated = RotateY::new(Arc::new(Cuboid::new(p0, p1)), rng.gen_range(0.0..90.0));
        actors.push(Actor::new(Arc::new(rotated), material.clone()));
    }
    // Moving shapes under a rotation, with keyframes past t = 1
    for _ in 0..5 {
        let c0 = Vec3::new(
            rng.gen_range(-10.0..0.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        let c1 = c0 + Vec3::new(rng.gen_range(4.0..10.0), 0.0, 0.0);
        let moving = MovingSphere::new(c0, c1, 0.0, 2.0, 1.0);
        let rotated = RotateY::new(Arc::new(moving), rng.gen_range(0.0..360.0));
        actors.push(Actor::new(Arc::new(rotated), material.clone()));
    }
    actors.push(Actor::new(
        Arc::new(RotateY::new(
            Arc::new(MovingSphere::new(
                Vec3::new(0.0, 0.0, -5.0),
                Vec3::new(10.0, 0.0, -5.0),
                0.0,
                2.0,
                1.0,
            )),
            0.0,
        )),
        material.clone(),
    ));
    actors.push(Actor::new(
        Arc::new(XyRect::new(-3.0, 3.0, -3.0, 3.0, -12.0)),
        material.clone(),
    ));

    let list: HittableList = actors.iter().cloned().collect();
    let bvh = Bvh::new(actors, 0.0, 2.0, &mut rng).unwrap();
    assert_eq!(bvh.bounding_box(0.0, 2.0).is_some(), list.bounding_box(0.0, 2.0).is_some());

    // The last keyframe of the unrotated mover is only reachable late in the shutter
    let late = Ray::new(Vec3::new(10.0, 0.0, 0.0), -Vec3::Z, 2.0);
    let forward = Interval::new(0.001, f64::INFINITY);
    let expected = list.hit(&late, forward, &mut rng).map(|rec| rec.t);
    assert!(expected.is_some());
    assert_eq!(bvh.hit(&late, forward, &mut rng).map(|rec| rec.t), expected);

    let mut hits = 0;
    for _ in 0..2000 {
        let origin = Vec3::new(
            rng.gen_range(-15.0..15.0),
            rng.gen_range(-15.0..15.0),
            rng.gen_range(-15.0..15.0),
        );
        let direction = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let ray = Ray::new(origin, direction, rng.gen_range(0.0..2.0));
        let ray_t = Interval::new(0.001, f64::INFINITY);

        let expected = list.hit(&ray, ray_t, &mut rng);
        let actual = bvh.hit(&ray, ray_t, &mut rng);
        match (expected, actual) {
            (None, None) => {}
            (Some(a), Some(b)) => {
                hits += 1;
                assert!((a.t - b.t).abs() < 1e-9, "t {} vs {}", a.t, b.t);
                assert!((a.p - b.p).length() < 1e-6);
            }
            (a, b) => panic!(
                "BVH disagrees with linear scan: {:?} vs {:?}",
                a.map(|rec| rec.t),
                b.map(|rec| rec.t)
            ),
        }
    }
    assert!(hits > 0);
}

/// The infinite plane y = 0, facing up.
struct GroundPlane;

impl Geometry for GroundPlane {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<SurfaceHit> {
        let t = -ray.origin().y / ray.direction().y;
        if !ray_t.surrounds(t) {
            return None;
        }
        let p = ray.at(t);
        Some(SurfaceHit {
            t,
            p,
            normal: Vec3::Y,
            u: p.x.rem_euclid(1.0),
            v: p.z.rem_euclid(1.0),
        })
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        None
    }
}

#[test]
fn unbounded_actor_renders_beside_index() {
    let gray: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::splat(0.5)));
    let plane = Actor::new(Arc::new(GroundPlane), gray.clone());
    let ball = sphere(Vec3::new(0.0, 1.0, -5.0), 0.5, gray.clone());
    let mut rng = StdRng::seed_from_u64(8);

    // The index refuses the plane outright
    let refused = Bvh::new(vec![ball.clone(), plane.clone()], 0.0, 1.0, &mut rng);
    assert!(matches!(refused, Err(RenderError::UnboundedGeometry { index: 1 })));

    // Bounded actors go in the BVH, the plane sits next to it in a list
    let mut world = HittableList::new();
    world.add(Bvh::new(vec![ball], 0.0, 1.0, &mut rng).unwrap());
    world.add(plane);
    assert!(world.bounding_box(0.0, 1.0).is_none());

    let camera = Camera::new().with_position(
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, -1.0),
        Vec3::Y,
    );
    let scene = Scene::new(camera, world, Background::Solid(Color::ONE));
    let config = RenderConfig::default()
        .with_resolution(20, 10)
        .with_quality(4, 5)
        .with_seed(12);

    let image = render(&scene, &config).unwrap();

    assert!(image.pixels.iter().all(|c| c.is_finite()));
    // Top row looks up into the sky, bottom row down onto the plane
    for x in 0..20 {
        assert!((image.get(x, 0) - Color::ONE).length() < 1e-12);
        let ground = image.get(x, 9);
        assert!(ground.x > 0.0 && ground.x <= 0.5 + 1e-12, "ground = {ground}");
    }
}
