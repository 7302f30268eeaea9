use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softrender::camera::Camera;
use softrender::colors;
use softrender::light::PointLight;
use softrender::math::Vec3;
use softrender::mesh::{Mesh, Vertex};
use softrender::render::{ColorBuffer, DepthBuffer, FrameBuffer, Renderer, ScanlineRasterizer};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn projected(x: f32, y: f32) -> Vertex {
    Vertex {
        coordinates: Vec3::new(x, y, 0.5),
        world_coordinates: Vec3::new(x, y, 5.0),
        normal: Vec3::new(0.0, 0.0, -1.0),
    }
}

fn small_triangle() -> [Vertex; 3] {
    [projected(100.0, 100.0), projected(120.0, 100.0), projected(110.0, 120.0)]
}

fn medium_triangle() -> [Vertex; 3] {
    [projected(100.0, 100.0), projected(300.0, 100.0), projected(200.0, 300.0)]
}

fn large_triangle() -> [Vertex; 3] {
    [projected(50.0, 50.0), projected(750.0, 100.0), projected(400.0, 550.0)]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let scanline = ScanlineRasterizer::new(PointLight::new(Vec3::new(0.0, 0.0, -100.0)));

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            let mut surface = ColorBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            let mut depth = DepthBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                depth.reset();
                let mut fb = FrameBuffer::new(&mut surface, &mut depth);
                let [v1, v2, v3] = *black_box(tri);
                scanline.draw_triangle(&mut fb, v1, v2, v3, colors::RED);
            });
        });
    }

    group.finish();
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_frame");
    let camera = Camera::default();

    for size in [1.0f32, 4.0, 8.0] {
        let meshes = [Mesh::cube(size)];
        group.bench_with_input(BenchmarkId::new("render", size), &meshes, |b, meshes| {
            let mut renderer = Renderer::new(ColorBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT));
            b.iter(|| {
                renderer.clear(colors::BLACK);
                renderer.render(black_box(&camera), black_box(meshes));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_cube_frame);
criterion_main!(benches);
