// Renders an alpha masked plane that recedes towards the horizon, once per alpha test policy.
// The left third uses the basic test, the middle and right thirds the hashed tests.
// Basic alpha testing aliases in the distance, hashed alpha testing turns the same
// coverage into stable noise.
use rayon::prelude::*;
use shading_core::{
    alpha_test::ScreenDerivatives,
    config::{AlphaTestPolicy, MaterialConfig},
    flags::{AlphaMode, ChannelMode},
    lod::ImplicitLod,
    low_discrepancy::Halton23,
    material::{prepare_shading_data, Material, MaterialTextures, SurfaceInteraction},
    shading::eval_material,
    Brdf, Image, Light, LightSample, RgbF, RgbaF, SamplerState, ShadingData, Vec2f, Vec3f,
};

/// Grass like stripes: alpha fades out along u
struct Stripes {
    frequency: f32,
}

impl Image for Stripes {
    fn sample(&self, _sampler: &SamplerState, uv: Vec2f) -> RgbaF {
        let t = (uv.x * self.frequency).fract();
        let alpha = 1.0 - t;
        RgbaF::new(0.2 + 0.5 * t, 0.6, 0.1, alpha)
    }

    fn sample_level(&self, sampler: &SamplerState, uv: Vec2f, _lod: f32) -> RgbaF {
        self.sample(sampler, uv)
    }

    fn sample_grad(&self, sampler: &SamplerState, uv: Vec2f, _: Vec2f, _: Vec2f) -> RgbaF {
        self.sample(sampler, uv)
    }
}

struct Sun {
    direction: Vec3f,
    radiance: RgbF,
}

impl Light for Sun {
    fn eval(&self, sd: &ShadingData) -> LightSample {
        let l = self.direction;
        let h = (l + sd.v).normalize_or_zero();
        LightSample {
            l,
            h,
            diffuse: self.radiance,
            specular: self.radiance,
            n_dot_l: sd.n.dot(l),
            n_dot_h: sd.n.dot(h),
            l_dot_h: l.dot(h),
        }
    }
}

struct Lambert;

impl Brdf for Lambert {
    fn diffuse(&self, sd: &ShadingData, _ls: &LightSample) -> RgbF {
        sd.diffuse * std::f32::consts::FRAC_1_PI
    }

    fn specular(&self, _sd: &ShadingData, _ls: &LightSample) -> RgbF {
        RgbF::ZERO
    }
}

struct Camera {
    center: Vec3f,
    forward: Vec3f,
    right: Vec3f,
    up: Vec3f,
    size: (usize, usize),
}

impl Camera {
    fn direction(&self, x: f32, y: f32) -> Vec3f {
        let cam_x = x / self.size.0 as f32 * 2.0 - 1.0;
        let cam_y = y / self.size.1 as f32 * 2.0 - 1.0;
        (self.forward + self.right * cam_x + self.up * cam_y).normalize()
    }

    /// Intersection with the plane `z = 0`
    fn hit(&self, x: f32, y: f32) -> Option<Vec3f> {
        let direction = self.direction(x, y);
        if direction.z >= 0.0 {
            return None;
        }
        let t = -self.center.z / direction.z;
        Some(self.center + direction * t)
    }
}

fn shade_pixel(
    camera: &Camera,
    material: &Material<Stripes>,
    config: &MaterialConfig,
    x: f32,
    y: f32,
) -> RgbF {
    let background = RgbF::new(0.5, 0.7, 1.0);
    let Some(pos_w) = camera.hit(x, y) else {
        return background;
    };
    // one pixel finite differences stand in for the hardware derivatives
    let derivatives = camera
        .hit(x + 1.0, y)
        .zip(camera.hit(x, y + 1.0))
        .map(|(px, py)| ScreenDerivatives {
            dpdx: px - pos_w,
            dpdy: py - pos_w,
        });
    let interaction = SurfaceInteraction {
        pos_w,
        normal_w: Vec3f::Z,
        bitangent_w: Vec3f::Y,
        uv: Vec2f::new(pos_w.x, pos_w.y),
        light_map_uv: Vec2f::ZERO,
        derivatives,
    };
    let sun = Sun {
        direction: Vec3f::new(0.3, -0.4, 0.8).normalize(),
        radiance: RgbF::splat(3.0),
    };
    prepare_shading_data(&interaction, material, camera.center, &ImplicitLod, config)
        .map_or(background, |sd| {
            eval_material(&sd, &sun, &Lambert, 1.0).color.truncate()
        })
}

fn save_image(path: &std::path::Path, buffer: &[u8], width: u32, height: u32) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = std::io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(&mut writer, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_gamma(png::ScaledFloat::new(1.0 / 2.2));

    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(buffer).unwrap();
}

fn main() {
    let panel_size = (480, 360);
    let num_samples = 16;

    let center = Vec3f::new(0.0, -4.0, 1.0);
    let target = Vec3f::new(0.0, 0.0, 0.0);
    let forward = (target - center).normalize();
    let right = forward.cross(Vec3f::Z).normalize() * panel_size.0 as f32 / panel_size.1 as f32;
    let up = -right.cross(forward).normalize();
    let camera = Camera {
        center,
        forward: forward * 1.5,
        right,
        up,
        size: panel_size,
    };

    let material = Material {
        flags: Material::<Stripes>::default()
            .flags
            .with_diffuse(ChannelMode::Textured)
            .with_alpha_mode(AlphaMode::Mask),
        alpha_threshold: 0.5,
        textures: MaterialTextures {
            base_color: Some(Stripes { frequency: 4.0 }),
            ..MaterialTextures::default()
        },
        ..Material::default()
    };

    let policies = [
        AlphaTestPolicy::Basic,
        AlphaTestPolicy::HashedIsotropic,
        AlphaTestPolicy::HashedAnisotropic,
    ];
    let width = panel_size.0 * policies.len();
    let mut image: Vec<u8> = vec![0; 3 * width * panel_size.1];

    image
        .par_chunks_mut(3 * width)
        .enumerate()
        .for_each(|(y, row)| {
            for (panel, policy) in policies.iter().enumerate() {
                let config = MaterialConfig::default().with_alpha_test(*policy);
                for x in 0..panel_size.0 {
                    let mut color = RgbF::ZERO;
                    for jitter in Halton23::new().take(num_samples) {
                        let px = x as f32 + jitter.x as f32;
                        // flip, so the horizon ends up at the top
                        let py = (panel_size.1 - 1 - y) as f32 + jitter.y as f32;
                        color += shade_pixel(&camera, &material, &config, px, py);
                    }
                    color /= num_samples as f32;

                    let offset = (panel * panel_size.0 + x) * 3;
                    row[offset] = (color.x * 255.0).clamp(0.0, 255.0).floor() as u8;
                    row[offset + 1] = (color.y * 255.0).clamp(0.0, 255.0).floor() as u8;
                    row[offset + 2] = (color.z * 255.0).clamp(0.0, 255.0).floor() as u8;
                }
            }
        });

    save_image(
        std::path::Path::new("alpha_plane.png"),
        &image,
        width as u32,
        panel_size.1 as u32,
    );
    println!("wrote alpha_plane.png");
}
