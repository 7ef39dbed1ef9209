//! Headless light volume driver.
//!
//! A scene thread builds randomized light volumes and publishes them; the
//! main thread streams each list into the GPU buffers and logs statistics.
//!
//! Usage: `light-volumes [options.toml] [frames]`

use std::path::Path;
use std::thread::JoinHandle;

use glam::Vec3;
use light_volumes::gpu::render_context::RenderContext;
use light_volumes::options::BuilderOptions;
use light_volumes::scene::{
    light_volume_feed, LightVolumeBuilder, LightVolumePublisher, RenderThread,
};
use light_volumes::{LightData, LightVolumeBuffer, LightVolumeError, Options};
use rand::Rng;

const DEFAULT_FRAMES: u32 = 240;
const WORLD_EXTENT: f32 = 64.0;

fn random_point(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.random_range(-WORLD_EXTENT..WORLD_EXTENT),
        rng.random_range(0.0..WORLD_EXTENT * 0.25),
        rng.random_range(-WORLD_EXTENT..WORLD_EXTENT),
    )
}

fn random_light(rng: &mut impl Rng) -> LightData {
    let position = random_point(rng);
    let radius = rng.random_range(2.0..24.0);
    let color = Vec3::new(
        rng.random_range(0.0..4.0),
        rng.random_range(0.0..4.0),
        rng.random_range(0.0..4.0),
    );
    let light = if rng.random_bool(0.3) {
        let direction = Vec3::new(
            rng.random_range(-1.0..1.0),
            -1.0,
            rng.random_range(-1.0..1.0),
        );
        LightData::projector(
            position,
            radius,
            color,
            direction,
            rng.random_range(0.2..1.2),
        )
    } else {
        LightData::omni(position, radius, color)
    };
    light.with_bulb_radius(rng.random_range(0.0..0.5))
}

fn scene_loop(
    mut publisher: LightVolumePublisher,
    options: BuilderOptions,
    frames: u32,
) {
    let mut rng = rand::rng();
    let mut builder = LightVolumeBuilder::new(options);

    for _ in 0..frames {
        builder.clear();
        for _ in 0..rng.random_range(16..128) {
            builder.add_light(random_light(&mut rng));
        }
        for _ in 0..rng.random_range(64..384) {
            let _ = builder
                .add_volume(random_point(&mut rng), rng.random_range(0.5..6.0));
        }
        publisher.publish(builder.build());
    }
}

/// Wait for the scene thread, turning a panic into an error.
fn join_scene(scene: JoinHandle<()>) -> Result<(), LightVolumeError> {
    scene.join().map_err(|payload| {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_owned());
        LightVolumeError::ThreadPanicked(msg)
    })
}

fn run() -> Result<(), LightVolumeError> {
    let mut args = std::env::args().skip(1);
    let options = match args.next() {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let ctx = pollster::block_on(RenderContext::headless())?;
    let mut lvb = LightVolumeBuffer::new(&ctx.device, &options)?;
    lvb.create(&ctx.device);

    let (publisher, mut receiver) = light_volume_feed();
    let builder_options = options.builder.clone();
    let scene = std::thread::Builder::new()
        .name("light-scene".into())
        .spawn(move || scene_loop(publisher, builder_options, frames))
        .map_err(LightVolumeError::ThreadSpawn)?;

    let mut uploaded = 0u64;
    let mut lossy = 0u64;
    let mut streamed = 0u64;
    loop {
        let finished = scene.is_finished();
        if receiver.refresh() {
            lvb.update_from_source(&ctx.queue, &receiver, RenderThread::Process);
            let _ = ctx.queue.submit(std::iter::empty());

            let stats = lvb.stats();
            uploaded += 1;
            streamed += stats.info_upload_bytes + stats.range_upload_bytes;
            if stats.summary.is_lossy() {
                lossy += 1;
            }
            log::debug!(
                "frame {uploaded}: {} volumes, {} infos, slot {:?}",
                lvb.num_volumes(),
                stats.summary.infos,
                lvb.current_slot()
            );
        } else if finished {
            break;
        } else {
            std::thread::yield_now();
        }
    }

    join_scene(scene)?;

    for (label, used, allocated) in lvb.buffer_info() {
        log::info!("{label}: {used} / {allocated} bytes");
    }
    let report = serde_json::json!({
        "frames_published": frames,
        "frames_uploaded": uploaded,
        "frames_truncated": lossy,
        "bytes_streamed": streamed,
        "gpu_bytes": lvb.memory_bytes(),
    });
    log::info!("{report}");

    lvb.release();
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
