//! Headless Playback Example
//!
//! Loads a model, plays it for a few seconds without a window and logs the
//! fade as it happens. Useful for checking a model export on a build
//! machine.
//!
//! Usage:
//!   cargo run --example headless_playback -- [model.glb] [seconds] [speed]

use myth_player::{FrameChanges, HeadlessRenderer, Player, PlayerConfig};

fn main() -> anyhow::Result<()> {
    myth_player::logging::init();

    let mut args = std::env::args().skip(1);
    let config = PlayerConfig::studio();
    let model_path = args.next().unwrap_or_else(|| config.model_path.clone());
    let seconds: f32 = args.next().map(|s| s.parse::<f32>()).transpose()?.unwrap_or(5.0);
    let speed: f32 = args.next().map(|s| s.parse::<f32>()).transpose()?.unwrap_or(1.0);

    let renderer = HeadlessRenderer::new(config.render);
    let mut player = Player::new(config, renderer);
    if let Err(e) = player.load_environment() {
        log::warn!("Continuing without environment map: {e}");
    }
    let clip_name = player.load_model(&model_path)?.clips[0].name.clone();
    log::info!("Playing '{clip_name}' at {speed}x for {seconds}s");

    player.set_speed(speed)?;
    player.toggle_play();

    let dt = 1.0 / 60.0;
    let frames = (seconds / dt).ceil() as usize;
    for _ in 0..frames {
        let report = player.frame(dt);
        if report.changes.contains(FrameChanges::OPACITY_CHANGED) {
            log::info!(
                "t={:.2}s frame={:.1} opacity={:.3}",
                report.current_time,
                report.frame,
                report.opacity
            );
        }
        if report.changes.contains(FrameChanges::LOOPED) {
            log::info!("Clip looped");
        }
    }

    let renderer = player.renderer();
    log::info!(
        "Rendered {} frames, {} visible meshes in the last one",
        renderer.frames_rendered,
        renderer.last_frame.as_ref().map_or(0, |f| f.visible_meshes)
    );
    Ok(())
}
