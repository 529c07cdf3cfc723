//! Headless locomotion demo.
//!
//! Drives a [`Session`] on the flat demo world with a scripted input
//! sequence (walk, sprint, jump, slide, slide-jump) and logs the character's
//! state once per simulated tenth of a second. Useful for eyeballing the
//! controller's feel without a renderer attached.

use glam::{Vec2, Vec3};

use slipstream_game::{
    FlatWorld, Keys, KinematicBody, PlatformHooks, RawInput, RigidBody, Session, SessionConfig,
};

/// Render rate the script pretends to run at.
const FRAME_DT: f32 = 1.0 / 60.0;

/// Hooks that just log the side effects a real platform would perform.
struct LogHooks;

impl PlatformHooks for LogHooks {
    fn set_cursor_captured(&mut self, captured: bool) {
        log::info!("cursor captured: {captured}");
    }

    fn set_weapon_visible(&mut self, visible: bool) {
        log::info!("weapon visible: {visible}");
    }
}

/// Keys held during a given frame of the script.
fn scripted_keys(frame: usize) -> Keys {
    let mut keys = Keys::default();
    match frame {
        // Walk forward.
        0..=89 => {
            keys.press(Keys::FORWARD);
        }
        // Sprint.
        90..=149 => {
            keys.press(Keys::FORWARD);
            keys.press(Keys::SPRINT);
        }
        // Jump while running.
        150..=154 => {
            keys.press(Keys::FORWARD);
            keys.press(Keys::JUMP);
        }
        155..=209 => {
            keys.press(Keys::FORWARD);
        }
        // Slide: press and hold until the timer ends it.
        210..=269 => {
            keys.press(Keys::SLIDE);
        }
        // Recover, then slide-jump: slide briefly and jump out of it.
        270..=299 => {
            keys.press(Keys::FORWARD);
        }
        300..=309 => {
            keys.press(Keys::SLIDE);
        }
        310..=314 => {
            keys.press(Keys::SLIDE);
            keys.press(Keys::JUMP);
        }
        _ => {}
    }
    keys
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SessionConfig::default();
    let body = KinematicBody::new(Vec3::new(0.0, 0.0, 0.0), 0.0);
    let world = FlatWorld::new(0.0);

    let mut session = match Session::new(config, body, world) {
        Ok(session) => session,
        Err(err) => {
            log::error!("session rejected: {err}");
            return;
        }
    };
    let mut hooks = LogHooks;

    log::info!("starting scripted run: 400 frames at {:.1} fps", 1.0 / FRAME_DT);

    for frame in 0..400 {
        let raw = RawInput {
            keys: scripted_keys(frame),
            mouse_delta: Vec2::ZERO,
        };
        session.frame(&raw, FRAME_DT, &mut hooks);

        // Log every 6th frame (~10 Hz).
        if frame % 6 == 0 {
            let state = session.controller().state();
            let pose = session.camera().pose();
            log::info!(
                "t={:5.2}s pos=({:6.2},{:5.2},{:6.2}) speed={:5.2} grounded={} sliding={} cam_y={:5.2} fov={:5.1}",
                frame as f32 * FRAME_DT,
                session.body().position().x,
                session.body().position().y,
                session.body().position().z,
                state.horizontal_speed(),
                state.is_grounded,
                state.is_sliding,
                pose.offset_y,
                pose.current_fov,
            );
        }
    }

    let final_position = session.body().position();
    log::info!(
        "run complete: {} frames, final position ({:.2}, {:.2}, {:.2})",
        session.frame_count(),
        final_position.x,
        final_position.y,
        final_position.z,
    );
}
