//! Flap Core headless runner
//!
//! Drives the simulation with a fixed-step host loop and a simple autopilot.
//!
//! Usage:
//!   flap-core [basic|classic|full|<tuning.json>] [seed] [rounds]
//!   flap-core print-tuning [basic|classic|full]

use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use flap_core::audio::{AudioManager, LogBackend};
use flap_core::consts::*;
use flap_core::sim::{
    FrameInput, GamePhase, GameState, Hazard, fixed_update, frame_update, start_game,
};
use flap_core::{ConfigError, Presentation, Tuning, Variant};

/// Longest a single round may run
const MAX_ROUND_SECONDS: f32 = 90.0;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("print-tuning") {
        let variant = args
            .get(1)
            .and_then(|s| Variant::from_str(s))
            .unwrap_or_default();
        return match Tuning::for_variant(variant).to_json() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let tuning = match args.first() {
        Some(arg) => match load_tuning(arg) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let rounds = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(3u32);

    log::info!(
        "Flap Core (native) starting: {} variant, seed {}, {} rounds",
        tuning.variant.as_str(),
        seed,
        rounds
    );
    match run(tuning, seed, rounds) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// A preset name or a path to a JSON tuning file
fn load_tuning(arg: &str) -> Result<Tuning, ConfigError> {
    if let Some(variant) = Variant::from_str(arg) {
        return Ok(Tuning::for_variant(variant));
    }
    let json = std::fs::read_to_string(arg)
        .map_err(|e| ConfigError::Invalid(format!("cannot read {arg}: {e}")))?;
    Tuning::from_json(&json)
}

fn run(tuning: Tuning, seed: u64, rounds: u32) -> Result<(), ConfigError> {
    let ground = vec![Hazard::Ground {
        y: tuning.player.min_y + tuning.player.hurtbox_radius * 0.25,
    }];
    let mut view = Presentation::new(&tuning, AudioManager::new(Some(Box::new(LogBackend))));
    let mut state = GameState::new(tuning, seed)?;
    let mut pilot_rng = Pcg32::seed_from_u64(seed ^ 0x5eed);

    for round in 0..rounds {
        // Later rounds get sloppier so they end
        let skill = 0.995 - round as f32 * 0.01;

        start_game(&mut state);
        view.apply(state.drain_events());

        let mut accumulator = 0.0;
        let mut elapsed = 0.0;
        let mut peak_shake: f32 = 0.0;
        while elapsed < MAX_ROUND_SECONDS && state.phase != GamePhase::GameOver {
            let input = FrameInput {
                jump: autopilot(&state, &mut pilot_rng, skill),
            };
            frame_update(&mut state, &input, FRAME_DT);

            accumulator += FRAME_DT;
            let mut substeps = 0;
            while accumulator >= FIXED_DT && substeps < MAX_SUBSTEPS {
                fixed_update(&mut state, &ground, FIXED_DT);
                accumulator -= FIXED_DT;
                substeps += 1;
            }

            view.apply(state.drain_events());
            peak_shake = peak_shake.max(view.update(FRAME_DT));
            elapsed += FRAME_DT;
        }

        log::info!(
            "{} round {}: score {}, high score {}, {:.1}s, peak shake {:.2}, background at {:.3}",
            state.tuning().variant.as_str(),
            round + 1,
            state.score.score,
            state.score.high_score,
            elapsed,
            peak_shake,
            view.scroll.background
        );
    }

    Ok(())
}

/// Jump when below the next gap (or the middle of the screen) and not
/// already rising, with occasional missed taps
fn autopilot(state: &GameState, rng: &mut Pcg32, skill: f32) -> bool {
    match state.phase {
        GamePhase::WaitingForInput if !state.paused => return true,
        GamePhase::Playing => {}
        _ => return false,
    }

    let player = &state.player;
    let target_y = state
        .pipes
        .as_ref()
        .and_then(|pipes| {
            let half_width = pipes.tuning().half_width;
            pipes
                .iter()
                .filter(|o| o.pos.x + half_width > player.pos.x)
                .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
                .map(|o| o.pos.y)
        })
        .unwrap_or(0.0);

    let wants_jump = player.pos.y < target_y - 0.3 && player.vel_y < 0.5;
    wants_jump && rng.random::<f32>() < skill
}
