//! Frame and fixed-step updates plus the session entry points
//!
//! The host calls [`frame_update`] once per rendered frame and
//! [`fixed_update`] once per physics step. [`start_game`], [`pause_game`],
//! [`game_over`] and [`mute`] are the only other ways into the state machine.

use super::collision::{CollisionResult, HazardLayer, probe_hazards};
use super::scheduler::TaskContext;
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::SoundEffect;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Jump pressed this frame (edge, not level)
    pub jump: bool,
}

/// Begin a new run. The simulation resumes one frame later.
pub fn start_game(state: &mut GameState) {
    state.emit(GameEvent::StartControlVisible(false));

    state.player.visible = true;
    state.emit(GameEvent::PlayerVisible(true));
    state.player.reset(&state.tuning.player);

    if let Some(pipes) = state.pipes.as_mut() {
        pipes.reset();
    }

    state.score.reset();
    if state.tuning.features.score_display {
        state.emit(GameEvent::ScoreChanged(0));
        state.emit(GameEvent::HideHighScore);
    }

    state.phase = GamePhase::WaitingForInput;
    state.emit(GameEvent::Cue(SoundEffect::Start));

    // Hold still until the reset above has been presented
    state.paused = true;
    pause_game(state, false, true);

    log::debug!("Game started (seed {})", state.seed);
}

/// Pause or resume, optionally one frame late.
///
/// Leaving the pause always requires a fresh jump, so an active run drops
/// back to waiting for input.
pub fn pause_game(state: &mut GameState, value: bool, delay: bool) {
    if state.phase == GamePhase::Playing {
        state.phase = GamePhase::WaitingForInput;
    }

    if delay {
        state.scheduler.defer_pause(value);
    } else {
        state.scheduler.cancel_deferred_pause();
        state.paused = value;
    }
}

/// End the current run. Ignored unless playing.
pub fn game_over(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        log::debug!("Ignoring game over in {:?}", state.phase);
        return;
    }

    state.scheduler.cancel_deferred_pause();
    state.paused = true;
    state.phase = GamePhase::GameOver;
    state.emit(GameEvent::StartControlVisible(true));

    if state.score.record_game_over() {
        state.emit(GameEvent::Cue(SoundEffect::HighScore));
    }

    if state.tuning.features.score_display {
        state.emit(GameEvent::HideCurrentScore);
        state.emit(GameEvent::ShowHighScore(state.score.high_score));
    }

    log::info!(
        "Game over: score {}, high score {}",
        state.score.score,
        state.score.high_score
    );
}

/// Forward the mute flag to the audio layer
pub fn mute(state: &mut GameState, value: bool) {
    state.emit(GameEvent::Mute(value));
}

/// Variable-rate update: input, player motion, pipes, deferred tasks
pub fn frame_update(state: &mut GameState, input: &FrameInput, dt: f32) {
    state.clock += dt;

    let active = matches!(state.phase, GamePhase::WaitingForInput | GamePhase::Playing);
    if active && !state.paused {
        update_movement(state, input, dt);
    }

    poll_tasks(state, dt);
}

fn update_movement(state: &mut GameState, input: &FrameInput, dt: f32) {
    if input.jump {
        if state.phase == GamePhase::WaitingForInput {
            state.phase = GamePhase::Playing;
            state
                .scheduler
                .start_sprite_cadence(state.tuning.player.animation_interval);
            log::debug!("First input, now playing");
        }

        state.emit(GameEvent::Cue(SoundEffect::Flap));
        state.player.jump(&state.tuning.player);
    }

    if state.phase == GamePhase::WaitingForInput {
        state.player.idle_bob(&state.tuning.player, state.clock);
        return;
    }

    state.player.step(&state.tuning.player, dt);

    let rewards = match state.pipes.as_mut() {
        Some(pipes) => pipes.advance(dt, &mut state.rng),
        None => 0,
    };
    if rewards > 0 {
        for _ in 0..rewards {
            state.emit(GameEvent::Cue(SoundEffect::Point));
        }
        state.score.add(rewards);
        if state.tuning.features.score_display {
            state.emit(GameEvent::ScoreChanged(state.score.score));
        }
    }
}

fn poll_tasks(state: &mut GameState, dt: f32) {
    if state.scheduler.is_empty() {
        return;
    }

    let mut ctx = TaskContext {
        paused: state.paused,
        playing: state.phase == GamePhase::Playing,
    };
    let mut sprite_frames = 0;
    state.scheduler.poll(&mut ctx, dt, || sprite_frames += 1);

    state.paused = ctx.paused;
    for _ in 0..sprite_frames {
        state.emit(GameEvent::NextSprite);
    }
}

/// Fixed-rate update: background scroll and hazard checks.
///
/// `hazards` is the host's hazard layer; pipes are checked after it when the
/// pipes feature is on.
pub fn fixed_update(state: &mut GameState, hazards: &dyn HazardLayer, dt: f32) {
    let active = matches!(state.phase, GamePhase::WaitingForInput | GamePhase::Playing);
    if !active || state.paused {
        return;
    }

    let params = state.scroll.advance(dt);
    state.emit(GameEvent::Scroll(params));

    if state.phase != GamePhase::Playing {
        return;
    }

    let hit = check_layer(state, hazards, dt).or_else(|| {
        state
            .pipes
            .as_ref()
            .and_then(|pipes| check_layer(state, pipes, dt))
    });
    let Some(hit) = hit else {
        return;
    };

    state.player.pos = hit.corrected_pos;
    state.emit(GameEvent::Cue(SoundEffect::Thud));
    state.emit(GameEvent::ResetSprite);
    state.emit(GameEvent::Shake {
        intensity: (state.player.vel_y * state.tuning.shake.intensity).abs(),
        duration: state.tuning.shake.time,
    });
    log::debug!("Hit {:?} at {:?}", hit.hazard, hit.point);

    game_over(state);
}

fn check_layer(state: &GameState, layer: &dyn HazardLayer, dt: f32) -> Option<CollisionResult> {
    let tuning = &state.tuning.player;
    probe_hazards(
        layer,
        state.player.pos,
        state.player.vel_y,
        dt,
        tuning.hurtbox_radius,
        tuning.ground_hit_offset,
    )
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::{Tuning, Variant};
    use crate::consts::{FIXED_DT, FRAME_DT};
    use crate::sim::collision::Hazard;
    use crate::sim::obstacles::ObstacleId;

    const JUMP: FrameInput = FrameInput { jump: true };
    const IDLE: FrameInput = FrameInput { jump: false };

    fn no_hazards() -> Vec<Hazard> {
        Vec::new()
    }

    /// Started and unpaused, waiting for the first jump
    fn started(variant: Variant) -> GameState {
        let mut state = GameState::new(Tuning::for_variant(variant), 12345).unwrap();
        start_game(&mut state);
        frame_update(&mut state, &IDLE, FRAME_DT);
        state.events.clear();
        state
    }

    fn playing(variant: Variant) -> GameState {
        let mut state = started(variant);
        frame_update(&mut state, &JUMP, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        state.events.clear();
        state
    }

    #[test]
    fn test_start_game_unpauses_one_frame_later() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        start_game(&mut state);
        assert_eq!(state.phase, GamePhase::WaitingForInput);
        assert!(state.paused);
        assert!(state.player.visible);

        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::StartControlVisible(false)));
        assert!(events.contains(&GameEvent::PlayerVisible(true)));
        assert!(events.contains(&GameEvent::ScoreChanged(0)));
        assert!(events.contains(&GameEvent::HideHighScore));
        assert!(events.contains(&GameEvent::Cue(SoundEffect::Start)));

        // The deferral frame itself does not move anything
        let y = state.player.pos.y;
        frame_update(&mut state, &JUMP, FRAME_DT);
        assert!(!state.paused);
        assert_eq!(state.phase, GamePhase::WaitingForInput);
        assert_eq!(state.player.pos.y, y);
    }

    #[test]
    fn test_waiting_bobs_without_gravity() {
        let mut state = started(Variant::Full);
        let t = state.tuning.player.clone();
        for _ in 0..120 {
            frame_update(&mut state, &IDLE, FRAME_DT);
            assert_eq!(state.player.vel_y, t.starting_force);
            assert!((state.player.pos.y - t.starting_y).abs() <= t.idle_bob_intensity + 1e-5);
        }
        // Pipes hold still until play starts
        let pipes = state.pipes.as_ref().unwrap();
        assert!(pipes.iter().all(|o| o.pos == o.reset_pos));
    }

    #[test]
    fn test_first_jump_enters_playing() {
        let mut state = started(Variant::Full);
        frame_update(&mut state, &JUMP, FRAME_DT);

        assert_eq!(state.phase, GamePhase::Playing);
        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::Cue(SoundEffect::Flap)));
        // Cadence shows its first frame right away
        assert!(events.contains(&GameEvent::NextSprite));
        assert!(state.scheduler.has_sprite_cadence());

        let t = &state.tuning.player;
        assert!((state.player.vel_y - (t.jump_force + t.gravity * FRAME_DT)).abs() < 1e-5);
    }

    #[test]
    fn test_playing_step_follows_integration() {
        let mut state = playing(Variant::Full);
        let t = state.tuning.player.clone();
        let (y0, v0) = (state.player.pos.y, state.player.vel_y);

        frame_update(&mut state, &IDLE, FRAME_DT);
        fixed_update(&mut state, &no_hazards(), FIXED_DT);

        let expected_y = (y0 + v0 * FRAME_DT).clamp(t.min_y, t.max_y);
        assert!((state.player.pos.y - expected_y).abs() < 1e-5);
        assert!((state.player.vel_y - (v0 + t.gravity * FRAME_DT)).abs() < 1e-5);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_full_session_scenario() {
        let mut state = GameState::new(Tuning::default(), 42).unwrap();
        assert_eq!(state.phase, GamePhase::Idle);

        start_game(&mut state);
        frame_update(&mut state, &IDLE, FRAME_DT);
        assert_eq!(state.phase, GamePhase::WaitingForInput);
        assert!(!state.paused);

        frame_update(&mut state, &JUMP, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);

        for _ in 0..5 {
            frame_update(&mut state, &IDLE, FRAME_DT);
            fixed_update(&mut state, &no_hazards(), FIXED_DT);
            assert_eq!(state.phase, GamePhase::Playing);
        }
        state.events.clear();

        let ground_y = state.player.pos.y - 0.05;
        let hazards = vec![Hazard::Ground { y: ground_y }];
        fixed_update(&mut state, &hazards, FIXED_DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.paused);
        let t = &state.tuning.player;
        let expected_y = ground_y + t.hurtbox_radius * t.ground_hit_offset;
        assert!((state.player.pos.y - expected_y).abs() < 1e-5);

        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::Cue(SoundEffect::Thud)));
        assert!(events.contains(&GameEvent::ResetSprite));
        assert!(events.contains(&GameEvent::StartControlVisible(true)));
        assert!(events.contains(&GameEvent::HideCurrentScore));
        assert!(events.contains(&GameEvent::ShowHighScore(0)));
        assert!(events.iter().any(|e| matches!(e, GameEvent::Shake { .. })));

        // Nothing moves after game over
        let y = state.player.pos.y;
        frame_update(&mut state, &JUMP, FRAME_DT);
        fixed_update(&mut state, &hazards, FIXED_DT);
        assert_eq!(state.player.pos.y, y);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_shake_scales_with_impact_velocity() {
        let mut state = playing(Variant::Full);
        state.player.vel_y = -5.0;
        let hazards = vec![Hazard::Ground {
            y: state.player.pos.y - 0.05,
        }];
        fixed_update(&mut state, &hazards, FIXED_DT);

        let shake = state
            .drain_events()
            .find_map(|e| match e {
                GameEvent::Shake {
                    intensity,
                    duration,
                } => Some((intensity, duration)),
                _ => None,
            })
            .unwrap();
        assert!((shake.0 - 5.0 * 0.2).abs() < 1e-5);
        assert_eq!(shake.1, 0.09);
    }

    #[test]
    fn test_new_high_score_cue() {
        let mut state = playing(Variant::Full);
        state.score.score = 7;
        state.score.high_score = 5;
        game_over(&mut state);
        assert_eq!(state.score.high_score, 7);
        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::Cue(SoundEffect::HighScore)));
        assert!(events.contains(&GameEvent::ShowHighScore(7)));
    }

    #[test]
    fn test_no_cue_without_new_high_score() {
        let mut state = playing(Variant::Full);
        state.score.score = 3;
        state.score.high_score = 5;
        game_over(&mut state);
        assert_eq!(state.score.high_score, 5);
        let events: Vec<_> = state.drain_events().collect();
        assert!(!events.contains(&GameEvent::Cue(SoundEffect::HighScore)));
    }

    #[test]
    fn test_game_over_only_from_playing() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        game_over(&mut state);
        assert_eq!(state.phase, GamePhase::Idle);

        let mut state = started(Variant::Full);
        game_over(&mut state);
        assert_eq!(state.phase, GamePhase::WaitingForInput);
        assert!(state.events.is_empty());

        // Hazards are ignored while waiting
        let hazards = vec![Hazard::Circle {
            center: state.player.pos,
            radius: 1.0,
        }];
        fixed_update(&mut state, &hazards, FIXED_DT);
        assert_eq!(state.phase, GamePhase::WaitingForInput);
    }

    #[test]
    fn test_pipe_reward_scores_once() {
        let mut state = playing(Variant::Full);
        let reward_x = state.tuning.pipes.reward_x;
        let pipes = state.pipes.as_mut().unwrap();
        pipes.get_mut(ObstacleId(0)).unwrap().pos.x = reward_x + 0.001;

        frame_update(&mut state, &IDLE, FRAME_DT);
        assert_eq!(state.score.score, 1);
        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::Cue(SoundEffect::Point)));
        assert!(events.contains(&GameEvent::ScoreChanged(1)));

        for _ in 0..10 {
            frame_update(&mut state, &IDLE, FRAME_DT);
        }
        assert_eq!(state.score.score, 1);
    }

    #[test]
    fn test_classic_variant_has_no_pipes_or_score() {
        let mut state = playing(Variant::Classic);
        assert!(state.pipes.is_none());
        for _ in 0..120 {
            frame_update(&mut state, &IDLE, FRAME_DT);
            fixed_update(&mut state, &no_hazards(), FIXED_DT);
        }
        assert_eq!(state.score.score, 0);

        let t = state.tuning.player.clone();
        state.player.vel_y = 0.0;
        state.player.pos.y = 0.0;
        let hazards = vec![Hazard::Ground { y: -0.1 }];
        fixed_update(&mut state, &hazards, FIXED_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!((state.player.pos.y - (-0.1 + t.hurtbox_radius * t.ground_hit_offset)).abs() < 1e-5);

        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::Cue(SoundEffect::Thud)));
        assert!(!events.iter().any(|e| matches!(
            e,
            GameEvent::ScoreChanged(_) | GameEvent::ShowHighScore(_) | GameEvent::HideCurrentScore
        )));
    }

    #[test]
    fn test_basic_variant_runs_without_pipes() {
        let mut state = playing(Variant::Basic);
        assert!(state.pipes.is_none());
        for _ in 0..60 {
            frame_update(&mut state, &IDLE, FRAME_DT);
            fixed_update(&mut state, &no_hazards(), FIXED_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.score, 0);
        assert!(state.player.vel_y >= -state.tuning.player.max_up_force);
    }

    #[test]
    fn test_pipe_collision_ends_game() {
        let mut state = playing(Variant::Full);
        let player_pos = state.player.pos;
        // Gap far above the player so the lower pipe body covers them
        let pipes = state.pipes.as_mut().unwrap();
        pipes.get_mut(ObstacleId(0)).unwrap().pos = Vec2::new(player_pos.x, player_pos.y + 5.0);

        fixed_update(&mut state, &no_hazards(), FIXED_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_start_game_resets_score_and_pipes() {
        let mut state = playing(Variant::Full);
        for _ in 0..200 {
            frame_update(&mut state, &IDLE, FRAME_DT);
        }
        state.score.score = 4;
        game_over(&mut state);

        start_game(&mut state);
        assert_eq!(state.score.score, 0);
        assert_eq!(state.score.high_score, 4);
        let pipes = state.pipes.as_ref().unwrap();
        assert!(pipes.iter().all(|o| o.pos == o.reset_pos && !o.reward_claimed));
        let t = &state.tuning.player;
        assert_eq!(state.player.pos, Vec2::new(t.starting_x, t.starting_y));
        assert_eq!(state.player.rotation, 0.0);
    }

    #[test]
    fn test_pause_requires_fresh_jump() {
        let mut state = playing(Variant::Full);
        pause_game(&mut state, true, false);
        assert!(state.paused);
        assert_eq!(state.phase, GamePhase::WaitingForInput);

        frame_update(&mut state, &IDLE, FRAME_DT);
        assert!(!state.scheduler.has_sprite_cadence());

        pause_game(&mut state, false, false);
        frame_update(&mut state, &IDLE, FRAME_DT);
        assert_eq!(state.phase, GamePhase::WaitingForInput);

        frame_update(&mut state, &JUMP, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.scheduler.has_sprite_cadence());
    }

    #[test]
    fn test_delayed_pause() {
        let mut state = playing(Variant::Full);
        pause_game(&mut state, true, true);
        assert!(!state.paused);
        frame_update(&mut state, &IDLE, FRAME_DT);
        assert!(state.paused);
    }

    #[test]
    fn test_immediate_pause_overrides_pending_unpause() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        start_game(&mut state);
        pause_game(&mut state, true, false);
        frame_update(&mut state, &IDLE, FRAME_DT);
        assert!(state.paused);
    }

    #[test]
    fn test_paused_ignores_jump() {
        let mut state = started(Variant::Full);
        pause_game(&mut state, true, false);
        frame_update(&mut state, &JUMP, FRAME_DT);
        assert_eq!(state.phase, GamePhase::WaitingForInput);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_scroll_only_while_running() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        fixed_update(&mut state, &no_hazards(), FIXED_DT);
        assert_eq!(state.scroll.phase, 0.0);

        let mut state = started(Variant::Full);
        fixed_update(&mut state, &no_hazards(), FIXED_DT);
        assert!(state.scroll.phase > 0.0);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Scroll(_)))
        );
    }

    #[test]
    fn test_sprite_cadence_runs_while_playing() {
        let mut state = playing(Variant::Full);
        let mut frames = 0;
        // One second of play at the default 0.13 s interval
        for _ in 0..60 {
            frame_update(&mut state, &FrameInput { jump: frames % 20 == 0 }, FRAME_DT);
            frames += 1;
        }
        let sprites = state
            .drain_events()
            .filter(|e| *e == GameEvent::NextSprite)
            .count();
        assert!((6..=9).contains(&sprites), "got {sprites}");
    }

    #[test]
    fn test_zero_sprite_interval_does_not_stall_frame() {
        let mut state = started(Variant::Full);
        // Bypasses validation on purpose
        state.tuning.player.animation_interval = 0.0;
        frame_update(&mut state, &JUMP, FRAME_DT);
        for _ in 0..3 {
            frame_update(&mut state, &IDLE, FRAME_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        let sprites = state
            .drain_events()
            .filter(|e| *e == GameEvent::NextSprite)
            .count();
        assert!(sprites >= 4, "got {sprites}");
    }

    #[test]
    fn test_mute_emits_event() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        mute(&mut state, true);
        assert_eq!(state.events, vec![GameEvent::Mute(true)]);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Tuning::default(), 99999).unwrap();
        let mut b = GameState::new(Tuning::default(), 99999).unwrap();
        for state in [&mut a, &mut b] {
            start_game(state);
            for i in 0..400 {
                let input = FrameInput { jump: i % 25 == 1 };
                frame_update(state, &input, FRAME_DT);
                fixed_update(state, &no_hazards(), FIXED_DT);
            }
        }

        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.score, b.score);
        let pa: Vec<Vec2> = a.pipes.as_ref().unwrap().iter().map(|o| o.pos).collect();
        let pb: Vec<Vec2> = b.pipes.as_ref().unwrap().iter().map(|o| o.pos).collect();
        assert_eq!(pa, pb);
    }
}
