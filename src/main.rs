//! Crab Tide entry point
//!
//! The web build is driven from JavaScript through `crab_tide::web`. Natively
//! this runs a headless demo run and prints the outcome.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Crab Tide (native) starting headless demo...");
    log::info!("Run the web build for the playable game");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is crab_tide::web::wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use crab_tide::sim::{GameEvent, GamePhase};
    use crab_tide::{Session, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Safety cap on the demo length (effective seconds)
    const MAX_SECS: f64 = 120.0;

    /// Play one run with a pointer that sweeps the beach
    pub fn run() {
        let mut session = Session::new(Tuning::default(), 0.0);
        let mut now = 0.0;

        for phase in [GamePhase::Loading, GamePhase::Ready, GamePhase::Playing] {
            if let Err(e) = session.request_phase_transition(phase) {
                log::error!("Demo could not start: {e}");
                return;
            }
        }

        let mut flips = 0;
        let mut footsteps = 0;
        let mut collected = 0;

        while session.phase() != GamePhase::GameOver && now < MAX_SECS * 1000.0 {
            now += FRAME_MS;
            let t = (now / 1000.0) as f32;
            // Sweep side to side, dipping toward the sea and back
            let target = Vec2::new((t * 0.7).sin() * 30.0, 15.0 + (t * 0.45).cos() * 20.0);
            session.set_crab_target_input(Some(target));
            session.frame(now);

            for event in session.drain_events() {
                match event {
                    GameEvent::Flipped => flips += 1,
                    GameEvent::Footstep { .. } => footsteps += 1,
                    GameEvent::ShellCollected { scored: true, .. } => collected += 1,
                    GameEvent::PhaseChanged { from, to } => {
                        println!("{:>7.2}s  {} -> {}", now / 1000.0, from.as_str(), to.as_str());
                    }
                    _ => {}
                }
            }
        }

        let snapshot = session.snapshot();
        println!();
        println!("Shells scored:  {collected}");
        println!("Flips:          {flips}");
        println!("Footsteps:      {footsteps}");
        println!("High score:     {}", snapshot.high_score);
        println!("Banked shells:  {}", snapshot.total_shells);
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("\nFinal snapshot:\n{json}"),
            Err(e) => log::warn!("Could not encode snapshot: {e}"),
        }
    }
}
