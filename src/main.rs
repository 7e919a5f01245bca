//! Catch entry point
//!
//! Native builds run a headless demo: a simulated player taps the target after
//! a random reaction delay while the engine runs in real time.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use catch_game::consts::{LEVEL_COUNT, START_SECONDS};
    use catch_game::hud::{banner, display_seconds};
    use catch_game::{Clock, Engine, GameEvent};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    env_logger::init();
    log::info!("Catch (native) starting...");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut engine = Engine::new(seed);
    engine.subscribe(|event| match event {
        GameEvent::TimeUpdate { remaining } => {
            log::trace!("{}s left", display_seconds(*remaining));
        }
        GameEvent::ColorChanged { inverted } => log::debug!("Colors inverted: {inverted}"),
        GameEvent::LevelChanged { level } => log::info!("Level {level}"),
        GameEvent::Finished { outcome } => log::info!("{}", banner(*outcome)),
    });

    // Average reaction fits the budget most runs, not all
    let mut player = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
    let max_reaction = 2.0 * START_SECONDS / f64::from(LEVEL_COUNT);
    let mut level = 0;
    let mut tap_at = 0.0;

    engine.start();
    while engine.snapshot().outcome.is_none() {
        std::thread::sleep(Duration::from_millis(16));
        engine.pump();

        let now = engine.clock().now();
        let snapshot = engine.snapshot();
        if snapshot.level != level {
            level = snapshot.level;
            tap_at = now + player.random_range(0.2..max_reaction);
        }
        if now >= tap_at {
            engine.report_button_press();
        }
    }

    let snapshot = engine.snapshot();
    log::info!(
        "Finished on level {} with {} s to spare",
        snapshot.level,
        display_seconds(snapshot.remaining_seconds)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM hosts drive `catch_game::Engine` directly
}
