//! Algoviz headless demo
//!
//! Plays one algorithm trace and then runs a race, printing progress.
//!
//! Usage: `algoviz-demo [algorithm] [array_size] [speed]`

use std::env;
use std::time::Duration;

use algoviz_trace::AlgorithmKind;
use algoviz_vis::{
    format_seconds, Player, PlayerConfig, Race, RaceConfig, TokioScheduler, DEFAULT_ARRAY_SIZE,
    DEFAULT_SPEED,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algoviz_vis=info,algoviz_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let algorithm: AlgorithmKind = match args.get(1) {
        Some(name) => name.parse()?,
        None => AlgorithmKind::QuickSort,
    };

    let array_size: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ARRAY_SIZE);

    let speed: u32 = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SPEED);

    println!("Algoviz Demo");
    println!("============");
    println!();

    let mut sched = TokioScheduler::new();

    // Playback
    let config = PlayerConfig::for_algorithm(algorithm)
        .with_array_size(array_size)
        .with_speed(speed);
    let mut player = Player::new(config)?;
    println!("{} on {:?}", algorithm, player.array());
    if let Some(target) = player.target() {
        println!("  target: {}", target);
    }
    if let Some(advisory) = player.advisory() {
        println!("  {}", advisory);
    }

    player.start(&mut sched)?;
    while !player.state().completed {
        sched.run_for(Duration::from_secs(1), &mut player).await;
        let state = player.state();
        println!(
            "  {:>3}%  step {}/{}  comparisons {}  swaps {}",
            state.progress_percent, state.step_index, state.total_steps, state.comparisons, state.swaps
        );
    }
    let state = player.state();
    println!("  final: {:?}", state.current_array);
    println!("  time: {}", format_seconds(state.time_elapsed_ms));
    player.teardown(&mut sched);
    println!();

    // Race
    let category = algorithm.category();
    let mut race = Race::new(
        RaceConfig::for_category(category)
            .with_array_size(array_size)
            .with_speed(speed),
    )?;
    for &kind in category.algorithms() {
        race.toggle_algorithm(kind)?;
    }
    println!("Racing {} algorithms on {} elements", category, race.array().len());

    race.start(&mut sched)?;
    sched.run(&mut race).await;

    println!();
    println!("Leaderboard:");
    for row in race.leaderboard() {
        println!("  {}", row);
    }
    race.teardown(&mut sched);

    Ok(())
}
