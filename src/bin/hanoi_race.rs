use clap::Parser;
use hanoi_race::engine::Replay;
use hanoi_race::heuristics::HeuristicKind;
use hanoi_race::race::{
    run_race, Competitor, RaceConfig, RaceReport, DEFAULT_DISKS, DEFAULT_PLAYBACK_SPEED,
};
use hanoi_race::solver::{AlgorithmKind, AlgorithmResult};
use std::process;
use std::thread;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const COLUMN_WIDTH: usize = 42;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Race two search algorithms on the Tower of Hanoi", long_about = None)]
struct Args {
    /// Number of disks (2-8)
    #[clap(short, long, default_value_t = DEFAULT_DISKS)]
    disks: usize,

    /// First algorithm: 1 = Best-First Search, 2 = A*, 3 = Hill Climbing
    #[clap(long, default_value = "2")]
    first: AlgorithmKind,

    /// Second algorithm: 1 = Best-First Search, 2 = A*, 3 = Hill Climbing
    #[clap(long, default_value = "1")]
    second: AlgorithmKind,

    /// Heuristic of the first algorithm: 1 = Distance-Based, 2 = Correct-Peg, 3 = Weighted-Position
    #[clap(long, default_value = "1")]
    first_heuristic: HeuristicKind,

    /// Heuristic of the second algorithm: 1 = Distance-Based, 2 = Correct-Peg, 3 = Weighted-Position
    #[clap(long, default_value = "1")]
    second_heuristic: HeuristicKind,

    /// Seed for the heuristics' tie-breaking jitter (random when omitted)
    #[clap(long)]
    seed: Option<u64>,

    /// Replay speed from 1 (slow) to 10 (fast)
    #[clap(long, default_value_t = DEFAULT_PLAYBACK_SPEED)]
    speed: u32,

    /// Replay both solutions move by move after the race
    #[clap(long)]
    replay: bool,

    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

impl Args {
    fn to_config(&self) -> RaceConfig {
        RaceConfig {
            num_disks: self.disks,
            first: Competitor::new(self.first, self.first_heuristic),
            second: Competitor::new(self.second, self.second_heuristic),
            seed: self.seed,
            playback_speed: self.speed,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_result(label: &str, result: &AlgorithmResult) {
    println!("{}", label);
    if result.success {
        println!("  Solved:         yes");
        println!("  Moves:          {}", result.move_count);
    } else {
        println!("  Solved:         no");
        println!("  Partial moves:  {}", result.move_path.len());
    }
    println!("  Nodes explored: {}", result.nodes_explored);
}

fn print_frame(step: usize, total: usize, config: &RaceConfig, first: &Replay, second: &Replay) {
    println!("--- Move {}/{} ---", step, total);
    println!(
        "{:<width$}{}",
        config.first.label(),
        config.second.label(),
        width = COLUMN_WIDTH
    );
    let left = first.current().to_string();
    let right = second.current().to_string();
    for (l, r) in left.lines().zip(right.lines()) {
        println!("{:<width$}{}", l, r, width = COLUMN_WIDTH);
    }
    println!();
}

fn play_replay(config: &RaceConfig, report: &RaceReport) -> hanoi_race::Result<()> {
    let (mut first, mut second) = report.replays(config.num_disks);
    let total = report.frame_count();

    print_frame(0, total, config, &first, &second);
    for step in 1..=total {
        thread::sleep(config.frame_delay());
        // A finished replay holds its last frame.
        first.step_forward()?;
        second.step_forward()?;
        print_frame(step, total, config, &first, &second);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.to_config();
    println!("Tower of Hanoi race with {} disks", config.num_disks);
    println!("  First:  {}", config.first.label());
    println!("  Second: {}\n", config.second.label());

    let report = match run_race(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error running race: {}", err);
            process::exit(1);
        }
    };

    print_result(&config.first.label(), &report.first);
    print_result(&config.second.label(), &report.second);
    println!("\n{}\n", report.headline(&config));

    if args.replay {
        if let Err(err) = play_replay(&config, &report) {
            eprintln!("Error replaying moves: {}", err);
            process::exit(1);
        }
    }
}
