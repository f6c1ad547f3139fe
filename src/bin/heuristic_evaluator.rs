use hanoi_race::ai::HanoiAi;
use hanoi_race::heuristics::HeuristicKind;
use hanoi_race::solver::AlgorithmKind;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

const NUM_SEEDS_FOR_EVALUATION: u64 = 20;
const START_SEED: u64 = 0;
const MIN_DISKS_FOR_EVALUATION: usize = 2;
const MAX_DISKS_FOR_EVALUATION: usize = 6;

#[derive(Default)]
struct PairingStats {
    runs: usize,
    successes: usize,
    total_moves: usize,
    total_nodes: usize,
}

impl PairingStats {
    fn success_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.successes as f64 / self.runs as f64
        }
    }

    // Average over successful runs only; failed runs have no move count.
    fn average_moves(&self) -> Option<f64> {
        (self.successes > 0).then(|| self.total_moves as f64 / self.successes as f64)
    }

    fn average_nodes(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_nodes as f64 / self.runs as f64
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut all_stats: HashMap<(AlgorithmKind, HeuristicKind), PairingStats> = HashMap::new();

    println!(
        "Starting evaluation for {} seeds, {}..={} disks...",
        NUM_SEEDS_FOR_EVALUATION, MIN_DISKS_FOR_EVALUATION, MAX_DISKS_FOR_EVALUATION
    );

    for num_disks in MIN_DISKS_FOR_EVALUATION..=MAX_DISKS_FOR_EVALUATION {
        println!("\nEvaluating {} disks", num_disks);

        for algorithm in AlgorithmKind::ALL {
            for heuristic in HeuristicKind::ALL {
                let stats = all_stats.entry((algorithm, heuristic)).or_default();
                let mut solved = 0;

                for seed in START_SEED..START_SEED + NUM_SEEDS_FOR_EVALUATION {
                    let mut ai = match HanoiAi::seeded(num_disks, heuristic, seed) {
                        Ok(ai) => ai,
                        Err(err) => {
                            eprintln!("Error: could not configure solver: {}", err);
                            return;
                        }
                    };
                    let result = ai.run_algorithm(algorithm);

                    stats.runs += 1;
                    stats.total_nodes += result.nodes_explored;
                    if let Some(moves) = result.moves() {
                        stats.successes += 1;
                        stats.total_moves += moves;
                        solved += 1;
                    }
                }

                println!(
                    "  {:<18} {:<18} solved {:>2}/{}",
                    algorithm.name(),
                    heuristic.name(),
                    solved,
                    NUM_SEEDS_FOR_EVALUATION
                );
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("\n--- Aggregate Results ---");

    let mut rows: Vec<(&(AlgorithmKind, HeuristicKind), &PairingStats)> = all_stats.iter().collect();

    // Highest success rate first, then fewest average moves.
    rows.sort_by(|a, b| {
        b.1.success_rate()
            .total_cmp(&a.1.success_rate())
            .then_with(|| {
                let a_moves = a.1.average_moves().unwrap_or(f64::INFINITY);
                let b_moves = b.1.average_moves().unwrap_or(f64::INFINITY);
                a_moves.total_cmp(&b_moves)
            })
    });

    println!(
        "{:<18} {:<18} {:>8} {:>10} {:>10}",
        "Algorithm", "Heuristic", "Success", "Avg moves", "Avg nodes"
    );
    for ((algorithm, heuristic), stats) in rows {
        let average_moves = stats
            .average_moves()
            .map(|moves| format!("{:.2}", moves))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<18} {:<18} {:>7.1}% {:>10} {:>10.2}",
            algorithm.name(),
            heuristic.name(),
            stats.success_rate() * 100.0,
            average_moves,
            stats.average_nodes()
        );
    }
}
