use clap::{arg, ArgMatches, Command};
use nqueens_ga::ga::{render_board, ConfigError, Engine, NQueensConfig};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

fn cli() -> Command {
    Command::new("nqueens")
        .about("Solves the N-Queens problem with a genetic algorithm")
        .arg(
            arg!([N] "Board size")
                .default_value("8")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--population [POPULATION] "Individuals per generation")
                .default_value("500")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--generations [GENERATIONS] "Generation budget")
                .default_value("10000")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--elites [ELITES] "Elites carried over per generation (default: population / 20)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"elite-crossover" [ELITE_CROSSOVER] "Offspring bred from elite pairs (default: population / 4)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--tournament [TOURNAMENT] "Draws per tournament selection (default: 10, at most population)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"mutation-rate" [MUTATION_RATE] "Base per-gene mutation rate")
                .default_value("0.0235")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--"crossover-rate" [CROSSOVER_RATE] "Base crossover rate")
                .default_value("0.85")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(arg!(--seed [SEED] "Random seed").value_parser(clap::value_parser!(u64)))
        .arg(
            arg!(--"poll-ms" [POLL_MS] "Milliseconds between progress polls")
                .default_value("50")
                .value_parser(clap::value_parser!(u64)),
        )
}

/// Builds a validated config. Elite and tournament sizes not given on the
/// command line scale with the population.
fn config_from(matches: &ArgMatches) -> Result<NQueensConfig, ConfigError> {
    let n = *matches.get_one::<usize>("N").expect("defaulted");
    let population = *matches.get_one::<usize>("population").expect("defaulted");
    let elites = matches
        .get_one::<usize>("elites")
        .copied()
        .unwrap_or((population / 20).max(1));
    let elite_crossover = matches
        .get_one::<usize>("elite-crossover")
        .copied()
        .unwrap_or(population / 4);
    let tournament = matches
        .get_one::<usize>("tournament")
        .copied()
        .unwrap_or(10.min(population).max(1));

    let mut config = NQueensConfig::new(n)
        .with_population_size(population)
        .with_max_generations(*matches.get_one::<usize>("generations").expect("defaulted"))
        .with_elite_count(elites)
        .with_elite_crossover_count(elite_crossover)
        .with_tournament_size(tournament);
    config.mutation_rate = *matches.get_one::<f64>("mutation-rate").expect("defaulted");
    config.crossover_rate = *matches.get_one::<f64>("crossover-rate").expect("defaulted");
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_thread_ids(true)
        .with_max_level(Level::INFO)
        .init();

    let matches = cli().get_matches();
    let poll = Duration::from_millis(*matches.get_one::<u64>("poll-ms").expect("defaulted"));

    let engine = match config_from(&matches).and_then(Engine::new) {
        Ok(engine) => Arc::new(engine),
        Err(err) => {
            tracing::error!(%err, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let handle = engine.start();

    // Follow the run the way a renderer would: advance to the next
    // generation only once a newer one exists, or once the run is over.
    let mut shown = 0;
    loop {
        let finished = engine.is_finished() || handle.is_finished();
        let count = engine.generation_count();
        if count > 0 && (shown + 1 < count || finished) {
            shown = count - 1;
            if let Ok(gen) = engine.generation(shown) {
                tracing::info!(
                    generation = gen.index(),
                    best_fitness = gen.best_fitness(),
                    average_fitness = gen.average_fitness(),
                    mutation_rate = gen.mutation_rate(),
                    crossover_rate = gen.crossover_rate(),
                    "Progress"
                );
            }
        }
        if finished {
            break;
        }
        std::thread::sleep(poll);
    }

    let outcome = match handle.join() {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::error!("Run thread panicked");
            return ExitCode::FAILURE;
        }
    };

    if let Some(board) = engine.best_solution() {
        println!("{}", render_board(&board));
    }
    if outcome.converged {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
