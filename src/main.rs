use anyhow::Context;
use clap::Parser;
use crossterm::style::Stylize;
use fifteen_solver::puzzle::{BLANK, SIZE};
use fifteen_solver::service::{self, SolveRequest};
use fifteen_solver::{Board, Move, Solver, SolverConfig};
use log::LevelFilter;
use rand::{rngs::StdRng, SeedableRng};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Optimal solver for the 15-puzzle", long_about = None)]
struct Args {
    /// Board file: 4 lines of 4 numbers, 0 for the blank. Read from stdin if omitted.
    board_file: Option<PathBuf>,

    /// Solve a board scrambled by this many random moves from the goal
    #[arg(long, conflicts_with = "board_file")]
    scramble: Option<usize>,

    /// Solve a uniformly shuffled solvable board (may take a long time)
    #[arg(long, conflicts_with_all = ["board_file", "scramble"])]
    shuffle: bool,

    /// Seed for --scramble or --shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many threshold passes
    #[arg(long, env = "FIFTEEN_MAX_ITERATIONS")]
    max_iterations: Option<usize>,

    /// Print the JSON solve response instead of text
    #[arg(long)]
    json: bool,

    /// Write the moves to this file, one per line
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print every board along the solution
    #[arg(long)]
    replay: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_board_text(args: &Args) -> anyhow::Result<String> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if let Some(moves) = args.scramble {
        return Ok(Board::scramble(moves, &mut rng).to_string());
    }
    if args.shuffle {
        return Ok(Board::random_solvable(&mut rng).to_string());
    }

    match &args.board_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read board file {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read board from stdin")?;
            Ok(text)
        }
    }
}

/// Board text with the blank dimmed and `highlight` emphasised.
fn render(board: &Board, highlight: Option<(usize, usize)>) -> String {
    let mut out = String::new();
    for row in 0..SIZE {
        let cells: Vec<String> = (0..SIZE)
            .map(|col| {
                let value = board.tile(row, col);
                let text = format!("{:2}", value);
                if value == BLANK {
                    text.dark_grey().to_string()
                } else if highlight == Some((row, col)) {
                    text.yellow().bold().to_string()
                } else {
                    text
                }
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

fn print_replay(start: &Board, moves: &[Move]) {
    let mut board = *start;
    for (i, &m) in moves.iter().enumerate() {
        let from = board.blank();
        match board.apply(m) {
            Some(next) => board = next,
            None => {
                log::error!("move {} ({}) is illegal, stopping replay", i + 1, m);
                return;
            }
        }
        println!("Move {}/{}: {}", i + 1, moves.len(), m);
        println!("{}", render(&board, Some(from)));
    }
}

fn write_moves(path: &Path, moves: &[Move]) -> anyhow::Result<()> {
    let mut text = String::new();
    for m in moves {
        text.push_str(m.label());
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("failed to write moves to {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let text = read_board_text(&args)?;
    let config = SolverConfig {
        max_iterations: args.max_iterations,
    };
    let solver = Solver::new(config);

    if args.json {
        let response = service::handle(&solver, &SolveRequest { puzzle: text });
        println!("{}", serde_json::to_string_pretty(&response)?);
        if !response.is_success() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let (board, solution) = service::solve_text(&solver, &text)?;

    println!("Initial board:\n{}", render(&board, None));
    println!(
        "Solved in {} moves. Time: {:.2}s ({} passes, {} nodes)",
        solution.len(),
        solution.elapsed.as_secs_f64(),
        solution.iterations,
        solution.nodes_expanded
    );
    if !solution.is_empty() {
        let labels: Vec<&str> = solution.moves.iter().map(Move::label).collect();
        println!("{}", labels.join(" "));
    }

    if let Some(path) = &args.output {
        write_moves(path, &solution.moves)?;
    }
    if args.replay {
        println!();
        print_replay(&board, &solution.moves);
    }

    Ok(())
}
