use chess_minimax::chess_boards::{perft_divide, Board, MoveFactory, MoveStatus};
use chess_minimax::engines::{MiniMax, MoveStrategy, RandomMoveStrategy};
use std::time::Instant;

use clap::arg;
use clap::command;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const BENCHMARK_OPENING: [&str; 4] = ["e2e4", "e7e5", "g1f3", "b8c6"];

fn main() {
    let moves_arg = || {
        arg!(
        -m --moves <moves> "Coordinate moves played from the start position, e.g. e2e4 e7e5"
                )
        .num_args(1..)
        .value_parser(clap::value_parser!(String))
    };

    let matches = command!()
        .version("v0.1.0")
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .subcommand(
            Command::new("play")
                .about("Let the engine play a game against itself")
                .arg(
                    arg!(
                    -x --depth <d> "Search depth"
                            )
                    .default_value("3")
                    .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(
                    -p --plies <n> "Maximum number of plies"
                            )
                    .default_value("40")
                    .value_parser(clap::value_parser!(u32)),
                )
                .arg(arg!(
                    -r --"random-black" "Black plays random moves"
                ))
                .arg(
                    arg!(
                    -s --seed <seed> "Seed of the random player"
                            )
                    .default_value("0")
                    .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(
                    arg!(
                    -x --depth <d> "depth"
                            )
                    .default_value("3")
                    .value_parser(clap::value_parser!(u8).range(1..)),
                )
                .arg(moves_arg()),
        )
        .subcommand(
            Command::new("moves")
                .about("List the moves of the side to move")
                .arg(moves_arg()),
        )
        .subcommand(
            Command::new("benchmark").about("Runs a benchmark").arg(
                arg!(
                -x --"max-depth" <d> "Deepest search to run"
                        )
                .default_value("4")
                .value_parser(clap::value_parser!(u32)),
            ),
        )
        .get_matches();

    init_logging(matches.get_flag("debug"));

    let result = match matches.subcommand() {
        Some(("play", arg_matches)) => {
            let depth = *arg_matches.get_one::<u32>("depth").unwrap();
            let plies = *arg_matches.get_one::<u32>("plies").unwrap();
            let seed = *arg_matches.get_one::<u64>("seed").unwrap();
            play(depth, plies, arg_matches.get_flag("random-black").then_some(seed));
            Ok(())
        }
        Some(("perft", arg_matches)) => {
            let depth = *arg_matches.get_one::<u8>("depth").unwrap();
            perft(collect_moves(arg_matches), depth)
        }
        Some(("moves", arg_matches)) => list_moves(collect_moves(arg_matches)),
        Some(("benchmark", arg_matches)) => {
            benchmark(*arg_matches.get_one::<u32>("max-depth").unwrap());
            Ok(())
        }
        None => {
            play(3, 40, None);
            Ok(())
        }
        _ => unreachable!("Exhausted list of subcommands"),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn collect_moves(arg_matches: &clap::ArgMatches) -> Vec<&str> {
    arg_matches
        .get_many::<String>("moves")
        .unwrap_or_default()
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect()
}

/// Plays coordinate moves from the start position.
fn apply_moves(moves: &[&str]) -> Result<Board, String> {
    let mut board = Board::create_standard_board();
    for pair in moves {
        let mv = MoveFactory::create_move_from_pair(&board, pair).map_err(|err| format!("Invalid move {}: {}", pair, err))?;
        let transition = board.current_player().make_move(&mv);
        if transition.status() != MoveStatus::Done {
            return Err(format!("Invalid move {}: {}", pair, transition.status()));
        }
        board = transition.into_to_board();
    }
    Ok(board)
}

fn play(depth: u32, plies: u32, random_black_seed: Option<u64>) {
    let mut white: Box<dyn MoveStrategy> = Box::new(MiniMax::new(depth));
    let mut black: Box<dyn MoveStrategy> = match random_black_seed {
        Some(seed) => Box::new(RandomMoveStrategy::seeded(seed)),
        None => Box::new(MiniMax::new(depth)),
    };
    info!(white = white.name(), black = black.name(), depth, "starting game");

    let mut board = Board::create_standard_board();
    println!("{}", board.render_to_string());
    for ply in 1..=plies {
        let player = board.current_player();
        let strategy = if player.alliance().is_white() { &mut white } else { &mut black };
        let Some(mv) = strategy.execute(&board) else {
            break;
        };
        let next = player.make_move(&mv).into_to_board();
        board = next;
        println!("{}. {} {}", ply, board.current_player().opponent(), mv);
        println!("{}", board.render_to_string());
    }

    let player = board.current_player();
    if player.is_in_checkmate() {
        println!("{} is checkmated", player);
    } else if player.is_in_stalemate() {
        println!("{} is stalemated", player);
    } else {
        warn!(plies, "ply limit reached");
    }
}

fn perft(moves: Vec<&str>, depth: u8) -> Result<(), String> {
    println!("Perft test for moves {:?} with depth {}", moves, depth);
    let board = apply_moves(&moves)?;

    let mut num_nodes = 0;
    for (m, c) in perft_divide(&board, depth) {
        println!("{}: {}", m, c);
        num_nodes += c;
    }
    println!("\nNodes searched: {}", num_nodes);
    Ok(())
}

#[derive(Tabled)]
struct MoveRow {
    notation: String,
    coordinates: String,
    status: String,
}

fn list_moves(moves: Vec<&str>) -> Result<(), String> {
    let board = apply_moves(&moves)?;
    println!("{}", board.render_to_string());

    let player = board.current_player();
    let rows: Vec<MoveRow> = player
        .legal_moves()
        .iter()
        .map(|mv| MoveRow {
            notation: mv.to_string(),
            coordinates: mv.as_algebraic(),
            status: player.make_move(mv).status().to_string(),
        })
        .collect();
    println!("{} to move{}", player, if player.is_in_check() { ", in check" } else { "" });
    println!("{}", Table::new(rows).with(Style::modern()));
    Ok(())
}

#[derive(Tabled)]
struct BenchmarkRow {
    depth: u32,
    score: i32,
    boards_evaluated: u64,
    elapsed_time: f32,
    boards_per_sec: f32,
    best_move: String,
}

fn benchmark(max_depth: u32) {
    let board = match apply_moves(&BENCHMARK_OPENING) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    let mut table_rows = Vec::new();
    for depth in 1..=max_depth {
        let mut engine = MiniMax::new(depth);
        let start_time = Instant::now();
        if let Some((m, score)) = engine.find_best_move(&board) {
            let elapsed = start_time.elapsed();
            table_rows.push(BenchmarkRow {
                depth,
                score,
                boards_evaluated: engine.num_boards_evaluated(),
                elapsed_time: elapsed.as_secs_f32(),
                boards_per_sec: engine.num_boards_evaluated() as f32 / elapsed.as_secs_f32(),
                best_move: m.to_string(),
            });
            if elapsed.as_secs() > 10 {
                break;
            }
        } else {
            println!("No best move found!");
        }
    }
    println!("{}", Table::new(table_rows).with(Style::modern()));
}
