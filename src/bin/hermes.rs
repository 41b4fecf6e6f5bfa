// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::convert::TryFrom;
use std::fs::File;
use std::process;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use hermes::{Armies, Board, Color, Item, Square};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn board_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("board")
            .help("JSON file holding both armies")
            .value_name("FILE")
            .short("b")
            .long("board")
            .takes_value(true)
            .conflicts_with("layout"),
        Arg::with_name("layout")
            .help("Setup diagram, row 0 first, rows separated by '/'")
            .value_name("DIAGRAM")
            .short("l")
            .long("layout")
            .takes_value(true),
    ]
}

fn color_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("color")
        .help("Side to evaluate")
        .value_name("COLOR")
        .short("c")
        .long("color")
        .possible_values(&["white", "black"])
        .default_value("white")
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("moves")
                .about("Potential and legal moves of the piece on a square")
                .args(&board_args())
                .arg(
                    Arg::with_name("ROW")
                        .help("Row of the piece, 0 to 9")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("COL")
                        .help("Column of the piece, 0 to 8")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Check state and legal move count of one side")
                .args(&board_args())
                .arg(color_arg()),
        )
        .subcommand(
            SubCommand::with_name("item")
                .about("Use an item and print the resulting board")
                .args(&board_args())
                .arg(color_arg())
                .arg(
                    Arg::with_name("NAME")
                        .help("Name of the item, e.g. 'king-teleport'")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("seed")
                        .help("Seed for random items")
                        .value_name("SEED")
                        .short("s")
                        .long("seed")
                        .takes_value(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("moves", Some(matches)) => run_moves(matches),
        ("status", Some(matches)) => run_status(matches),
        ("item", Some(matches)) => run_item(matches),
        _ => unreachable!(),
    }
}

fn load_board(matches: &ArgMatches) -> Board {
    if let Some(path) = matches.value_of("board") {
        let armies = File::open(path)
            .map_err(|err| err.to_string())
            .and_then(|file| {
                serde_json::from_reader::<_, Armies>(file).map_err(|err| err.to_string())
            });
        return match armies {
            Ok(armies) => Board::from_armies(armies),
            Err(err) => {
                eprintln!("could not read board {}: {}", path, err);
                process::exit(1);
            }
        };
    }

    if let Some(layout) = matches.value_of("layout") {
        return match Board::from_layout(layout) {
            Ok(board) => board,
            Err(err) => {
                eprintln!("invalid layout: {}", err);
                process::exit(1);
            }
        };
    }

    Board::starting_position()
}

fn parse_color(matches: &ArgMatches) -> Color {
    matches
        .value_of("color")
        .and_then(|c| Color::try_from(c).ok())
        .unwrap_or(Color::White)
}

fn run_moves(matches: &ArgMatches) {
    let board = load_board(matches);
    let row = value_t_or_exit!(matches, "ROW", i32);
    let col = value_t_or_exit!(matches, "COL", i32);
    let square = match Square::new(row, col) {
        Some(sq) => sq,
        None => {
            eprintln!("({}, {}) is off the board", row, col);
            process::exit(1);
        }
    };

    let (id, piece) = match board.piece_at(square) {
        Some(found) => found,
        None => {
            eprintln!("no piece on {}", square);
            process::exit(1);
        }
    };

    println!("{}", board);
    println!("{}", piece);
    for movement in piece.movements.iter() {
        println!("  active:  {}", movement);
    }

    for (i, movement) in piece.upgrades.iter().enumerate() {
        let price = piece.upgrade_price(i).unwrap_or(0);
        println!("  upgrade: {} ({})", movement, price);
    }

    println!();
    if let Some(grid) = board.potential_moves(id) {
        println!("potential moves:");
        println!("{}", grid);
    }

    if let Some(grid) = board.possible_moves(id) {
        println!("possible moves ({}):", grid.count());
        println!("{}", grid);
    }
}

fn run_status(matches: &ArgMatches) {
    let board = load_board(matches);
    let color = parse_color(matches);
    println!("{}", board);
    println!("layout:      {}", board.as_layout());
    println!("in check:    {}", board.is_in_check(color));
    println!("legal moves: {}", board.legal_move_count(color));
    println!("material:    {}", board.material_worth(color));
    println!("status:      {:?}", board.status(color));
}

fn run_item(matches: &ArgMatches) {
    let mut board = load_board(matches);
    let color = parse_color(matches);
    let name = matches.value_of("NAME").unwrap();
    let item = match Item::try_from(name) {
        Ok(item) => item,
        Err(()) => {
            eprintln!("unknown item '{}'", name);
            process::exit(1);
        }
    };

    let mut rng = if matches.is_present("seed") {
        StdRng::seed_from_u64(value_t_or_exit!(matches, "seed", u64))
    } else {
        StdRng::from_entropy()
    };

    println!("{}: {}", item, item.description());
    let outcome = item.use_on(color, &mut board, &mut rng);
    println!("{}", outcome);
    println!();
    println!("{}", board);
    println!("layout: {}", board.as_layout());
}
