use std::fmt::Display;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use clap::{App, Arg, ArgMatches};
use log::debug;

use sokoban_astar::config::{Dedup, Heuristic, SolverConfig};
use sokoban_astar::solver;
use sokoban_astar::{LoadLevel, Solve};

fn main() {
    let matches = App::new("sokoban-astar")
        .author("martin-t")
        .version("0.1")
        .about("Solves sokoban levels using A*")
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .takes_value(true)
                .value_name("NAME")
                .possible_values(&["nearest", "cyclic", "matching"])
                .default_value("cyclic")
                .help("how to estimate the remaining cost"),
        )
        .arg(
            Arg::with_name("fast-hash")
                .long("fast-hash")
                .help("compare states only by their hash (collisions prune states)"),
        )
        .arg(
            Arg::with_name("max-visited")
                .long("max-visited")
                .takes_value(true)
                .value_name("N")
                .help("stop after visiting N unique states"),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .takes_value(true)
                .value_name("SECONDS")
                .help("stop after this many seconds"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .value_name("N")
                .help("seed for the state hashes (random by default)"),
        )
        .arg(
            Arg::with_name("steps")
                .long("steps")
                .help("print the board after every action, not just pushes"),
        )
        .arg(
            Arg::with_name("dead-squares")
                .long("dead-squares")
                .help("only print cells where boxes can't be pushed"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("log progress to stderr (-vv for more)"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let default_filter = match matches.occurrences_of("verbose") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = parse_config(&matches);
    debug!("{:?}", config);

    // unwrap is ok - required by clap
    let path = matches.value_of("file").unwrap();
    let level = path.load_level().unwrap_or_else(|err| {
        eprintln!("Can't load level {}: {}", path, err);
        process::exit(1);
    });

    if matches.is_present("dead-squares") {
        let dead_squares = solver::dead_squares(&level).unwrap_or_else(|err| {
            eprintln!("Invalid level: {}", err);
            process::exit(1);
        });
        print!("{}", dead_squares);
        return;
    }

    println!("Solving {}...", path);
    let solver_ok = level.solve(&config).unwrap_or_else(|err| {
        eprintln!("Invalid level: {}", err);
        process::exit(1);
    });
    println!("{}", solver_ok.stats);

    match solver_ok.actions {
        Some(actions) => {
            println!("Found solution:");
            print!("{}", level.format_solution(&actions, matches.is_present("steps")));
            println!("{}", actions);
            println!("Moves: {}", actions.move_cnt());
            println!("Pushes: {}", actions.push_cnt());
        }
        None => match solver_ok.limit_hit {
            Some(limit) => println!("No solution found before hitting the {}", limit),
            None => println!("No solution"),
        },
    }
}

fn parse_config(matches: &ArgMatches<'_>) -> SolverConfig {
    let mut config = SolverConfig::default()
        .with_heuristic(parse_arg::<Heuristic>(matches, "heuristic").unwrap_or_default());
    if matches.is_present("fast-hash") {
        config = config.with_dedup(Dedup::HashOnly);
    }
    if let Some(max_visited) = parse_arg(matches, "max-visited") {
        config = config.with_max_visited(max_visited);
    }
    if let Some(seconds) = parse_arg::<f64>(matches, "timeout") {
        let timeout = Duration::try_from_secs_f64(seconds).unwrap_or_else(|err| {
            eprintln!("Invalid value for --timeout: {}", err);
            process::exit(1);
        });
        config = config.with_timeout(timeout);
    }
    if let Some(seed) = parse_arg(matches, "seed") {
        config = config.with_seed(seed);
    }
    config
}

fn parse_arg<T>(matches: &ArgMatches<'_>, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    matches.value_of(name).map(|value| {
        value.parse().unwrap_or_else(|err| {
            eprintln!("Invalid value for --{}: {}", name, err);
            process::exit(1);
        })
    })
}
