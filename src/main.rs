mod config;
mod session;

use config::Config;
use jdice_parser::ParseError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use session::{LineResult, Session};
use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
};

fn main() {
    pretty_env_logger::init();
    log::info!("logger created");

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = take_config_arg(&mut args)
        .or_else(|| std::env::var_os("JDICE_CONFIG").map(PathBuf::from));
    let config = Config::load(config_path.as_deref());

    let mut session = Session::new(session_rng(config.seed), config.show_notation);
    if args.is_empty() {
        run_stdin(&mut session, &config.prompt);
    } else {
        args.iter().for_each(|line| handle_line(&mut session, line));
    }
    log::debug!("session history: {:?}", session.history());
}

fn take_config_arg(args: &mut Vec<String>) -> Option<PathBuf> {
    let position = args.iter().position(|a| a == "--config")?;
    args.remove(position);
    if position < args.len() {
        Some(PathBuf::from(args.remove(position)))
    } else {
        log::warn!("--config given without a path");
        None
    }
}

fn session_rng(seed: Option<u64>) -> Xoshiro256PlusPlus {
    match seed {
        Some(seed) => {
            log::info!("rolling with fixed seed {}", seed);
            Xoshiro256PlusPlus::seed_from_u64(seed)
        }
        None => {
            let mut seed: <Xoshiro256PlusPlus as SeedableRng>::Seed = Default::default();
            ChaCha20Rng::from_entropy().fill(&mut seed);
            Xoshiro256PlusPlus::from_seed(seed)
        }
    }
}

fn handle_line<R: Rng>(session: &mut Session<R>, line: &str) {
    match session.handle(line) {
        Ok(LineResult::Rolled(lines)) => lines.iter().for_each(|l| println!("{}", l)),
        Ok(LineResult::Cleared) | Ok(LineResult::Skipped) => {}
        Err(ParseError::InvalidExpression(input)) => {
            log::error!("Invalid dice expression: {}", input)
        }
    }
}

fn run_stdin<R: Rng>(session: &mut Session<R>, prompt: &str) {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let show_prompt = || {
        if interactive {
            print!("{}", prompt);
            if let Err(e) = io::stdout().flush() {
                log::warn!("unable to flush prompt: {}", e);
            }
        }
    };

    show_prompt();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => handle_line(session, &line),
            Err(e) => {
                log::error!("unable to read input: {}", e);
                break;
            }
        }
        show_prompt();
    }
}
