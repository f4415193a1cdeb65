use lc3::signal::TERMINATED_EXIT_CODE;
use lc3::{signal, Config};
use std::process;

fn main() {
    let config = Config::parse(std::env::args());

    if let Err(err) = signal::install_handler() {
        eprintln!("failed to install SIGINT handler: {}", err);
        process::exit(1);
    }

    match lc3::run(config) {
        Ok(()) => {
            if signal::terminate_requested() {
                process::exit(TERMINATED_EXIT_CODE);
            }
        }
        Err(err) => {
            eprintln!("Application error: {}", err);
            process::exit(1);
        }
    }
}
