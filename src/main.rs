use std::process;

fn main() {
    process::exit(holdem_odds::cli::run());
}
