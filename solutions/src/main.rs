//! `aoc <dayToRun>`: run one day's solution against `inputs/day<N>.txt`.

fn main() {
    harness::logging::init();
    let catalog = solutions::catalog();
    std::process::exit(harness::cli::main(&catalog));
}
