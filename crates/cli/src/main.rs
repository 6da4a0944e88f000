//! mlperf-viz CLI entry point.

fn main() {
    if let Err(e) = mlperf_viz_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
