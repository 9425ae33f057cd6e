//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    ridemap_cli::init_logging();
    if let Err(err) = ridemap_cli::run() {
        eprintln!("ridemap: {err}");
        std::process::exit(1);
    }
}
