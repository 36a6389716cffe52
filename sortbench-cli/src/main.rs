fn main() {
    if let Err(err) = sortbench_cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
