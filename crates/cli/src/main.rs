fn main() {
    if let Err(e) = refdiff_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
