fn main() {
    if let Err(err) = iotrix::cli::main() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
