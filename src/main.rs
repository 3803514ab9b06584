fn main() {
    if let Err(e) = archscope::run() {
        eprintln!("archscope: {}", e);
        std::process::exit(1);
    }
}
