fn main() {
    if let Err(err) = geo_prejoin::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
