fn main() {
    if let Err(err) = csv_synopsis::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
