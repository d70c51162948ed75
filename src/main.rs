fn main() {
    if let Err(err) = vector_race_lib::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
