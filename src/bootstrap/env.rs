pub async fn init_env() {
    // Tracing is not up yet, so report on stderr.
    match dotenvy::dotenv() {
        Ok(path) => eprintln!("loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => eprintln!("cannot load `.env`: {err}"),
    }
}
