use std::io;

use dotenvy::dotenv;
use store_service::cli::Console;
use store_service::StoreManager;

fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting store manager console");

    let mut manager = StoreManager::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock()).run(&mut manager)
}
