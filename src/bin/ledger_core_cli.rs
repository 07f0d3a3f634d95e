use std::{env, process};

use ledger_core::{
    cli::{execute, parse_args, today_from_env},
    config::ConfigManager,
    errors::LedgerError,
    init,
};

fn main() {
    init();

    match run() {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

fn run() -> Result<String, LedgerError> {
    let invocation = parse_args(env::args().skip(1))?;
    let today = today_from_env()?;
    let configs = ConfigManager::new()?;
    execute(&invocation, today, &configs)
}
