use std::{env, process};

use budget_tracker::{cli, init};

fn main() {
    init();

    let result = cli::utf8_args(env::args_os().skip(1)).and_then(cli::run);
    if let Err(err) = result {
        cli::output::error(err);
        process::exit(1);
    }
}
