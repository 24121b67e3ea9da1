mod cli;
mod commands;
mod logging;

use cli::{BlockInfoParams, DumpParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    logging::init(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into())
        }
        Some(("blockinfo", m)) => {
            let params = BlockInfoParams::from_matches(m);
            commands::blockinfo::run(params.into())
        }
        _ => unreachable!("clap should have caught this"),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
