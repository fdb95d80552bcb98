use std::io;

use clap::Parser;
use rookery::chess::game::Match;
use rookery::chess::setup::Setup;
use rookery::Session;

/// Plays a chess match in the terminal: type the square of the piece to move,
/// then the square to move it to (e.g. "c2", then "c5"). Type "quit" to leave.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Initial placement of the pieces: "classic" (kings and rooks) or
    /// "standard".
    #[arg(long, default_value_t = Setup::Classic)]
    setup: Setup,
    /// Do not print version and build information on startup.
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let mut output = io::stdout().lock();
    if !config.quiet {
        rookery::print_engine_info(&mut output)?;
        rookery::print_binary_info(&mut output)?;
    }
    let mut input = io::stdin().lock();
    let mut session = Session::new(Match::new(config.setup), &mut input, &mut output);
    session.run()
}
