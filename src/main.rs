//! CLI entry point for replaying and pairing mahjong solitaire layouts

use clap::Parser;
use env_logger::Env;
use mahjong_board::io::cli::{Cli, FileProcessor};

fn main() -> mahjong_board::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
