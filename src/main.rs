use clap::Parser;
use miette::Result;
use objgroup::cli::{Cli, Commands};
use objgroup::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = if cli.quiet {
        Printer::quiet()
    } else {
        Printer::new()
    };

    match cli.command {
        Commands::Pack(args) => objgroup::cli::pack::run(args, &printer)?,
        Commands::Inspect(args) => objgroup::cli::inspect::run(args, &printer)?,
        Commands::List(args) => objgroup::cli::list::run(args, &printer)?,
        Commands::Init(args) => objgroup::cli::init::run(args, &printer)?,
        Commands::Completions(args) => objgroup::cli::completions::run(args)?,
    }

    Ok(())
}
