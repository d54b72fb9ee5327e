use clap::Parser;
use finca::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => finca::cli::commands::init::run(args),
        Commands::Robot(cmd) => finca::cli::commands::robot::run(cmd, &cli.global),
        Commands::Reading(cmd) => finca::cli::commands::reading::run(cmd, &cli.global),
        Commands::Analyze(args) => finca::cli::commands::analyze::run(args, &cli.global),
        Commands::Stats(args) => finca::cli::commands::stats::run(args, &cli.global),
        Commands::Advise(args) => finca::cli::commands::advise::run(args, &cli.global),
        Commands::Market(cmd) => finca::cli::commands::market::run(cmd, &cli.global),
        Commands::Sim(args) => finca::cli::commands::sim::run(args, &cli.global),
        Commands::Seed(args) => finca::cli::commands::seed::run(args, &cli.global),
        Commands::Export(args) => finca::cli::commands::export::run(args, &cli.global),
    }
}
