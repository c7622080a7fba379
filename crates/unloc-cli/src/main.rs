use clap::{Parser, Subcommand};
use miette::Result as MietteResult;
use unloc_cli::commands::{CheckArgs, RewriteArgs, run_check, run_rewrite};
use unloc_cli::utils::ui;

#[derive(Parser)]
#[command(name = "unloc")]
#[command(about = "Collapse localization helper calls into their primary string literal")]
#[command(version)]
struct Cli {
    /// Deterministic output for end-to-end tests (no colors, no progress bars).
    #[arg(long, global = true, hide = true)]
    e2e: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite every matching call to its first string literal, in place
    Rewrite(RewriteArgs),

    /// Report call sites that are still present
    Check(CheckArgs),
}

fn main() -> MietteResult<()> {
    let cli = Cli::parse();

    let e2e = cli.e2e;
    ui::set_e2e_mode(e2e);

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(!e2e)
                .unicode(!e2e)
                .context_lines(2)
                .tab_width(4)
                .color(!e2e)
                .build(),
        )
    }))
    .ok();

    ui::init_logging();

    let result = match cli.command {
        Commands::Rewrite(args) => run_rewrite(args),
        Commands::Check(args) => run_check(args),
    };

    result.map_err(miette::Report::new)
}
