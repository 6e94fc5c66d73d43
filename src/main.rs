use clap::Parser;
use miette::Result;
use mtrack::cli::helpers::load_config;
use mtrack::cli::{Cli, Commands};
use mtrack::core::logging;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    let global = cli.global;

    let config = load_config(&global)?;
    logging::init(config.log_level(), config.log_format(), global.verbose);

    match cli.command {
        Commands::Mat(cmd) => mtrack::cli::commands::mat::run(cmd, &global),
        Commands::Req(cmd) => mtrack::cli::commands::req::run(cmd, &global),
        Commands::Ireq(cmd) => mtrack::cli::commands::ireq::run(cmd, &global),
        Commands::Widget(cmd) => mtrack::cli::commands::widget::run(cmd, &global),
        Commands::Ship(cmd) => mtrack::cli::commands::ship::run(cmd, &global),
        Commands::Insp(cmd) => mtrack::cli::commands::insp::run(cmd, &global),
        Commands::Order(cmd) => mtrack::cli::commands::order::run(cmd, &global),
        Commands::Maint(cmd) => mtrack::cli::commands::maint::run(cmd, &global),
        Commands::Inv(cmd) => mtrack::cli::commands::inv::run(cmd, &global),
        Commands::Notify(args) => mtrack::cli::commands::notify::run(args, &global),
        Commands::Queue(cmd) => mtrack::cli::commands::queue::run(cmd, &global),
        Commands::Config(cmd) => mtrack::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => mtrack::cli::commands::completions::run(args),
    }
}
