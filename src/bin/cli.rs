//! page-focus CLI
//!
//! Navigates to a URL, runs the focal-chain annotation on the rendered page,
//! and prints the selected chain. With `--hold` the browser stays open so
//! the annotated page can be inspected.

use anyhow::Context;
use clap::Parser;
use page_focus::salience::ScoreWeights;
use page_focus::{BrowserSession, LaunchOptions};

#[derive(Debug, Parser)]
#[command(name = "page-focus", version, about = "Annotate the focal element chain of a web page")]
struct Cli {
    /// URL to annotate
    url: String,

    /// Launch the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Divisor applied to element area
    #[arg(long, default_value_t = 100.0)]
    size_weight: f64,

    /// Multiplier for text-vs-background contrast
    #[arg(long, default_value_t = 1.0)]
    fg_weight: f64,

    /// Multiplier for background-vs-surroundings contrast
    #[arg(long, default_value_t = 1.0)]
    bg_weight: f64,

    /// Keep the browser open for this many seconds after annotating
    #[arg(long, default_value_t = 0)]
    hold: u64,

    /// Print the chain as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let weights = ScoreWeights::new(cli.size_weight, cli.fg_weight, cli.bg_weight)
        .context("invalid scoring weights")?;

    let session = BrowserSession::launch(LaunchOptions::new().headless(!cli.headed))
        .context("failed to launch browser")?;

    session.navigate(&cli.url).context("navigation failed")?;
    session.wait_for_navigation().context("page did not finish loading")?;

    let chain = session.annotate(weights).context("annotation failed")?;

    if cli.json {
        println!("{}", chain.to_json()?);
    } else {
        for annotation in chain.annotations() {
            println!(
                "#{} {:<24} depth {}  area {:>10.0} px²  score {:.1}",
                annotation.index, annotation.element, annotation.depth, annotation.area,
                annotation.score
            );
        }
        match chain.terminal() {
            Some(terminal) => println!("dead end: {} (depth {})", terminal.element, terminal.depth),
            None => println!("no dead-end mark"),
        }
        if chain.is_empty() {
            println!("no eligible focal element found");
        }
    }

    if cli.hold > 0 {
        log::info!("holding browser open for {}s", cli.hold);
        std::thread::sleep(std::time::Duration::from_secs(cli.hold));
    }

    session.close().ok();
    Ok(())
}
