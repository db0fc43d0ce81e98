use anyhow::Result;
use clap::Parser;
use simple_logger::SimpleLogger;
use std::fs;
use std::path::PathBuf;
use weft_bin::flexbox::layout_flex_container;
use weft_bin::input::FlexInput;
use weft_bin::shared::config::LayoutConfig;

#[derive(Debug, Parser)]
#[command(name = "Weft flex layout", version = "0.1.0")]
struct Args {
    /// JSON file describing the container and its items
    path: PathBuf,
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
    /// Upper bound of flex distribution passes
    #[arg(long)]
    max_passes: Option<usize>,
    /// Print the layout as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let input = FlexInput::from_json(&fs::read_to_string(&args.path)?)?;
    let style = input.container_style()?;
    let mut children = input.children()?;

    let config = LayoutConfig {
        max_passes: args.max_passes,
        ..Default::default()
    };
    let layout = layout_flex_container(&style, input.available, &mut children, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!(
        "container {:>8.2} x {:<8.2}",
        layout.size.width, layout.size.height
    );
    for (idx, item) in layout.items.iter().enumerate() {
        println!(
            "item {:<4} {:>8.2},{:<8.2} {:>8.2} x {:<8.2}",
            idx, item.location.x, item.location.y, item.size.width, item.size.height
        );
    }

    Ok(())
}
