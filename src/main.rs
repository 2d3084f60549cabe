use anyhow::Result;
use clap::Parser;
use torus_snake::app::App;
use torus_snake::game::{GameConfig, Skin};

#[derive(Parser)]
#[command(name = "torus-snake")]
#[command(version, about = "Arcade snake on a wrap-around grid")]
struct Cli {
    /// Preselect a snake skin in the menu
    #[arg(long, value_enum)]
    skin: Option<Skin>,

    /// Preselect a difficulty level in the menu (1-4)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    level: Option<u8>,

    /// Fixed seed for obstacle and food placement (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable sound cues
    #[arg(long)]
    mute: bool,

    /// Grid width in cells
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(11..=500))]
    width: u16,

    /// Grid height in cells
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(11..=500))]
    height: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig::new(usize::from(cli.width), usize::from(cli.height));
    let level = cli.level.map(|l| usize::from(l) - 1);

    let mut app = App::new(config, cli.skin, level, cli.seed, cli.mute);
    app.run().await
}
