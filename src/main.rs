use anyhow::Result;
use clap::{crate_authors, crate_description, crate_name, crate_version, App as ClapApp, Arg};
use monday_tui::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("board")
                .short("b")
                .long("board")
                .value_name("ID")
                .help("Sets the board to create items on")
                .takes_value(true),
        )
        .get_matches();

    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(board_id) = matches.value_of("board") {
        config.set_board_id(board_id);
    }

    App::start(config).await
}
