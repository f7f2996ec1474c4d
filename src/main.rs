use anyhow::Result;
use clap::{App as ClapApp, AppSettings, Arg, SubCommand};
use frc_scout::app::App;
use frc_scout::cli;
use frc_scout::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true)
                .global(true),
        )
        .subcommand(SubCommand::with_name("list").about("Prints every saved form"))
        .subcommand(
            SubCommand::with_name("export")
                .about("Prints the QR code of one saved form")
                .arg(
                    Arg::with_name("ID")
                        .help("Id of the form to export")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Prints the encoded form data instead of the QR code"),
                )
                .arg(
                    Arg::with_name("light")
                        .long("light")
                        .help("Draws dark modules as filled cells, for light terminal themes"),
                ),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;

    match matches.subcommand() {
        ("list", Some(_)) => cli::list(&config).await,
        ("export", Some(args)) => {
            let id = args.value_of("ID").unwrap_or_default();
            let format = if args.is_present("json") {
                cli::ExportFormat::Json
            } else if args.is_present("light") {
                cli::ExportFormat::QrLight
            } else {
                cli::ExportFormat::QrDark
            };
            cli::export(&config, id, format).await
        }
        _ => App::start(config).await,
    }
}
