use clap::{value_parser, Arg, ArgAction, Command as ClapCommand};
use std::path::PathBuf;
use std::process;
use log::error;

use h5_to_geotiff::commands::{CommandFactory, H5ToGeotiffCommandFactory, Outcome};
use h5_to_geotiff::console::Console;
use h5_to_geotiff::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("h5-to-geotiff")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert a layer of an HDF5 file to a GeoTIFF")
        .arg(
            Arg::new("input")
                .help("Input HDF5 file")
                .value_name("H5_FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("attributes")
                .short('a')
                .long("attributes")
                .help("Show attributes of the selected layer and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("descriptions")
                .short('d')
                .long("descriptions")
                .help("Show layer descriptions in the layer list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lzw")
                .short('l')
                .long("lzw")
                .help("Force LZW compression")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("block-size")
                .short('b')
                .long("block-size")
                .help("Tile size in pixels; implies a tiled GeoTIFF")
                .value_names(["X", "Y"])
                .num_args(2)
                .value_parser(value_parser!(u32))
                .required(false),
        )
        .arg(
            Arg::new("use-preset")
                .short('p')
                .long("use-preset")
                .help("Ignore the stored profile and use the preset for the layer's shape")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-presets")
                .long("no-presets")
                .help("Never fall back to a preset profile")
                .action(ArgAction::SetTrue)
                .conflicts_with("use-preset"),
        )
        .arg(
            Arg::new("presets")
                .long("presets")
                .help("TOML file with additional preset profiles")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(false),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .help("Directory to write the GeoTIFF to")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    Logger::init_global_logger(matches.get_flag("verbose"));

    let factory = H5ToGeotiffCommandFactory::new();
    let command = match factory.create_command(&matches) {
        Ok(command) => command,
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut console = Console::stdio();
    match command.execute(&mut console) {
        Ok(Outcome::Written(path)) => log::info!("Done: {}", path.display()),
        Ok(Outcome::AttributesShown) | Ok(Outcome::Declined) => {}
        Err(e) => {
            error!("Command execution error: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
