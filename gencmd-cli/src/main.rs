use clap::Parser;
use gencmd_cli::commands::init;

const ABOUT: &str = "Scaffold code-generation commands and generators built on gencmd";

const EXAMPLE: &str = "\
Examples:

  Initialize a new command:

      gencmd --cmd mycmd

  Initialize two generators and wire them into a new command:

      gencmd --cmd mycmd --generators=deepcopy:./gen/deepcopy,rbac:./gen/rbac

The generated code is meant to be changed by the user.";

#[derive(Parser)]
#[command(name = "gencmd", version, about = ABOUT, after_help = EXAMPLE)]
struct Cli {
    /// Initialize a new command under `cmd/<CMD_NAME>/main.rs`
    #[arg(short = 'c', long = "cmd", value_name = "CMD_NAME", long_help = init::CMD_USAGE)]
    cmd: Option<String>,

    /// Initialize generators under `<PATH>/<NAME>.rs`
    #[arg(
        short = 'g',
        long = "generators",
        value_name = "NAME:PATH,...",
        long_help = init::GENERATORS_USAGE
    )]
    generators: Option<String>,
}

fn main() {
    gencmd_core::init_tracing();
    let cli = Cli::parse();

    if let Err(e) = init::run(cli.cmd.as_deref(), cli.generators.as_deref()) {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}
