use clap::Parser;
use pixelfill::{cli::CtlCli, socket};

fn main() {
    let cli = CtlCli::parse();
    let command = cli.command.as_str();

    match socket::send_command(command) {
        Ok(()) => {
            eprintln!("Sent: {command}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
