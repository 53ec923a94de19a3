use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pixelfill")]
#[command(about = "Render pixel-fill countdown timers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a single frame to a PNG
    Render {
        /// Timer descriptor TOML; defaults apply when omitted
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Surface width in pixels
        #[arg(long, default_value_t = 320)]
        width: u32,
        /// Surface height in pixels
        #[arg(long, default_value_t = 180)]
        height: u32,
        /// Progress to render at, 0.0 to 1.0; defaults to the descriptor's elapsed point
        #[arg(long)]
        at: Option<f64>,
        /// Output PNG path
        #[arg(long, default_value = "frame.png")]
        out: std::path::PathBuf,
        /// Draw the status overlay onto the frame
        #[arg(long)]
        hud: bool,
    },
    /// Run the animation in real time, controllable via pixelfillctl
    Preview {
        /// Timer descriptor TOML; defaults apply when omitted
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Surface width in pixels
        #[arg(long, default_value_t = 320)]
        width: u32,
        /// Surface height in pixels
        #[arg(long, default_value_t = 180)]
        height: u32,
        /// Also write a snapshot PNG every N seconds
        #[arg(long, value_name = "SECS")]
        snapshot_every: Option<u64>,
        /// Directory snapshot PNGs are written to
        #[arg(long, default_value = ".")]
        snapshot_dir: std::path::PathBuf,
    },
}

#[derive(Parser)]
#[command(name = "pixelfillctl")]
#[command(about = "Control a running pixelfill preview")]
#[command(version)]
pub struct CtlCli {
    #[command(subcommand)]
    pub command: CtlCommands,
}

#[derive(Subcommand)]
pub enum CtlCommands {
    /// Pause the fill animation (the clock keeps running)
    Pause,
    /// Resume a paused animation at the current progress
    Resume,
    /// Toggle between paused and running
    Toggle,
    /// Ask the running preview to write a snapshot PNG
    Snapshot,
}

impl CtlCommands {
    pub fn as_str(&self) -> &'static str {
        match self {
            CtlCommands::Pause => "pause",
            CtlCommands::Resume => "resume",
            CtlCommands::Toggle => "toggle",
            CtlCommands::Snapshot => "snapshot",
        }
    }
}
