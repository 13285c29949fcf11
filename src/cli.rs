use clap::Parser;

/// An animated particle heart
#[derive(Parser)]
#[command()]
pub struct Args {
    /// The framerate the animation will run at
    ///
    /// if absent the animation runs as fast as possible
    #[arg(short, long)]
    pub framerate: Option<u32>,

    /// Seed for the particle generator; random when absent
    #[arg(short, long)]
    pub seed: Option<u64>,
}
