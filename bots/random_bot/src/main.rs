use clap::Parser;
use perdurak_bot_utils::{Bot, RandomBot};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    eprintln!("random_bot seed: {}", seed);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot::new(rng).run()
}
