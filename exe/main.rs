use clap::Parser;
use lazy_seq::{LazySeq,Slice};
use rand::{Rng,SeedableRng};
use rand::rngs::StdRng;
use tracing::info;

/// Memoize a stream of random numbers and read it through layered views.
#[derive(Parser)]
struct Cli {
  /// How many random numbers the producer yields
  #[arg(long, default_value_t = 10)]
  len: usize,

  /// How many layers to stack over the producer
  #[arg(long, default_value_t = 2)]
  layers: usize,

  /// Seed for the random producer
  #[arg(long, env = "LAZY_SEQ_SEED")]
  seed: Option<u64>,
}

fn enable_tracing() {
  use tracing_subscriber::EnvFilter;

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .with_target(false)
    .init();
}

pub fn main() -> lazy_seq::Result<()> {
  enable_tracing();
  let cli = Cli::parse();

  let mut rng = match cli.seed {
                  Some(s) => StdRng::seed_from_u64(s),
                  None    => StdRng::from_entropy()
                };
  let len = cli.len;
  let producer = (0 .. len).map(move |i| {
    let x: u32 = rng.gen_range(0 .. 1000);
    info!(i, x, "produced");
    x
  });

  let root = LazySeq::from_producer(producer);
  let mut chain = vec![root];
  for _ in 0 .. cli.layers {
    let top = LazySeq::layer(&chain[chain.len() - 1]);
    chain.push(top);
  }

  // Reading the same position through every layer gives the same value.
  let mid = (len / 2) as isize;
  for (depth, seq) in chain.iter().enumerate().rev() {
    match seq.get(mid) {
      Ok(x)  => println!("layer {}: [{}] = {}", depth, mid, x),
      Err(e) => println!("layer {}: {}", depth, e)
    }
  }

  let top = &chain[chain.len() - 1];
  // Non-negative slices stay lazy until they are read.
  let head = top.slice(..3_isize)?;
  println!("first three: {} before reading", head);
  println!("first three: {:?}", head.to_vec());
  println!("every other: {:?}", top.slice(Slice::default().step_by(2))?.to_vec());

  // Negative bounds force the producer to the end.
  println!("last two:    {}", top.slice(-2_isize ..)?);
  println!("reversed:    {}", top.slice(Slice::default().step_by(-1))?);

  for (depth, seq) in chain.iter().enumerate() {
    println!("layer {}: {}", depth, seq);
  }
  Ok(())
}
