use clap::Parser;
use probing_table::ProbingTable;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "capacity", default_value_t = 10)]
    capacity: usize,

    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: usize,

    /// Fraction of inserted keys to delete afterwards.
    #[arg(short = 'd', long = "delete_ratio", default_value_t = 0.25)]
    delete_ratio: f64,

    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut table: ProbingTable<u64, u64> = match ProbingTable::with_capacity(args.capacity) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    println!("Starting capacity: {}", table.capacity());

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut keys = Vec::with_capacity(args.entries);
    let mut duplicates = 0;
    while keys.len() < args.entries {
        let key = rng.random::<u64>() >> 16;
        match table.insert(key, key) {
            Ok(true) => keys.push(key),
            Ok(false) => duplicates += 1,
            Err(err) => panic!("unexpected error inserting {key}: {err}"),
        }
    }
    println!(
        "Inserted {} keys ({} duplicates rejected), capacity now {}",
        table.len(),
        duplicates,
        table.capacity()
    );

    let to_delete = ((keys.len() as f64 * args.delete_ratio) as usize).min(keys.len());
    for key in &keys[..to_delete] {
        table.delete(key).expect("present keys are never absent");
    }
    println!("Deleted {to_delete} keys");

    table.print_probe_histogram();
    table.debug_stats().print();
}
