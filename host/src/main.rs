use maze_rank::{
    load_record, random_maze, save_record, seeded_maze, CacheConfig, CountSummary, MazeRecord,
    TableCache,
};
use maze_rank_core::BigInt;
use std::env;
use std::time::Instant;

fn main() {
    // Initialize tracing on stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let cache = TableCache::new(CacheConfig::from_env());
    let command = &args[1];

    match command.as_str() {
        "count" => {
            if args.len() < 4 {
                eprintln!("Usage: {} count <width> <height>", args[0]);
                std::process::exit(1);
            }
            let (width, height) = parse_dimensions(&args[2], &args[3]);
            count_command(&cache, width, height);
        }

        "unrank" => {
            if args.len() < 5 {
                eprintln!("Usage: {} unrank <width> <height> <index> [output_file]", args[0]);
                std::process::exit(1);
            }
            let (width, height) = parse_dimensions(&args[2], &args[3]);
            let index: BigInt = args[4].parse().unwrap_or_else(|_| {
                eprintln!("❌ Error: Invalid index '{}'. Must be an integer.", args[4]);
                std::process::exit(1);
            });
            let output_file = args.get(5).map(|s| s.as_str());
            unrank_command(&cache, width, height, &index, output_file);
        }

        "rank" => {
            if args.len() < 3 {
                eprintln!("Usage: {} rank <record_file>", args[0]);
                std::process::exit(1);
            }
            rank_command(&cache, &args[2]);
        }

        "random" => {
            if args.len() < 4 {
                eprintln!("Usage: {} random <width> <height> [--seed <seed>] [output_file]", args[0]);
                std::process::exit(1);
            }
            let (width, height) = parse_dimensions(&args[2], &args[3]);

            // Parse optional --seed flag
            let mut seed = None;
            let mut output_file_idx = 4;

            if args.len() > 4 && args[4] == "--seed" {
                if args.len() < 6 {
                    eprintln!("❌ Error: --seed requires a value");
                    std::process::exit(1);
                }
                seed = Some(args[5].parse::<u32>().unwrap_or_else(|_| {
                    eprintln!("❌ Error: Invalid seed '{}'. Must fit in 32 bits.", args[5]);
                    std::process::exit(1);
                }));
                output_file_idx = 6;
            }

            let output_file = args.get(output_file_idx).map(|s| s.as_str());
            random_command(&cache, width, height, seed, output_file);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  count <width> <height>");
    eprintln!("      Print the number of perfect mazes on the grid");
    eprintln!();
    eprintln!("  unrank <width> <height> <index> [output_file]");
    eprintln!("      Print the maze at the given index as an edge bit string");
    eprintln!("      - output_file: Optional file to save the maze record (JSON)");
    eprintln!();
    eprintln!("  rank <record_file>");
    eprintln!("      Compute the index of the maze stored in a record file");
    eprintln!();
    eprintln!("  random <width> <height> [--seed <seed>] [output_file]");
    eprintln!("      Pick a maze uniformly at random");
    eprintln!("      - --seed: Optional 32-bit seed for a reproducible pick");
    eprintln!("      - output_file: Optional file to save the maze record (JSON)");
    eprintln!();
    eprintln!("Edge bits list horizontal passages row by row, then vertical ones;");
    eprintln!("1 means the passage is open.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MAZE_RANK_CACHE_ENTRIES  Count tables kept in memory (default 16)");
    eprintln!("  MAZE_RANK_MAX_SPAN       Widest grid side for rank/unrank (default 10)");
}

fn parse_dimensions(width: &str, height: &str) -> (usize, usize) {
    let parse = |s: &str| {
        s.parse::<usize>().unwrap_or_else(|_| {
            eprintln!("❌ Error: Invalid dimension '{}'. Must be a positive integer.", s);
            std::process::exit(1);
        })
    };
    (parse(width), parse(height))
}

fn count_command(cache: &TableCache, width: usize, height: usize) {
    let start = Instant::now();
    match CountSummary::compute(cache, width, height) {
        Ok(summary) => {
            println!(
                "There are {} different mazes on a {}x{} grid.",
                summary.count, width, height
            );
            println!(
                "That's a {}-bit number, compared with {} bits for a naive packing, a saving of {:.2}%.",
                summary.optimal_bits,
                summary.naive_bits,
                100.0 * summary.saving
            );
            tracing::debug!("Counted in {:.3}s", start.elapsed().as_secs_f64());
        }
        Err(e) => {
            eprintln!("❌ Error counting mazes: {}", e);
            std::process::exit(1);
        }
    }
}

fn unrank_command(
    cache: &TableCache,
    width: usize,
    height: usize,
    index: &BigInt,
    output_file: Option<&str>,
) {
    match cache.unrank(width, height, index) {
        Ok(maze) => {
            println!("{}", maze.to_bit_string());
            // the index is in range, so it is non-negative
            let index = index.magnitude().clone();
            finish(MazeRecord::new(index, &maze), output_file);
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn rank_command(cache: &TableCache, record_file: &str) {
    let record = match load_record(record_file) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("❌ Error loading record: {}", e);
            std::process::exit(1);
        }
    };

    let maze = match record.to_maze() {
        Ok(maze) => maze,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    match cache.rank(&maze) {
        Ok(index) => {
            println!("{}", index);
            if index != record.index {
                tracing::warn!(
                    "Record claims index {} but the maze ranks at {}",
                    record.index,
                    index
                );
            }
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn random_command(
    cache: &TableCache,
    width: usize,
    height: usize,
    seed: Option<u32>,
    output_file: Option<&str>,
) {
    let picked = match seed {
        Some(seed) => seeded_maze(cache, width, height, seed),
        None => random_maze(cache, width, height, &mut rand::thread_rng()),
    };

    match picked {
        Ok((index, maze)) => {
            println!("{}", index);
            println!("{}", maze.to_bit_string());
            finish(MazeRecord::new(index, &maze), output_file);
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn finish(record: MazeRecord, output_file: Option<&str>) {
    let Some(path) = output_file else {
        return;
    };
    match save_record(&record, path) {
        Ok(()) => println!("💾 Maze record saved to: {}", path),
        Err(e) => {
            eprintln!("❌ Error saving maze record: {}", e);
            std::process::exit(1);
        }
    }
}
