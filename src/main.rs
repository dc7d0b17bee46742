use gpo_pol_reader::PolicyFile;
use std::env;
use std::fs::File;
use std::io::BufReader;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-registry.pol> [--raw] [--json]", args[0]);
        std::process::exit(1);
    }

    let pol_path = &args[1];
    let raw = args.iter().skip(2).any(|arg| arg == "--raw");
    let json = args.iter().skip(2).any(|arg| arg == "--json");
    if let Some(unknown) = args.iter().skip(2).find(|arg| *arg != "--raw" && *arg != "--json") {
        eprintln!("ERROR: unknown argument: {}", unknown);
        std::process::exit(1);
    }

    let file = match File::open(pol_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("ERROR: can't open {}: {}", pol_path, e);
            std::process::exit(1);
        }
    };

    let policy = match PolicyFile::parse(&mut BufReader::new(file)) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("\nERROR: Failed to read policy file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    if raw {
        println!("{} raw entries in {}", policy.num_entries(), pol_path);
        for (i, entry) in policy.iter_raw().enumerate() {
            println!(
                "  {}. {}\\{} ({}, {} bytes)",
                i + 1,
                entry.path,
                entry.key,
                entry.data_type,
                entry.data.len()
            );
        }
        return;
    }

    let entries = match policy.into_entries() {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("\nERROR: Failed to decode policy file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("ERROR: can't serialize entries: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{} entries in {}", entries.len(), pol_path);
    for entry in &entries {
        if entry.disabled {
            println!("  {} [disabled]", entry.key);
        } else {
            println!("  {} = {}", entry.key, entry.value);
        }
        if !entry.meta.is_empty() {
            println!("      meta: {}", entry.meta);
        }
        if !entry.strategy.is_empty() {
            println!("      strategy: {}", entry.strategy);
        }
    }
}
