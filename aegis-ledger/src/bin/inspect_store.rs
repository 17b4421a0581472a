use std::env;
use std::path::Path;

use aegis_ledger::substrate::redb::{HISTORY_TABLE, STATE_TABLE};
use aegis_ledger::substrate::KeyVersion;
use redb::{Database, ReadableTable};

/// Composite keys embed U+0000 delimiters; swap them for something printable.
fn printable(key: &str) -> String {
    key.trim_matches('\u{0}').replace('\u{0}', "/")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let default_path = "data/attestation.redb";

    let path_str = if args.len() > 1 {
        &args[1]
    } else if Path::new(default_path).exists() {
        default_path
    } else {
        println!("Usage: inspect_store <path_to_attestation.redb>");
        println!("No path provided and default '{}' not found.", default_path);
        return Ok(());
    };

    let path = Path::new(path_str);
    if !path.exists() {
        eprintln!("Error: File not found at {:?}", path);
        std::process::exit(1);
    }

    println!("Opening store at {:?}", path);
    let db = Database::open(path)?;
    let read_txn = db.begin_read()?;

    println!("\n== state ==");
    let state = read_txn.open_table(STATE_TABLE)?;
    let mut count = 0;
    println!("{:<48} | {:<10}", "Key", "Bytes");
    println!("{:-<48}-+-{:-<10}", "", "");
    for entry in state.iter()? {
        let (key, value) = entry?;
        println!("{:<48} | {:<10}", printable(key.value()), value.value().len());
        count += 1;
    }
    println!("Total keys: {}", count);

    println!("\n== history ==");
    let history = read_txn.open_table(HISTORY_TABLE)?;
    let mut versions = 0;
    println!("{:<48} | {:<8} | {:<36} | {}", "Key", "Seq", "Tx", "Kind");
    println!("{:-<48}-+-{:-<8}-+-{:-<36}-+------", "", "", "");
    for entry in history.iter()? {
        let (key, value) = entry?;
        let (ledger_key, seq) = key.value();
        let version: KeyVersion = bincode::deserialize(value.value())
            .map_err(|e| format!("Failed to decode version {} of {}: {}", seq, ledger_key, e))?;
        let kind = if version.is_tombstone() { "delete" } else { "write" };
        println!(
            "{:<48} | {:<8} | {:<36} | {}",
            printable(ledger_key),
            seq,
            version.tx_id,
            kind
        );
        versions += 1;
    }
    println!("Total versions: {}", versions);

    Ok(())
}
