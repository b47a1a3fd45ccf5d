//! Canonicalize command implementation.

use sdtmhash_canonical::Canonicalizer;
use std::io;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let canonicalizer = Canonicalizer::default();

    // Read JSON from file or stdin
    let result = match input {
        Some(path) => canonicalizer.digest_path(&path)?,
        None => canonicalizer.digest_reader(io::stdin().lock())?,
    };

    println!("{}", result.canonical);
    Ok(())
}
