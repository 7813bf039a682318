//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `knowhub_core` wiring:
//!   bootstrap, migrations, seed.
//! - Keep output deterministic for quick local sanity checks.

use knowhub_core::db::{open_db_in_memory, seed_default_notebooks};

fn main() {
    println!("knowhub_core ping={}", knowhub_core::ping());
    println!("knowhub_core version={}", knowhub_core::core_version());

    match smoke_check() {
        Ok(seeded) => println!("knowhub_core seed_notebooks={seeded}"),
        Err(err) => {
            eprintln!("knowhub_core smoke check failed: {err}");
            std::process::exit(1);
        }
    }
}

/// Opens an in-memory store, runs migrations and seeds the stock notebooks.
fn smoke_check() -> Result<usize, Box<dyn std::error::Error>> {
    let mut conn = open_db_in_memory()?;
    let seeded = seed_default_notebooks(&mut conn)?;
    Ok(seeded)
}
