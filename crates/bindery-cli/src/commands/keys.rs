//! Key table listing

use anyhow::Result;
use bindery_core::KeyCodeTable;
use bindery_runtime::KeyMapper;

pub fn run() -> Result<()> {
    let factory = KeyMapper::factory();
    let table = KeyCodeTable::standard();

    println!("{:<10} {:>5}  factory", "key", "code");
    for (name, code) in table.entries() {
        let mapped = factory.get(code).unwrap_or("-");
        println!("{:<10} {:>5}  {}", name, code.raw(), mapped);
    }
    println!("\n{} keys", table.len());

    Ok(())
}
