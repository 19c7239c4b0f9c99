pub mod droplets;
pub mod images;
pub mod keys;

use serde_json::Value;

/// Print a decoded API response as pretty JSON.
pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
