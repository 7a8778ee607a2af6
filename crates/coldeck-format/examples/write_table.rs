use coldeck_core::{Column, Table};
use coldeck_format::{encode_table_with, WriteOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let path = args.get(1).cloned().unwrap_or_else(|| "events.cdk".to_string());
    let level: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(6);

    let rows = 1000;
    let table = Table::new(vec![
        Column::int32("id", (1..=rows as i32).collect()),
        Column::string(
            "event",
            (0..rows)
                .map(|i| {
                    ["login", "logout", "purchase", "page_view"][i % 4].to_string()
                })
                .collect(),
        ),
        Column::float64("duration_ms", (0..rows).map(|i| (i % 97) as f64 * 1.5).collect()),
    ])?;

    println!("\n📦 Encoding {} rows x {} columns (level {})", table.row_count, table.columns.len(), level);

    let options = WriteOptions {
        compression_level: level,
        ..WriteOptions::default()
    };
    let encoded = encode_table_with(&table, &options)?;
    std::fs::write(&path, &encoded)?;

    println!("✅ Wrote {} bytes to {}\n", encoded.len(), path);
    for column in &table.columns {
        println!(
            "   {:12} {:8} {} rows",
            column.name,
            column.data_type().name(),
            column.len()
        );
    }
    println!();

    Ok(())
}
