use coldeck_core::{Column, ColumnValues};
use coldeck_format::TableReader;

fn value_at(column: &Column, row: usize) -> String {
    match &column.values {
        ColumnValues::Int32(items) => items[row].to_string(),
        ColumnValues::Float64(items) => items[row].to_string(),
        ColumnValues::String(items) => items[row].clone(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file> [column ...]", args[0]);
        std::process::exit(1);
    }

    let reader = TableReader::open(&args[1])?;

    println!("\n📖 {}", args[1]);
    println!("   Version: {}", reader.version());
    println!("   Columns: {}", reader.column_count());
    println!("   Rows:    {}\n", reader.row_count());

    for (name, data_type) in reader.list_columns() {
        println!("   {:16} {}", name, data_type.name());
    }
    println!();

    let table = if args.len() > 2 {
        let names: Vec<&str> = args[2..].iter().map(String::as_str).collect();
        reader.read_columns(&names)?
    } else {
        reader.read_all()?
    };

    let shown = (table.row_count as usize).min(10);
    println!("─────────────────────────────────────────");
    for row in 0..shown {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("{}={}", c.name, value_at(c, row)))
            .collect();
        println!("  #{:<4} {}", row, cells.join("  "));
    }
    println!("─────────────────────────────────────────");
    if (table.row_count as usize) > shown {
        println!("  ... {} more rows", table.row_count as usize - shown);
    }
    println!();

    Ok(())
}
