use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Organizations", "organizations"),
        ("Users", "users"),
        ("Projects", "projects"),
        ("Locations", "locations"),
        ("Time entries", "time_entries"),
    ] {
        let count: i64 =
            pool.conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 3) OPEN ENTRIES
    //
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM time_entries WHERE clock_out IS NULL",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Open entries:{} {}", CYAN, RESET, open);

    //
    // 4) ENTRY DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT clock_in FROM time_entries ORDER BY clock_in ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT clock_in FROM time_entries ORDER BY clock_in DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Entry range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
