//! SQL text helpers: literal escaping, lookup subqueries and section banners.

use std::io::{self, Write};

const BANNER_WIDTH: usize = 76;

/// Escape a string for use inside a single-quoted SQL literal
pub fn escape_sql_literal(s: &str) -> String {
    s.replace('\'', "''")
}

/// Render `s` as a complete single-quoted SQL literal
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", escape_sql_literal(s))
}

/// Flatten text for a `--` comment line; a line break would end the comment
pub fn comment_text(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

/// Subquery resolving a district's surrogate key from its name
pub fn district_id_lookup(district: &str) -> String {
    format!(
        "(SELECT district_id FROM districts WHERE district_name = {})",
        quote_literal(district)
    )
}

/// Subquery resolving a tehsil's surrogate key from (tehsil name, district name)
pub fn tehsil_id_lookup(tehsil: &str, district: &str) -> String {
    format!(
        "(SELECT tehsil_id FROM tehsils WHERE tehsil_name = {} AND district_id = {})",
        quote_literal(tehsil),
        district_id_lookup(district)
    )
}

/// Write a boxed section header, e.g. `-- DISTRICTS` between two rules
pub fn write_banner<W: Write + ?Sized>(output: &mut W, title: &str) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(output, "-- {}", rule)?;
    writeln!(output, "-- {}", title)?;
    writeln!(output, "-- {}", rule)?;
    writeln!(output)
}
