//! Hierarchy-to-SQL emitter.
//!
//! Walks a [`Document`] three times, once per table, so that every referenced
//! parent row is inserted before its children:
//!
//! 1. districts
//! 2. tehsils, with the district resolved by a lookup subquery
//! 3. villages, in multi-row batches, with tehsil and district resolved by lookups
//!
//! followed by a PostgreSQL `DO` block that reports the loaded totals. Every
//! insert carries an `ON CONFLICT ... DO NOTHING` clause on its natural key, so
//! replaying the script against a populated database changes nothing.

use crate::model::{District, Document, Tehsil};
use crate::sql::{comment_text, district_id_lookup, quote_literal, tehsil_id_lookup, write_banner};
use std::io::{self, Write};
use std::num::NonZeroUsize;

/// Villages per multi-row insert unless configured otherwise
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(n) => n,
    None => panic!("default batch size must be non-zero"),
};

/// Value written to `districts.state_name` unless configured otherwise
pub const DEFAULT_STATE_NAME: &str = "Punjab";

/// Options controlling the generated script
#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub batch_size: NonZeroUsize,
    pub state_name: String,
    /// Name of the input document, shown in the header comment
    pub source_label: String,
}

impl Default for SeedOptions {
    fn default() -> Self {
        SeedOptions {
            batch_size: DEFAULT_BATCH_SIZE,
            state_name: DEFAULT_STATE_NAME.to_string(),
            source_label: "punjab_villages.json".to_string(),
        }
    }
}

/// Counts accumulated while emitting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub districts: usize,
    pub tehsils: usize,
    pub villages: usize,
    /// Number of village `INSERT` statements (batches)
    pub village_statements: usize,
}

/// Generate the full seed script into a string.
pub fn generate_seed_sql(document: &Document, options: &SeedOptions) -> (String, SeedStats) {
    let mut buffer = Vec::new();
    let stats = match write_seed_sql(&mut buffer, document, options) {
        Ok(stats) => stats,
        Err(e) => unreachable!("writing to Vec<u8> cannot fail: {}", e),
    };
    (String::from_utf8_lossy(&buffer).into_owned(), stats)
}

/// Stream the seed script for `document` into `output`
///
/// # Arguments
///
/// * `output` - Destination; writes happen per statement, nothing is buffered here
/// * `document` - Parsed division tree
/// * `options` - Batch size, state name and header label
///
/// # Returns
///
/// Counts of the districts, tehsils and villages that were emitted
pub fn write_seed_sql<W: Write + ?Sized>(
    output: &mut W,
    document: &Document,
    options: &SeedOptions,
) -> io::Result<SeedStats> {
    let mut stats = SeedStats::default();

    write_header(output, options)?;

    write_banner(output, "DISTRICTS")?;
    for district in &document.districts {
        write_district(output, district, &options.state_name)?;
        stats.districts += 1;
    }
    tracing::info!(count = stats.districts, "Emitted district inserts");

    writeln!(output)?;
    write_banner(output, "TEHSILS")?;
    for district in &document.districts {
        if district.tehsils.is_empty() {
            tracing::warn!(district = %district.name, "District has no tehsils");
        }
        writeln!(output, "-- Tehsils for {}", comment_text(&district.name))?;
        for tehsil in &district.tehsils {
            write_tehsil(output, tehsil, &district.name)?;
            stats.tehsils += 1;
        }
        writeln!(output)?;
    }
    tracing::info!(count = stats.tehsils, "Emitted tehsil inserts");

    writeln!(output)?;
    write_banner(output, "VILLAGES")?;
    for district in &document.districts {
        for tehsil in &district.tehsils {
            if tehsil.villages.is_empty() {
                continue;
            }
            let (rows, statements) =
                write_village_batches(output, tehsil, &district.name, options.batch_size)?;
            stats.villages += rows;
            stats.village_statements += statements;
        }
    }
    tracing::info!(
        count = stats.villages,
        statements = stats.village_statements,
        "Emitted village inserts"
    );

    writeln!(output)?;
    write_summary(output, &options.state_name)?;

    Ok(stats)
}

fn write_header<W: Write + ?Sized>(output: &mut W, options: &SeedOptions) -> io::Result<()> {
    writeln!(output, "-- {} - Full Villages Data from Census", comment_text(&options.state_name))?;
    writeln!(output, "-- Auto-generated from {}", comment_text(&options.source_label))?;
    writeln!(output)
}

fn write_district<W: Write + ?Sized>(output: &mut W, district: &District, state_name: &str) -> io::Result<()> {
    writeln!(output, "-- District: {}", comment_text(&district.name))?;
    writeln!(output, "INSERT INTO districts (district_name, state_name) VALUES")?;
    writeln!(output, "({}, {})", quote_literal(&district.name), quote_literal(state_name))?;
    writeln!(output, "ON CONFLICT (district_name) DO NOTHING;")?;
    writeln!(output)
}

fn write_tehsil<W: Write + ?Sized>(output: &mut W, tehsil: &Tehsil, district_name: &str) -> io::Result<()> {
    writeln!(output, "INSERT INTO tehsils (tehsil_name, district_id) VALUES")?;
    writeln!(
        output,
        "({}, {})",
        quote_literal(&tehsil.name),
        district_id_lookup(district_name)
    )?;
    writeln!(output, "ON CONFLICT (tehsil_name, district_id) DO NOTHING;")
}

/// Emit one tehsil's villages as ceil(V / batch_size) multi-row inserts.
///
/// Returns (rows written, statements written).
fn write_village_batches<W: Write + ?Sized>(
    output: &mut W,
    tehsil: &Tehsil,
    district_name: &str,
    batch_size: NonZeroUsize,
) -> io::Result<(usize, usize)> {
    writeln!(
        output,
        "-- Villages for {}, {} ({} villages)",
        comment_text(&tehsil.name),
        comment_text(district_name),
        tehsil.villages.len()
    )?;

    // Both lookups are identical for every row of this tehsil
    let tehsil_ref = tehsil_id_lookup(&tehsil.name, district_name);
    let district_ref = district_id_lookup(district_name);

    let mut rows = 0;
    let mut statements = 0;
    for batch in tehsil.villages.chunks(batch_size.get()) {
        writeln!(output, "INSERT INTO villages (village_name, tehsil_id, district_id) VALUES")?;
        for (i, village) in batch.iter().enumerate() {
            let separator = if i + 1 < batch.len() { "," } else { "" };
            writeln!(
                output,
                "({}, {}, {}){}",
                quote_literal(&village.name),
                tehsil_ref,
                district_ref,
                separator
            )?;
        }
        writeln!(output, "ON CONFLICT (village_name, tehsil_id) DO NOTHING;")?;
        writeln!(output)?;

        rows += batch.len();
        statements += 1;
        tracing::debug!(
            tehsil = %tehsil.name,
            district = %district_name,
            rows = batch.len(),
            "Wrote village batch"
        );
    }

    Ok((rows, statements))
}

fn write_summary<W: Write + ?Sized>(output: &mut W, state_name: &str) -> io::Result<()> {
    let loaded = format!("Full {} villages data loaded!", state_name);

    write_banner(output, "SUMMARY")?;
    writeln!(output, "DO $$")?;
    writeln!(output, "BEGIN")?;
    writeln!(output, "    RAISE NOTICE {};", quote_literal(&loaded))?;
    writeln!(output, "    RAISE NOTICE 'Total Districts: %', (SELECT COUNT(*) FROM districts);")?;
    writeln!(output, "    RAISE NOTICE 'Total Tehsils: %', (SELECT COUNT(*) FROM tehsils);")?;
    writeln!(output, "    RAISE NOTICE 'Total Villages: %', (SELECT COUNT(*) FROM villages);")?;
    writeln!(output, "END $$;")
}
