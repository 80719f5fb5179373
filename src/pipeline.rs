//! End-to-end run: load the division tree, stream the SQL, publish the file.

use crate::config::Settings;
use crate::emitter::{write_seed_sql, SeedStats};
use crate::error::SeedError;
use crate::fs_utils::write_atomic;
use crate::model::load_document;

/// Convert `settings.input` into a seed script at `settings.output`
///
/// The output is replaced only if the whole script was written; on error any
/// previous output file is left as it was.
pub fn run(settings: &Settings) -> Result<SeedStats, SeedError> {
    tracing::info!(input = %settings.input.display(), "Reading division tree");
    let document = load_document(&settings.input)?;

    let options = settings.seed_options();

    tracing::info!(
        output = %settings.output.display(),
        batch_size = settings.batch_size.get(),
        "Writing seed script"
    );
    write_atomic(&settings.output, |out| write_seed_sql(out, &document, &options))
}
