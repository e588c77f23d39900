//! The `export` command: write the CXML machine-consumption document.

use crate::commands::session::Session;
use crate::core::budget::resolve_limit;
use crate::core::error::Result;
use crate::core::export::generate_cxml;
use crate::core::output::print_info;
use std::path::PathBuf;

pub struct ExportOptions {
    pub repo: String,
    pub reference: Option<String>,
    pub token: Option<String>,
    pub limit: Option<usize>,
    pub output: Option<PathBuf>,
}

pub async fn execute_export(options: ExportOptions) -> Result<()> {
    let session = Session::open(&options.repo, options.token)?;

    let limit = resolve_limit(
        options.limit.or(session.settings.file_limit()),
        session.client().has_token(),
    );
    let loaded = session.load(options.reference.as_deref(), limit).await?;

    let cxml = generate_cxml(&loaded.snapshot, &loaded.cache, &loaded.source).await;

    match &options.output {
        Some(path) => {
            std::fs::write(path, &cxml)?;
            print_info(&format!(
                "Wrote {} bytes of CXML to {}",
                cxml.len(),
                path.display()
            ));
        }
        None => println!("{cxml}"),
    }
    Ok(())
}
