use std::path::Path;

use anyhow::Result;

use crate::{pdf, render};

pub fn run(path: &Path, json: bool) -> Result<()> {
    let text = pdf::read_document_text(path)?;
    let appointments = termine_core::extract(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&appointments)?);
        return Ok(());
    }

    println!("{}", render::render_document(path));
    println!("{}", render::render_appointments(&appointments));

    Ok(())
}
