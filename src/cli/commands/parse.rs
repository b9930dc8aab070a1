//! parse command - Extract DRS metadata from a filename or path

use std::path::Path;

use crate::cli::Context;
use crate::core::config::OutputFormat;
use crate::core::extract::Encoding;
use crate::core::record::Cmip5File;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Parse `input` and print the extracted record.
///
/// When `root` is given it is stripped from the front of `input` first.
/// When `encoding` is `None` it is guessed with [`Encoding::detect`].
pub fn parse(
    ctx: &Context,
    input: &str,
    encoding: Option<Encoding>,
    root: Option<&Path>,
    json: bool,
) -> Result<()> {
    let input = strip_root(input, root)?;
    if let Some(root) = root {
        output::debug(
            format!("Stripped root '{}': {}", root.display(), input),
            ctx.verbosity,
        );
    }

    let encoding = match encoding {
        Some(encoding) => encoding,
        None => {
            let guessed = Encoding::detect(input);
            output::debug(format!("Guessed encoding: {}", guessed), ctx.verbosity);
            guessed
        }
    };

    let record = Cmip5File::parse(encoding, input)
        .with_context(|| format!("Failed to parse '{}' as {}", input, encoding))?;
    output::debug(
        format!("Extracted {} field(s)", record.len()),
        ctx.verbosity,
    );

    let format = if json {
        OutputFormat::Json
    } else {
        ctx.config.output()
    };
    output::print(output::format_record(&record, format).context("Failed to format record")?);

    Ok(())
}

/// Remove `root` from the front of `input`.
fn strip_root<'a>(input: &'a str, root: Option<&Path>) -> Result<&'a str> {
    let Some(root) = root else {
        return Ok(input);
    };
    let relative = Path::new(input)
        .strip_prefix(root)
        .with_context(|| format!("'{}' is not under '{}'", input, root.display()))?;
    relative
        .to_str()
        .with_context(|| format!("'{}' is not valid UTF-8", relative.display()))
}
