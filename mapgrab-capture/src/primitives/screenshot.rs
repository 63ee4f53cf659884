use super::command;
use crate::error::{Error, Result};
use crate::primitives::screen::Region;
use std::path::Path;
use tracing::debug;

const IMPORT: &str = "import";

/// Build the ImageMagick `import` arguments that grab `region` of the root
/// window into `output`
///
/// `+repage` drops the crop offset from the saved PNG so that every tile
/// starts at (0,0) when it is later composited.
pub fn build_import_args(region: &Region, output: &Path) -> Vec<String> {
    vec![
        "-silent".to_string(),
        "-window".to_string(),
        "root".to_string(),
        "-crop".to_string(),
        region.geometry(),
        "+repage".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Capture `region` of the screen into a PNG file
///
/// Blocks until `import` has written the file.
pub fn capture_region_to_file(region: &Region, output: &Path) -> Result<()> {
    if region.width == 0 || region.height == 0 {
        return Err(Error::ScreenshotFailed(format!(
            "Capture region {:?} is empty",
            region
        )));
    }

    let args = build_import_args(region, output);
    command::run(IMPORT, args.as_slice())?;

    if !output.exists() {
        return Err(Error::ScreenshotFailed(format!(
            "{} did not produce {}",
            IMPORT,
            output.display()
        )));
    }
    debug!(path = %output.display(), geometry = %region.geometry(), "tile captured");
    Ok(())
}
