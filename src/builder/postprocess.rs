//! Hex encoding of the final WASM binary.

use std::fs;
use std::path::Path;

use crate::builder::BuildError;

/// Contract-format version the Arwen VM expects after the bytecode.
pub const ARWEN_TAG: &str = "0500";

/// Write `hex` (lowercase hex of `wasm`) and `hex_arwen` (the same text
/// followed by [`ARWEN_TAG`]). Both files are overwritten, no newline added.
pub fn tag(wasm: &Path, hex: &Path, hex_arwen: &Path) -> Result<(), BuildError> {
    let bytecode = fs::read(wasm).map_err(|e| BuildError::io(wasm, e))?;
    let encoded = hex::encode(&bytecode);

    fs::write(hex, &encoded).map_err(|e| BuildError::io(hex, e))?;

    let mut tagged = encoded;
    tagged.push_str(ARWEN_TAG);
    fs::write(hex_arwen, tagged).map_err(|e| BuildError::io(hex_arwen, e))?;

    tracing::debug!(
        "encoded {} bytes from {} into {}",
        bytecode.len(),
        wasm.display(),
        hex_arwen.display()
    );
    Ok(())
}
