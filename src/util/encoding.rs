use anyhow::{anyhow, Context, Result};
use encoding::label::encoding_from_whatwg_label;
use encoding::DecoderTrap;
use std::path::Path;

/// read whole file and decode it to utf-8 (see `decode_to_utf8`)
pub fn read_to_utf8(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read file: {:?}", path))?;
    decode_to_utf8(&bytes).with_context(|| format!("cannot decode file: {:?}", path))
}

/// decode bytes to utf-8, detecting the charset when the input is not valid utf-8
/// (unknown characters are ignored)
/// ref. https://github.com/thuleqaid/rust-chardet
pub fn decode_to_utf8(input: &[u8]) -> Result<String> {
    if let Ok(s) = std::str::from_utf8(input) {
        // strip BOM
        return Ok(s.strip_prefix('\u{feff}').unwrap_or(s).to_string());
    }
    // (encoding, confidence, language)
    let (charset, confidence, _) = chardet::detect(input);
    tracing::debug!(
        "input is not utf-8, detected charset: {} (confidence {:.2})",
        charset,
        confidence
    );
    let coder = encoding_from_whatwg_label(chardet::charset2encoding(&charset));
    if let Some(c) = coder {
        c.decode(input, DecoderTrap::Ignore)
            .map_err(|e| anyhow!("cannot decode as {}: {:?}", charset, e))
    } else {
        tracing::warn!("unknown charset detected: {}", charset);
        Err(anyhow!("cannot find character encodings: {:?}", charset))
    }
}
