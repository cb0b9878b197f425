use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Decoded photo plus the file extension implied by its data URL
#[derive(Debug)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

/// Decodes a base64 photo, with or without a `data:<mime>;base64,` prefix.
///
/// Everything up to and including the first comma is treated as the prefix.
/// Returns `None` when the payload is not valid base64 or decodes to nothing.
pub fn decode(payload: &str) -> Option<DecodedImage> {
    let (prefix, data) = match payload.split_once(',') {
        Some((prefix, data)) => (Some(prefix), data),
        None => (None, payload),
    };

    // browsers and some clients wrap long base64 lines
    let cleaned: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(cleaned).ok()?;
    if bytes.is_empty() {
        return None;
    }

    Some(DecodedImage {
        bytes,
        extension: prefix.map(extension_for).unwrap_or("jpg"),
    })
}

fn extension_for(prefix: &str) -> &'static str {
    let mime = prefix
        .strip_prefix("data:")
        .unwrap_or(prefix)
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_base64() {
        let img = decode("aGVsbG8=").unwrap();
        assert_eq!(img.bytes, b"hello");
        assert_eq!(img.extension, "jpg");
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let img = decode("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(img.bytes, b"hello");
        assert_eq!(img.extension, "png");

        let img = decode("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(img.extension, "jpg");
    }

    #[test]
    fn only_first_comma_splits() {
        // the remainder after the first comma is not valid base64
        assert!(decode("data:image/png;base64,aGVs,bG8=").is_none());
    }

    #[test]
    fn wrapped_lines_are_accepted() {
        let img = decode("aGVs\nbG8=").unwrap();
        assert_eq!(img.bytes, b"hello");
    }

    #[test]
    fn garbage_and_empty_are_rejected() {
        assert!(decode("not base64 at all!").is_none());
        assert!(decode("").is_none());
        assert!(decode("data:image/png;base64,").is_none());
    }
}
