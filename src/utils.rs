//! Utility functions for filenames and download headers

use crate::types::VideoMetadata;

/// Substitute used when the site reports no id or no usable title
pub const FALLBACK_NAME: &str = "video";

/// Extension of every artifact filename
const EXTENSION: &str = "mp4";

/// Strip a title down to characters that are safe in a filename
///
/// Keeps Unicode letters and digits, spaces, hyphens, and underscores, then
/// trims surrounding whitespace.
///
/// # Examples
///
/// ```
/// use tubegrab::utils::sanitize_title;
///
/// assert_eq!(sanitize_title("My: Video! (2024)"), "My Video 2024");
/// assert_eq!(sanitize_title("  뮤직비디오 - MV_1 "), "뮤직비디오 - MV_1");
/// ```
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Compose `"{id}_{safe_title}.mp4"` from extractor metadata
///
/// A missing id becomes `"video"`. A missing title, or one with nothing left
/// after sanitizing, also becomes `"video"`.
///
/// # Examples
///
/// ```
/// use tubegrab::types::VideoMetadata;
/// use tubegrab::utils::artifact_filename;
///
/// let metadata = VideoMetadata {
///     id: Some("abc123".into()),
///     title: Some("Test Clip".into()),
/// };
/// assert_eq!(artifact_filename(&metadata), "abc123_Test Clip.mp4");
/// assert_eq!(artifact_filename(&VideoMetadata::default()), "video_video.mp4");
/// ```
pub fn artifact_filename(metadata: &VideoMetadata) -> String {
    let id = metadata
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or(FALLBACK_NAME);

    let title = metadata
        .title
        .as_deref()
        .map(sanitize_title)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string());

    format!("{}_{}.{}", id, title, EXTENSION)
}

/// Build a `Content-Disposition: attachment` value for a filename
///
/// The plain `filename` parameter carries an ASCII approximation (non-ASCII
/// characters and quotes become `_`); `filename*` carries the exact name
/// percent-encoded as UTF-8 per RFC 5987. The result is always visible ASCII.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(filename)
    )
}
