//! Plain-text views of a message for speech output and titles.

/// Longest run of `#` treated as a header marker.
const MAX_SPEECH_HEADER_MARKERS: usize = 6;

/// Strip markdown syntax so a message reads naturally through text-to-speech.
///
/// Removes header markers, emphasis stars and backticks, and replaces
/// `[text](url)` links with their text. Everything else is kept as is.
///
/// # Example
///
/// ```
/// use ada_markdown::speech_text;
///
/// assert_eq!(
///     speech_text("## Tip\n**Use** `Tab` to move, see [the guide](https://a.b)."),
///     "Tip\nUse Tab to move, see the guide."
/// );
/// ```
#[must_use]
pub fn speech_text(text: &str) -> String {
    let without_headers = strip_header_markers(text);
    let without_markers: String = without_headers
        .chars()
        .filter(|&c| c != '*' && c != '`')
        .collect();
    collapse_links(&without_markers)
}

/// Remove `**` markers from a section title and trim it.
///
/// ```
/// use ada_markdown::strip_bold_markers;
///
/// assert_eq!(strip_bold_markers("  **Summary**  "), "Summary");
/// ```
#[must_use]
pub fn strip_bold_markers(title: &str) -> String {
    title.replace("**", "").trim().to_owned()
}

/// Drop a leading run of one to six `#` followed by whitespace from every line.
fn strip_header_markers(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let body = line.trim_start();
            let indent = &line[..line.len() - body.len()];
            let run = body.bytes().take_while(|&b| b == b'#').count();
            let after = &body[run..];
            if (1..=MAX_SPEECH_HEADER_MARKERS).contains(&run) && after.starts_with(char::is_whitespace)
            {
                format!("{indent}{}", after.trim_start())
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace `[text](url)` with `text`.
fn collapse_links(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        output.push_str(&rest[..open]);
        let candidate = &rest[open..];
        match parse_link(candidate) {
            Some((label, len)) => {
                output.push_str(label);
                rest = &candidate[len..];
            }
            None => {
                output.push('[');
                rest = &candidate[1..];
            }
        }
    }
    output.push_str(rest);
    output
}

/// Parse `[label](url)` at the start of `text`, returning the label and length.
fn parse_link(text: &str) -> Option<(&str, usize)> {
    let close = text.find(']')?;
    let label = &text[1..close];
    let url_part = text[close + 1..].strip_prefix('(')?;
    let url_len = url_part.find(')')?;
    if label.is_empty() || url_len == 0 {
        return None;
    }
    Some((label, close + url_len + 3))
}
