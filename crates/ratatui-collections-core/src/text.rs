use std::borrow::Cow;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Display width of `input` in terminal columns, with tabs counted as four.
pub fn display_width(input: &str) -> usize {
    if input.contains('\t') {
        input.replace('\t', "    ").width()
    } else {
        input.width()
    }
}

/// Truncates `input` to at most `max_cols` display columns.
///
/// A wide character that would straddle the limit is dropped rather than split.
pub fn truncate_to_cols(input: &str, max_cols: usize) -> String {
    if max_cols == 0 {
        return String::new();
    }
    let input = if input.contains('\t') {
        Cow::Owned(input.replace('\t', "    "))
    } else {
        Cow::Borrowed(input)
    };

    let mut out_cols = 0usize;
    let mut out = String::new();
    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if out_cols + w > max_cols {
            break;
        }
        out.push(ch);
        out_cols += w;
    }
    out
}

/// Truncates or right-pads `input` with spaces to exactly `width` columns.
pub fn fit_to_width(input: &str, width: usize) -> String {
    let mut out = truncate_to_cols(input, width);
    let used = out.width();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}
