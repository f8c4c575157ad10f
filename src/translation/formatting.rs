//! Best-effort preservation of simple formatting across a translation.
//!
//! DeepL translates plain prose better than text littered with markup, so
//! line breaks and `*bold*`/`_italic_` delimiters are pulled out before the
//! request and re-inserted afterwards. Translation changes text length and
//! word order, so positions are remapped proportionally and snapped to word
//! boundaries: line-break count and ordering are preserved exactly,
//! bold/italic span boundaries only approximately.
//!
//! Nested or overlapping markers are flattened: the outermost marker wins,
//! and delimiters of the other kind inside its span stay literal text.

/// A structural marker extracted from the source text.
///
/// Positions are char offsets into the stripped (plain) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A line break; `pos` is where it was removed.
    LineBreak { pos: usize },
    /// A `*bold*` span covering `start..end`.
    Bold { start: usize, end: usize },
    /// An `_italic_` span covering `start..end`.
    Italic { start: usize, end: usize },
}

/// Strips structural markers from `text`.
///
/// Returns the plain text to send to the translation service and the
/// markers needed to restore the structure. Line breaks become single
/// spaces so the prose keeps flowing; a delimiter without a matching
/// closer stays literal.
pub fn extract_markers(text: &str) -> (String, Vec<Marker>) {
    let chars: Vec<char> = text.chars().collect();
    let mut plain = String::new();
    let mut plain_len = 0usize;
    let mut markers = Vec::new();
    // Currently open span: (delimiter, start offset in plain text)
    let mut open: Option<(char, usize)> = None;

    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '\r' => {}
            '\n' => {
                markers.push(Marker::LineBreak { pos: plain_len });
                plain.push(' ');
                plain_len += 1;
            }
            '*' | '_' => match open {
                Some((delim, start)) if delim == ch => {
                    if plain_len > start {
                        markers.push(if ch == '*' {
                            Marker::Bold {
                                start,
                                end: plain_len,
                            }
                        } else {
                            Marker::Italic {
                                start,
                                end: plain_len,
                            }
                        });
                    }
                    open = None;
                }
                Some(_) => {
                    // Inner delimiter of the other kind: outermost wins.
                    plain.push(ch);
                    plain_len += 1;
                }
                None => {
                    if chars[i + 1..].contains(&ch) {
                        open = Some((ch, plain_len));
                    } else {
                        plain.push(ch);
                        plain_len += 1;
                    }
                }
            },
            _ => {
                plain.push(ch);
                plain_len += 1;
            }
        }
    }

    (plain, markers)
}

/// Re-inserts `markers` into `translated` at proportionally remapped
/// positions.
///
/// `source_len` is the char count of the plain text the markers were
/// extracted from. Line breaks are restored one-for-one in their original
/// order; bold/italic delimiters are wrapped around the nearest word
/// boundaries. Spans that map past the end of a much shorter translation
/// are dropped.
pub fn reapply_markers(translated: &str, markers: &[Marker], source_len: usize) -> String {
    if markers.is_empty() {
        return translated.to_string();
    }

    let mut out: Vec<char> = translated.chars().collect();
    let divisor = source_len.max(1);

    // Line breaks first: replace a nearby space where possible so the
    // text length stays stable, insert otherwise.
    let base_len = out.len();
    let mut shift = 0isize;
    let mut cursor = 0usize;

    for marker in markers {
        let Marker::LineBreak { pos } = *marker else {
            continue;
        };

        let mapped = (pos * base_len / divisor) as isize + shift;
        let target = mapped.clamp(cursor as isize, out.len() as isize) as usize;

        if let Some(space) = find_space_near(&out, target, cursor) {
            out[space] = '\n';
            cursor = space + 1;
        } else {
            out.insert(target, '\n');
            shift += 1;
            cursor = target + 1;
        }
    }

    // Bold/italic spans, widest-start last so insertions do not disturb
    // positions still to be processed.
    let len = out.len();
    let mut spans: Vec<(char, usize, usize)> = markers
        .iter()
        .filter_map(|marker| match *marker {
            Marker::Bold { start, end } => Some(('*', start, end)),
            Marker::Italic { start, end } => Some(('_', start, end)),
            Marker::LineBreak { .. } => None,
        })
        .filter_map(|(delim, start, end)| {
            snap_span(&out, start * len / divisor, end * len / divisor).map(|(s, e)| (delim, s, e))
        })
        .collect();

    spans.sort_by(|a, b| b.1.cmp(&a.1));
    for (delim, start, end) in spans {
        out.insert(end, delim);
        out.insert(start, delim);
    }

    out.into_iter().collect()
}

/// Finds a space to turn into a line break, preferring the closest index
/// to `target` within a small window, never before `lo`.
fn find_space_near(chars: &[char], target: usize, lo: usize) -> Option<usize> {
    const WINDOW: usize = 3;

    for distance in 0..=WINDOW {
        let right = target + distance;
        if right < chars.len() && right >= lo && chars[right] == ' ' {
            return Some(right);
        }
        if distance > 0
            && let Some(left) = target.checked_sub(distance)
            && left >= lo
            && left < chars.len()
            && chars[left] == ' '
        {
            return Some(left);
        }
    }

    None
}

/// Snaps a mapped span to the enclosing word boundaries.
///
/// Returns `None` when the translation leaves no room for the span.
fn snap_span(chars: &[char], start: usize, end: usize) -> Option<(usize, usize)> {
    let len = chars.len();
    if start >= len {
        return None;
    }

    let mut start = start;
    if chars[start].is_whitespace() {
        while start < len && chars[start].is_whitespace() {
            start += 1;
        }
    } else {
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
    }

    let mut end = end.clamp(start, len);
    while end > start && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    while end < len && !chars[end].is_whitespace() {
        end += 1;
    }

    (end > start).then_some((start, end))
}
