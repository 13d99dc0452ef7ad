use crate::{errors::Error, wire::Verdict};

/// Escape text for Telegram HTML mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// One line per verdict, `<icon label> – <email>`, in the given order.
pub fn render_results<'a>(verdicts: impl IntoIterator<Item = &'a Verdict>) -> String {
    let lines: Vec<String> = verdicts
        .into_iter()
        .map(|v| format!("{} – {}", v.label.display(), escape_html(&v.email)))
        .collect();

    if lines.is_empty() {
        return "🤷 The service returned no results.".to_string();
    }
    lines.join("\n")
}

pub fn render_error(err: &Error) -> String {
    format!("⚠ Error: {}", escape_html(&err.to_string()))
}

/// Split text into chunks of at most `limit` bytes, breaking at line
/// boundaries. A line longer than `limit` is cut on a char boundary, never
/// inside an HTML entity.
pub fn split_lines(text: &str, limit: usize) -> Vec<String> {
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    let mut chunk = String::new();
    for line in text.split('\n') {
        let mut rest = line;
        while rest.len() > limit {
            if !chunk.is_empty() {
                out.push(std::mem::take(&mut chunk));
            }
            let cut = fitting_prefix(rest, limit);
            out.push(rest[..cut].to_string());
            rest = &rest[cut..];
        }

        let needed = if chunk.is_empty() {
            rest.len()
        } else {
            chunk.len() + 1 + rest.len()
        };
        if needed > limit && !chunk.is_empty() {
            out.push(std::mem::take(&mut chunk));
        }
        if !chunk.is_empty() {
            chunk.push('\n');
        }
        chunk.push_str(rest);
    }
    if !chunk.is_empty() {
        out.push(chunk);
    }
    out
}

/// Byte length of the longest prefix of `s` within `max` bytes that ends on a
/// char boundary and outside an `&...;` entity. Always at least one char.
fn fitting_prefix(s: &str, max: usize) -> usize {
    let mut end = 0;
    for (i, ch) in s.char_indices() {
        let next = i + ch.len_utf8();
        if next > max {
            break;
        }
        end = next;
    }

    if let Some(amp) = s[..end].rfind('&') {
        if amp > 0 && !s[amp..end].contains(';') {
            end = amp;
        }
    }

    if end == 0 {
        end = s.chars().next().map_or(s.len(), char::len_utf8);
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::StatusLabel;

    fn verdict(email: &str, label: StatusLabel) -> Verdict {
        Verdict {
            email: email.to_string(),
            label,
        }
    }

    #[test]
    fn escapes_html() {
        let s = r#"<a href="x&y">"#;
        assert_eq!(escape_html(s), "&lt;a href=&quot;x&amp;y&quot;&gt;");
    }

    #[test]
    fn renders_one_line_per_verdict_in_order() {
        let out = render_results(&[
            verdict("flag@x.io", StatusLabel::Flagged),
            verdict("ok@x.io", StatusLabel::Active),
            verdict("bot@x.io", StatusLabel::CaptchaBlocked),
            verdict("what@x.io", StatusLabel::Unknown),
        ]);
        assert_eq!(
            out,
            "⚠️ Flagged – flag@x.io\n\
             ✅ Active – ok@x.io\n\
             🛡 CAPTCHA blocked – bot@x.io\n\
             ❓ Unknown or Error – what@x.io"
        );
    }

    #[test]
    fn escapes_emails_in_results() {
        let out = render_results(&[verdict("<b>@x.io", StatusLabel::Active)]);
        assert_eq!(out, "✅ Active – &lt;b&gt;@x.io");
    }

    #[test]
    fn empty_results_still_render_a_line() {
        assert!(!render_results(&[]).is_empty());
    }

    #[test]
    fn error_rendering_includes_detail() {
        let out = render_error(&Error::Status {
            status: 500,
            body: "<boom>".to_string(),
        });
        assert!(out.starts_with("⚠ Error: "));
        assert!(out.contains("500"));
        assert!(out.contains("&lt;boom&gt;"));
    }

    #[test]
    fn split_lines_never_breaks_a_line() {
        let text = (0..50)
            .map(|i| format!("line number {i:02}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = split_lines(&text, 100);
        assert!(chunks.len() > 1);
        for c in &chunks {
            assert!(c.len() <= 100);
        }
        assert_eq!(chunks.join("\n"), text);
    }

    #[test]
    fn split_lines_short_text_is_one_chunk() {
        assert_eq!(split_lines("a\nb", 100), vec!["a\nb".to_string()]);
    }

    #[test]
    fn split_lines_cuts_oversized_lines_to_the_limit() {
        let long = "x".repeat(30);
        let text = format!("a\n{long}\nb");
        let chunks = split_lines(&text, 10);
        assert_eq!(chunks, vec!["a", "xxxxxxxxxx", "xxxxxxxxxx", "xxxxxxxxxx", "b"]);
    }

    #[test]
    fn split_lines_respects_multibyte_chars() {
        let text = "é".repeat(15);
        let chunks = split_lines(&text, 7);
        for c in &chunks {
            assert!(c.len() <= 7);
        }
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn huge_escaped_email_fits_telegram_messages() {
        let email = format!("{}@x.io", "&".repeat(4000));
        let html = render_results(&[verdict(&email, StatusLabel::Active)]);
        assert!(html.len() > 20_000);

        let chunks = split_lines(&html, 4000);
        assert!(chunks.len() > 1);
        for c in &chunks {
            assert!(c.len() <= 4000);
            // No entity is cut in half.
            if let Some(amp) = c.rfind('&') {
                assert!(c[amp..].contains(';'), "dangling entity in {:?}", &c[amp..]);
            }
            assert!(!c.starts_with("amp;"));
        }
        assert_eq!(chunks.concat(), html);
    }
}
