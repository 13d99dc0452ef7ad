use std::collections::HashSet;

/// Pull candidate email addresses out of free text.
///
/// Entries are separated by commas or newlines, trimmed, and kept only if
/// they contain both `@` and `.`. Duplicates are dropped; the first
/// occurrence decides the position in the output.
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|s| looks_like_email(s))
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

fn looks_like_email(s: &str) -> bool {
    s.contains('@') && s.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_commas_and_newlines() {
        let got = extract_emails("a@x.io, b@y.com\n  c@z.org  \r\nd@w.net");
        assert_eq!(got, vec!["a@x.io", "b@y.com", "c@z.org", "d@w.net"]);
    }

    #[test]
    fn drops_entries_without_at_or_dot() {
        let got = extract_emails("hello, user@localhost, example.com, ok@mail.io");
        assert_eq!(got, vec!["ok@mail.io"]);
    }

    #[test]
    fn deduplicates_after_trimming() {
        let got = extract_emails("a@x.io,a@x.io\n   a@x.io   ,b@x.io");
        assert_eq!(got, vec!["a@x.io", "b@x.io"]);
    }

    #[test]
    fn keeps_case_as_submitted() {
        let got = extract_emails("Active@Example.com, active@example.com");
        assert_eq!(got, vec!["Active@Example.com", "active@example.com"]);
    }

    #[test]
    fn empty_and_blank_inputs_yield_nothing() {
        assert!(extract_emails("").is_empty());
        assert!(extract_emails(" ,\n, ").is_empty());
        assert!(extract_emails("just some words").is_empty());
    }

    #[test]
    fn output_is_unique_and_well_formed_for_messy_input() {
        let inputs = [
            "a@b.c,a@b.c,,\n\n a@b.c",
            "x@y.z\ny@z.x\nx@y.z, @., .@",
            "no emails here. really@",
            "one@two.three four@five.six",
        ];
        for input in inputs {
            let got = extract_emails(input);
            let unique: HashSet<&String> = got.iter().collect();
            assert_eq!(unique.len(), got.len(), "duplicates for {input:?}");
            for e in &got {
                assert!(e.contains('@') && e.contains('.'), "bad entry {e:?}");
                assert_eq!(e.trim(), e);
            }
        }
    }
}
