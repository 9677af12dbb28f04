//! Header/message layout shared by commits and annotated tags
//!
//! ```text
//! tree 9bd3...
//! parent 1a2b...
//! parent 3c4d...
//! author A U Thor <author@example.com> 1700000000 +0100
//! committer A U Thor <author@example.com> 1700000000 +0100
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  <continuation lines start with a single space>
//!
//! <message>
//! ```
//!
//! Headers are an ordered list of pairs. Keys repeat (a merge commit has several `parent`
//! lines), so a pair is always appended and never replaces an earlier one.

use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct HeaderRecord {
    headers: Vec<(String, String)>,
    message: String,
}

impl HeaderRecord {
    /// Split content into header pairs and the message
    ///
    /// Each non-empty line before the first blank one is split on its first space. A line that
    /// starts with a space is not a header of its own: it continues the previous value and is
    /// appended to it after a `\n`, which is how `gpgsig` and `mergetag` span several lines.
    /// `display` puts the leading space back, so the original text is reproduced exactly.
    pub fn parse(content: &Bytes) -> Self {
        let text = String::from_utf8_lossy(content);
        let mut lines = text.split('\n');
        let mut headers: Vec<(String, String)> = Vec::new();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(continuation) = line.strip_prefix(' ')
                && let Some((_, value)) = headers.last_mut()
            {
                value.push('\n');
                value.push_str(continuation);
                continue;
            }

            let (key, value) = line.split_once(' ').unwrap_or((line, ""));
            headers.push((key.to_string(), value.to_string()));
        }

        // a header-only record has nothing left here
        let message = lines.collect::<Vec<&str>>().join("\n");

        HeaderRecord { headers, message }
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First value recorded under `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.all(key).next()
    }

    /// Every value recorded under `key`, in order
    ///
    /// The values borrow from the record only, so `key` may be a temporary.
    pub fn all<'r, 'k>(&'r self, key: &'k str) -> impl Iterator<Item = &'r str> + use<'r, 'k> {
        self.headers
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render back to the on-disk text layout
    pub fn display(&self) -> String {
        let mut lines = vec![];

        for (key, value) in &self.headers {
            lines.push(format!("{} {}", key, value.replace('\n', "\n ")));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }
}
