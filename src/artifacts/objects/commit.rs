//! Git commit object
//!
//! Commits carry an ordered header block and a free-text message:
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>          (zero or more)
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The decoder keeps every header line (see `HeaderRecord`); the accessors below only read
//! from it, so a commit with unusual or malformed headers still decodes.

use crate::artifacts::errors::FormatError;
use crate::artifacts::objects::header_record::HeaderRecord;
use crate::artifacts::objects::object::Unpackable;
use bytes::Bytes;

/// Author, committer or tagger line
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Signature {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Signature {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Format name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl TryFrom<&str> for Signature {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        // Split from right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid signature format"));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp"))?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("Invalid signature format: missing '<'"))?;
        let email_end = name_email_part
            .rfind('>')
            .filter(|&end| end > email_start)
            .ok_or_else(|| anyhow::anyhow!("Invalid signature format: missing '>'"))?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let offset = parse_timezone(timezone).ok_or_else(|| anyhow::anyhow!("Invalid timezone"))?;
        let datetime = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp"))?
            .with_timezone(&offset);

        Ok(Signature {
            name,
            email,
            timestamp: datetime,
        })
    }
}

/// Parse a `+hhmm` / `-hhmm` offset
fn parse_timezone(timezone: &str) -> Option<chrono::FixedOffset> {
    let (sign, digits) = match timezone.as_bytes().first()? {
        b'+' => (1, &timezone[1..]),
        b'-' => (-1, &timezone[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Git commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    record: HeaderRecord,
}

impl Commit {
    pub fn record(&self) -> &HeaderRecord {
        &self.record
    }

    pub fn headers(&self) -> &[(String, String)] {
        self.record.headers()
    }

    pub fn message(&self) -> &str {
        self.record.message()
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> &str {
        self.message().lines().next().unwrap_or("")
    }

    /// Tree object ID in hex, as written in the header
    pub fn tree(&self) -> Option<&str> {
        self.record.first("tree")
    }

    /// Parent commit IDs in the order they were recorded
    pub fn parents(&self) -> Vec<&str> {
        self.record.all("parent").collect()
    }

    pub fn author(&self) -> Option<anyhow::Result<Signature>> {
        self.record.first("author").map(Signature::try_from)
    }

    pub fn committer(&self) -> Option<anyhow::Result<Signature>> {
        self.record.first("committer").map(Signature::try_from)
    }

    pub fn display(&self) -> String {
        self.record.display()
    }
}

impl Unpackable for Commit {
    fn deserialize(content: Bytes) -> Result<Self, FormatError> {
        Ok(Commit {
            record: HeaderRecord::parse(&content),
        })
    }
}
