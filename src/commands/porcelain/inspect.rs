use crate::areas::database::Database;
use crate::areas::repository::Repository;
use crate::artifacts::errors::IntegrityWarning;
use crate::artifacts::objects::object::ParsedObject;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;
use tokio::task::JoinSet;

#[derive(Debug, Clone, Copy)]
pub struct InspectOptions {
    /// Report declared-vs-actual size mismatches
    pub verify: bool,
    /// Upper bound on objects decoding or waiting to be printed
    pub jobs: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        InspectOptions {
            verify: false,
            jobs: std::thread::available_parallelism()
                .map(|jobs| jobs.get())
                .unwrap_or(1),
        }
    }
}

/// Outcome of decoding one loose object
struct ObjectReport {
    oid: ObjectId,
    result: anyhow::Result<DecodedReport>,
}

struct DecodedReport {
    declared_size: u64,
    warning: Option<IntegrityWarning>,
    object: ParsedObject,
}

#[derive(Debug, Default)]
struct InspectSummary {
    objects: usize,
    failed: usize,
    warnings: usize,
}

/// Releases results in enumeration order, holding back the ones that finish early
#[derive(Debug)]
struct InOrder<T> {
    next: usize,
    held: BTreeMap<usize, T>,
}

impl<T> InOrder<T> {
    fn new() -> Self {
        InOrder {
            next: 0,
            held: BTreeMap::new(),
        }
    }

    fn held(&self) -> usize {
        self.held.len()
    }

    /// Accept the result at `position` and return every result that is now next in line
    fn push(&mut self, position: usize, item: T) -> Vec<T> {
        self.held.insert(position, item);

        let mut released = Vec::new();
        while let Some(item) = self.held.remove(&self.next) {
            released.push(item);
            self.next += 1;
        }
        released
    }
}

fn decode_object(database: &Database, oid: ObjectId) -> ObjectReport {
    let result = database.load(&oid).and_then(|object| {
        let declared_size = object.declared_size();
        let warning = object.check_integrity();
        let object = ParsedObject::from_decoded(object)
            .context(format!("Unable to parse object {oid}"))?;

        Ok(DecodedReport {
            declared_size,
            warning,
            object,
        })
    });

    ObjectReport { oid, result }
}

impl Repository {
    /// Decode every loose object and print a report for each
    ///
    /// Objects are decoded concurrently and printed in enumeration order as soon as they are
    /// next in line. At most `jobs` objects are decoding or waiting to be printed at any time.
    /// A failure is reported and the batch carries on.
    pub async fn inspect(&self, opts: &InspectOptions) -> anyhow::Result<()> {
        let object_ids = self.database().enumerate_object_ids()?;
        let total = object_ids.len();
        let jobs = opts.jobs.max(1);

        let mut pending = object_ids.into_iter().enumerate();
        let mut tasks = JoinSet::new();
        let mut in_order = InOrder::new();
        let mut summary = InspectSummary::default();

        loop {
            while tasks.len() + in_order.held() < jobs {
                let Some((position, oid)) = pending.next() else {
                    break;
                };
                let database = self.database().clone();
                tasks.spawn_blocking(move || (position, decode_object(&database, oid)));
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            let (position, report) = joined?;

            for report in in_order.push(position, report) {
                self.show_report(&report, opts, &mut summary)?;
            }
        }

        tracing::debug!(total, "decoded loose objects");

        writeln!(
            self.writer(),
            "\n{} objects, {} failed, {} warnings",
            summary.objects,
            summary.failed,
            summary.warnings
        )?;

        Ok(())
    }

    fn show_report(
        &self,
        report: &ObjectReport,
        opts: &InspectOptions,
        summary: &mut InspectSummary,
    ) -> anyhow::Result<()> {
        summary.objects += 1;
        writeln!(self.writer(), "\n[{}]", report.oid)?;

        let decoded = match &report.result {
            Ok(decoded) => decoded,
            Err(err) => {
                summary.failed += 1;
                tracing::warn!(oid = %report.oid, "failed to decode object: {err:#}");
                writeln!(self.writer(), "{} {:#}", "error:".red(), err)?;
                return Ok(());
            }
        };

        writeln!(self.writer(), "type: {}", decoded.object.kind().to_string().cyan())?;
        writeln!(self.writer(), "size: {}", decoded.declared_size)?;

        if let Some(warning) = decoded.warning {
            summary.warnings += 1;
            if opts.verify {
                writeln!(self.writer(), "{} {}", "warning:".yellow(), warning)?;
            }
        }

        match &decoded.object {
            ParsedObject::Blob(blob) => {
                writeln!(self.writer(), "--- content ---")?;
                match blob.as_str() {
                    Some(text) => writeln!(self.writer(), "{}", text)?,
                    None => writeln!(self.writer(), "(binary, {} bytes)", blob.len())?,
                }
            }
            ParsedObject::Commit(commit) => {
                self.show_header_record(commit.headers(), commit.message())?;
            }
            ParsedObject::Tag(tag) => {
                self.show_header_record(tag.headers(), tag.message())?;
            }
            ParsedObject::Tree(tree) => {
                writeln!(self.writer(), "--- entries ---")?;
                for entry in tree.entries() {
                    writeln!(self.writer(), "{} {} {}", entry.mode, entry.name, entry.oid)?;
                }
            }
            ParsedObject::Unknown { content, .. } => {
                writeln!(self.writer(), "(unknown type, {} bytes)", content.len())?;
            }
        }

        Ok(())
    }

    fn show_header_record(
        &self,
        headers: &[(String, String)],
        message: &str,
    ) -> anyhow::Result<()> {
        writeln!(self.writer(), "--- headers ---")?;
        for (key, value) in headers {
            writeln!(self.writer(), "{}: {}", key, value)?;
        }
        writeln!(self.writer(), "--- message ---")?;
        writeln!(self.writer(), "{}", message)?;

        Ok(())
    }
}
