use crate::core::duplicate::DuplicateGroup;
use crate::core::image::ImageRecord;
use serde::Serialize;
use std::fmt;

/// Keep/delete recommendation for one duplicate group.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub set: usize,
    pub keep: ImageRecord,
    pub delete: Vec<ImageRecord>,
    pub command: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub sets: Vec<ReportEntry>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

pub fn build_report(groups: &[DuplicateGroup]) -> Report {
    let sets = groups
        .iter()
        .enumerate()
        .map(|(i, group)| ReportEntry {
            set: i + 1,
            keep: group.keep().clone(),
            delete: group.delete().to_vec(),
            command: removal_command(group.delete()),
        })
        .collect();
    Report { sets }
}

/// `rm` invocation naming each record's file as a quoted argument.
pub fn removal_command(records: &[ImageRecord]) -> String {
    let mut command = String::from("rm");
    for record in records {
        command.push(' ');
        command.push_str(&shell_quote(&record.filename));
    }
    command
}

/// Wrap `arg` in double quotes, escaping the characters the shell still
/// interprets inside them.
///
/// `!` triggers history expansion in interactive bash even inside double
/// quotes, so it is spliced in single-quoted between two quoted halves.
pub fn shell_quote(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if c == '!' {
            quoted.push_str("\"'!'\"");
            continue;
        }
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn describe(record: &ImageRecord) -> String {
    format!("{} ({}x{})", record.filename, record.width, record.height)
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delete: Vec<String> = self.delete.iter().map(describe).collect();
        writeln!(f, "SET #{}", self.set)?;
        writeln!(f, "  - KEEP  : {}", describe(&self.keep))?;
        writeln!(f, "  - DELETE: {}", delete.join(", "))?;
        writeln!(f, "  - CMD   : {}", self.command)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sets.is_empty() {
            return writeln!(f, "No duplicate images found.");
        }
        for entry in &self.sets {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}
