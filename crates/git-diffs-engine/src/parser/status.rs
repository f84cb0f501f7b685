//! Parse `git diff --name-status` and `git diff --numstat` output.

use crate::model::{ChangedFile, FileStatus};
use std::collections::HashMap;

/// Parse `--name-status` output into changed files without statistics.
///
/// Each line is `STATUS\tPATH`, or `R<score>\tOLD\tNEW` for renames.
/// Lines with fewer than two fields are skipped.
pub fn parse_name_status(output: &str) -> Vec<ChangedFile> {
    output.lines().filter_map(parse_name_status_line).collect()
}

fn parse_name_status_line(line: &str) -> Option<ChangedFile> {
    let parts = split_fields(line);
    if parts.len() < 2 {
        if !line.trim().is_empty() {
            log::debug!("Skipping name-status line: {}", line);
        }
        return None;
    }

    let status = FileStatus::from_letter(parts[0].chars().next()?);
    let file = match (status, parts.as_slice()) {
        (FileStatus::Renamed, [_, old, new, ..]) => ChangedFile::renamed(*old, *new),
        _ => ChangedFile::new(status, *parts.last()?),
    };
    Some(file)
}

/// Per-path addition/deletion counts from `--numstat` output.
///
/// Binary files (`-\t-\tpath`) and unparsable counts become 0. Rename
/// notation is resolved to the new path.
pub fn parse_numstat(output: &str) -> HashMap<String, (usize, usize)> {
    let mut stats = HashMap::new();

    for line in output.lines() {
        let mut parts = line.splitn(3, '\t');
        let (Some(adds), Some(dels), Some(path)) = (parts.next(), parts.next(), parts.next())
        else {
            if !line.trim().is_empty() {
                log::debug!("Skipping numstat line: {}", line);
            }
            continue;
        };

        let additions = adds.trim().parse().unwrap_or(0);
        let deletions = dels.trim().parse().unwrap_or(0);
        stats.insert(resolve_rename_path(path.trim()), (additions, deletions));
    }

    stats
}

/// Join name-status records with numstat counts by path.
pub fn parse_changed_files(name_status: &str, numstat: &str) -> Vec<ChangedFile> {
    let stats = parse_numstat(numstat);
    parse_name_status(name_status)
        .into_iter()
        .map(|file| match stats.get(&file.path) {
            Some(&(additions, deletions)) => file.with_stats(additions, deletions),
            None => file,
        })
        .collect()
}

/// Tab separated fields, falling back to whitespace when the line has no tabs.
fn split_fields(line: &str) -> Vec<&str> {
    if line.contains('\t') {
        line.split('\t').filter(|p| !p.is_empty()).collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// Resolve numstat rename notation to the new path:
/// `old => new` and `dir/{old => new}/file`.
fn resolve_rename_path(path: &str) -> String {
    if let (Some(open), Some(close)) = (path.find('{'), path.find('}')) {
        if open < close {
            let inner = &path[open + 1..close];
            if let Some((_, new)) = inner.split_once(" => ") {
                let joined = format!("{}{}{}", &path[..open], new, &path[close + 1..]);
                return joined.replace("//", "/");
            }
        }
    }

    match path.split_once(" => ") {
        Some((_, new)) => new.to_string(),
        None => path.to_string(),
    }
}
