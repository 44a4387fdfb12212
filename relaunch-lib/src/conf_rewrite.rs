//! Line-level edits to DOSBox configuration files.
//!
//! Files are never edited in place. Each rewrite streams the original into a
//! sibling temp file, then removes the original and renames the temp file
//! over it. Line endings are carried over unchanged.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const TEMP_EXTENSION: &str = ".tmp";

const AUTOEXEC_SECTION: &str = "[autoexec]";
const SDL_SECTION: &str = "[sdl]";
const DOSBOX_SECTION: &str = "[dosbox]";

/// Matches both `mount` and `imgmount` commands.
const MOUNT_COMMAND: &str = "mount";
const RELATIVE_PARENT: &str = "..";

const FULLSCREEN_ON: &str = "fullscreen=true";
const FULLSCREEN_OFF: &str = "fullscreen=false";

/// Whether the file has an `[autoexec]` section (case-insensitive).
///
/// Unreadable files are reported as not matching.
pub fn is_launch_script_file(path: &Path) -> bool {
    contains_sections(path, &[AUTOEXEC_SECTION])
}

/// Whether the file has both an `[sdl]` and a `[dosbox]` section, in any
/// order (case-insensitive).
pub fn is_runtime_settings_file(path: &Path) -> bool {
    contains_sections(path, &[SDL_SECTION, DOSBOX_SECTION])
}

/// Replace every `..` in `command` with the text of `base`.
///
/// This is a plain substring substitution, not path resolution.
pub fn resolve_relative_paths(command: &str, base: &Path) -> String {
    command.replace(RELATIVE_PARENT, &base.to_string_lossy())
}

/// Resolve `..` against `base` on every mount/imgmount line of a launch
/// script. Returns the number of lines changed.
pub fn rewrite_launch_script(path: &Path, base: &Path) -> io::Result<usize> {
    let base = base.as_os_str().as_encoded_bytes();
    let changed = rewrite_lines(path, |line| {
        let mentions_mount = contains_bytes(&line.to_ascii_lowercase(), MOUNT_COMMAND.as_bytes());
        (mentions_mount && contains_bytes(line, RELATIVE_PARENT.as_bytes()))
            .then(|| replace_bytes(line, RELATIVE_PARENT.as_bytes(), base))
    })?;
    log::debug!("Resolved mount paths on {} line(s) of {}", changed, path.display());
    Ok(changed)
}

/// Turn `fullscreen=true` into `fullscreen=false`. Returns the number of
/// lines changed.
pub fn disable_fullscreen(path: &Path) -> io::Result<usize> {
    let changed = rewrite_lines(path, |line| {
        contains_bytes(line, FULLSCREEN_ON.as_bytes())
            .then(|| replace_bytes(line, FULLSCREEN_ON.as_bytes(), FULLSCREEN_OFF.as_bytes()))
    })?;
    log::debug!("Disabled fullscreen on {} line(s) of {}", changed, path.display());
    Ok(changed)
}

/// First free temp path beside `path`: `<path>.tmp`, then `<path>.tmp2`,
/// `<path>.tmp3`, and so on.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let with_suffix = |suffix: &str| {
        let mut name = OsString::from(path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    };

    let first = with_suffix(TEMP_EXTENSION);
    if !first.exists() {
        return first;
    }
    (2u32..)
        .map(|n| with_suffix(&format!("{TEMP_EXTENSION}{n}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

fn contains_sections(path: &Path, sections: &[&str]) -> bool {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            log::debug!("Cannot open {}: {}", path.display(), e);
            return false;
        }
    };

    let mut reader = BufReader::new(file);
    let mut found = vec![false; sections.len()];
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return false,
            Ok(_) => {}
            Err(e) => {
                log::debug!("Stopped reading {}: {}", path.display(), e);
                return false;
            }
        }
        let line = String::from_utf8_lossy(&buf).to_lowercase();
        for (seen, section) in found.iter_mut().zip(sections) {
            *seen |= line.contains(section);
        }
        if found.iter().all(|&seen| seen) {
            return true;
        }
    }
}

/// Stream `path` through `edit` into a temp file, then swap it into place.
///
/// `edit` sees each line without its ending and returns the replacement, or
/// `None` to keep it. Lines are raw bytes; no encoding is assumed.
fn rewrite_lines(path: &Path, edit: impl FnMut(&[u8]) -> Option<Vec<u8>>) -> io::Result<usize> {
    let tmp_path = temp_path_for(path);
    let changed = match write_edited(path, &tmp_path, edit) {
        Ok(n) => n,
        Err(e) => {
            if tmp_path.exists() {
                let _ = fs::remove_file(&tmp_path);
            }
            return Err(e);
        }
    };

    fs::remove_file(path)?;
    fs::rename(&tmp_path, path)?;
    Ok(changed)
}

fn write_edited(
    source: &Path,
    target: &Path,
    mut edit: impl FnMut(&[u8]) -> Option<Vec<u8>>,
) -> io::Result<usize> {
    let mut reader = BufReader::new(File::open(source)?);
    let mut writer = BufWriter::new(
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(target)?,
    );

    let mut changed = 0;
    let mut buf = Vec::new();
    while reader.read_until(b'\n', &mut buf)? > 0 {
        let (body, ending) = split_line_ending(&buf);
        match edit(body) {
            Some(replacement) => {
                writer.write_all(&replacement)?;
                changed += 1;
            }
            None => writer.write_all(body)?,
        }
        writer.write_all(ending)?;
        buf.clear();
    }

    let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()?;
    Ok(changed)
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Replace every non-overlapping occurrence of `from`, scanning left to right.
fn replace_bytes(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while !rest.is_empty() {
        if rest.starts_with(from) {
            out.extend_from_slice(to);
            rest = &rest[from.len()..];
        } else {
            out.push(rest[0]);
            rest = &rest[1..];
        }
    }
    out
}

fn split_line_ending(line: &[u8]) -> (&[u8], &[u8]) {
    let cut = if line.ends_with(b"\r\n") {
        2
    } else if line.ends_with(b"\n") {
        1
    } else {
        0
    };
    line.split_at(line.len() - cut)
}

#[cfg(test)]
#[path = "tests/conf_rewrite_tests.rs"]
mod tests;
