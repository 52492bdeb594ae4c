//! Traceback text utilities
//!
//! Rendered tracebacks are the lowest-common-denominator record a device
//! produces. This module pulls `File "<name>", line <N>` entries back out
//! of that text for the location extractor and the context renderer, and
//! can rebuild a whole [`Fault`] from a captured traceback for replay.

use crate::error::{Error, Result};
use crate::fault::{Fault, FaultCategory, StackFrame};

const FILE_PREFIX: &str = "File \"";
const LINE_MARKER: &str = ", line ";

/// All `File "<name>", line <N>` entries in `text`, in order of
/// appearance (outermost first). Malformed entries are skipped; an entry
/// whose line number does not parse is kept with no line.
pub fn parse_trace_locations(text: &str) -> Vec<(String, Option<u32>)> {
    let mut found = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        let Some(rest) = line.strip_prefix(FILE_PREFIX) else {
            continue;
        };
        let Some(quote) = rest.find('"') else {
            continue;
        };
        let name = &rest[..quote];
        if name.is_empty() {
            continue;
        }
        let after = &rest[quote + 1..];
        let Some(marker) = after.find(LINE_MARKER) else {
            continue;
        };
        let remainder = &after[marker + LINE_MARKER.len()..];
        let digits = remainder.split(',').next().unwrap_or("").trim();
        found.push((name.to_string(), digits.parse::<u32>().ok()));
    }

    found
}

/// The innermost (last) parsed entry, the one closest to the fault.
pub fn last_trace_location(text: &str) -> Option<(String, Option<u32>)> {
    parse_trace_locations(text).into_iter().next_back()
}

/// The final `Name: message` line of a rendered traceback, split into the
/// exception name and the optional message.
fn final_exception_line(text: &str) -> Option<(String, Option<String>)> {
    let line = text
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with("Traceback (")
                && !line.starts_with(FILE_PREFIX)
        })
        .next_back()?;

    let (name, message) = match line.split_once(':') {
        Some((name, message)) => (name.trim(), Some(message.trim())),
        None => (line, None),
    };
    if name.is_empty() || name.contains(' ') {
        return None;
    }
    Some((
        name.to_string(),
        message.filter(|m| !m.is_empty()).map(String::from),
    ))
}

impl Fault {
    /// Rebuild a fault from a captured textual traceback.
    ///
    /// Frames come from the parsed `File` entries and the category from
    /// the exception name on the final line. The original text is kept as
    /// the fault's trace text, so a replayed diagnosis renders the same
    /// traceback block a live one would.
    pub fn from_trace_text(text: &str) -> Result<Self> {
        let locations = parse_trace_locations(text);
        let exception = final_exception_line(text);
        if locations.is_empty() && exception.is_none() {
            return Err(Error::Replay(
                "text contains no traceback frames or exception line".to_string(),
            ));
        }

        let (category, message) = match exception {
            Some((name, message)) => (FaultCategory::classify(&name), message),
            None => (FaultCategory::Unexpected, None),
        };

        let mut fault = Fault::new(category);
        if let Some(message) = message {
            fault = fault.with_message(message);
        }
        for (source, line) in locations {
            fault = fault.with_frame(StackFrame::new(source, line));
        }
        Ok(fault.with_trace(text))
    }
}
