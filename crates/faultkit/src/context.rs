//! Source context rendering
//!
//! Given a resolved location, print a bounded window of source lines
//! around the target line. The file named by the location is only a
//! first guess; the renderer walks a fallback chain (default script
//! path, parser-supplied inline text, files named by the rendered
//! traceback) before giving up with an explanatory message.

use crate::fault::{Fault, FaultCategory};
use crate::locate::ResolvedLocation;
use crate::paths::{PathResolver, SourceLines, SourceLookup};
use crate::trace;

/// Width of the `>> 001: ` prefix in front of each rendered source line:
/// two marker characters, a space, three digits, a colon and a space.
pub const PREFIX_WIDTH: usize = 8;

/// One computed window of source lines around a target line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceWindow {
    /// Path shown in the window header.
    pub display_path: String,
    /// Total number of lines in the loaded file.
    pub total_lines: usize,
    /// The rendered rows, clamped to the file.
    pub rows: Vec<WindowRow>,
}

/// A single row of a source window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRow {
    /// 1-based line number.
    pub number: usize,
    /// Line text without its trailing newline.
    pub text: String,
    /// Whether this row is the resolved target line.
    pub is_target: bool,
}

/// Compute the window of lines around `line_no` (1-based), clamped to the
/// file. The result holds at most `2 * radius + 1` rows, exactly one of
/// them the target.
pub fn window(source: &SourceLines, line_no: u32, radius: usize) -> SourceWindow {
    let total = source.lines.len();
    let target = (line_no as usize).saturating_sub(1);
    let start = target.saturating_sub(radius);
    let end = (target + radius + 1).min(total);

    let rows = (start..end)
        .map(|idx| WindowRow {
            number: idx + 1,
            text: source.lines[idx].clone(),
            is_target: idx == target,
        })
        .collect();

    SourceWindow {
        display_path: source.path.clone(),
        total_lines: total,
        rows,
    }
}

/// Renders context blocks for resolved locations.
pub struct ContextRenderer<'a> {
    resolver: &'a PathResolver,
    radius: usize,
}

impl<'a> ContextRenderer<'a> {
    /// Create a renderer with the given context radius.
    pub fn new(resolver: &'a PathResolver, radius: usize) -> Self {
        Self { resolver, radius }
    }

    /// Render the context block for a fault into `out`.
    ///
    /// Every branch emits something; no branch errors. The fallback
    /// order is: the resolved file, the parser's inline text (syntax
    /// faults only), files named by the rendered traceback, and the
    /// configured script's default path.
    pub fn render(&self, fault: &Fault, location: &ResolvedLocation, out: &mut String) {
        let Some(line_no) = location.line else {
            out.push_str("--- Code Context ---\n");
            out.push_str("No line information reported for this fault.\n");
            return;
        };

        let mut resolved_name = location.file.clone();
        let mut loaded = self.resolver.load(resolved_name.as_deref()).found();

        // The parser already gave us the offending line for syntax
        // faults; render it directly rather than touching storage.
        if loaded.is_none() && fault.category == FaultCategory::Syntax {
            if let (Some(column), Some(text)) = (location.column, &location.inline_text) {
                self.render_inline(resolved_name.as_deref(), line_no, column, text, out);
                return;
            }
        }

        let default_path = self.resolver.script_default_path();
        if loaded.is_none() && resolved_name.is_none() {
            resolved_name = Some(default_path.clone());
            loaded = self.resolver.load(Some(default_path.as_str())).found();
        }

        if loaded.is_none() {
            loaded = self.load_from_trace_frames(fault, resolved_name.as_deref(), out);
        }

        if loaded.is_none() && resolved_name.as_deref() != Some(default_path.as_str()) {
            if let Some(source) = self.resolver.load(Some(default_path.as_str())).found() {
                out.push_str("--- Code Context ---\n");
                out.push_str(&format!(
                    "Unable to open {}. Showing context from {} instead.\n",
                    resolved_name.as_deref().unwrap_or("dynamic source"),
                    default_path
                ));
                loaded = Some(source);
            }
        }

        let Some(source) = loaded else {
            let best_known = resolved_name.unwrap_or(default_path);
            out.push_str("--- Code Context ---\n");
            out.push_str(&format!(
                "Unable to open {} to display source context.\n",
                best_known
            ));
            return;
        };

        self.render_window(&source, line_no, out);
    }

    /// Scan the rendered traceback, innermost frame first, for a source
    /// file other than the one already tried.
    fn load_from_trace_frames(
        &self,
        fault: &Fault,
        already_tried: Option<&str>,
        out: &mut String,
    ) -> Option<SourceLines> {
        let text = fault.trace_text.as_deref()?;
        for (name, _) in trace::parse_trace_locations(text).iter().rev() {
            if Some(name.as_str()) == already_tried {
                continue;
            }
            if let SourceLookup::Found(source) = self.resolver.load(Some(name)) {
                out.push_str("--- Code Context ---\n");
                out.push_str(&format!(
                    "Unable to open {}. Showing context from {} instead.\n",
                    already_tried.unwrap_or("dynamic source"),
                    source.path
                ));
                return Some(source);
            }
        }
        None
    }

    /// Render the parser-supplied source line with a caret under the
    /// offending column. This path never touches the filesystem.
    fn render_inline(
        &self,
        file: Option<&str>,
        line_no: u32,
        column: u32,
        text: &str,
        out: &mut String,
    ) {
        let display = file.unwrap_or("parser input");
        out.push_str(&format!("--- Code Context ({}:{}) ---\n", display, line_no));
        out.push_str(&format!(
            ">> {:03}: {}\n",
            line_no,
            text.trim_end_matches(['\r', '\n'])
        ));
        let caret_offset = PREFIX_WIDTH + column as usize - 1;
        out.push_str(&" ".repeat(caret_offset));
        out.push_str("^\n");
    }

    fn render_window(&self, source: &SourceLines, line_no: u32, out: &mut String) {
        let total = source.lines.len();
        if total == 0 {
            out.push_str("--- Code Context ---\n");
            out.push_str(&format!("The file {} is empty.\n", source.path));
            return;
        }
        if line_no < 1 || line_no as usize > total {
            out.push_str(&format!(
                "--- Code Context ({}:{}) ---\n",
                source.path, line_no
            ));
            out.push_str(&format!(
                "Reported line {} is outside the range of this file (1-{}).\n",
                line_no, total
            ));
            return;
        }

        let window = window(source, line_no, self.radius);
        out.push_str(&format!(
            "--- Code Context ({}:{}) ---\n",
            window.display_path, line_no
        ));
        for row in &window.rows {
            let marker = if row.is_target { ">>" } else { "  " };
            out.push_str(&format!("{} {:03}: {}\n", marker, row.number, row.text));
        }
    }
}
