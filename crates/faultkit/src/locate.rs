//! Error-location resolution
//!
//! Three independent sources can say where a fault happened: the frame
//! chain, the positional arguments, and the rendered traceback text.
//! None of them is reliable on its own — launcher frames shadow script
//! frames, argument shapes vary by category, and the parser reports
//! syntax faults through a synthetic frame only the rendered text shows.
//! `locate` merges all three; `reconcile` holds the override rules.

use crate::config::LaunchConfig;
use crate::fault::{Fault, FaultArg, FaultCategory};
use crate::paths::PathResolver;
use crate::trace;

/// Best single answer for which file and line a fault came from.
///
/// `line` is always 1-based. `column` and `inline_text` are populated
/// only for syntax faults whose parser supplied them directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub inline_text: Option<String>,
}

/// Location candidate read out of a fault's positional arguments.
#[derive(Debug, Default, PartialEq)]
struct ArgLocation {
    file: Option<String>,
    line: Option<u32>,
    column: Option<u32>,
    inline_text: Option<String>,
}

fn positive_line(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|line| *line >= 1)
}

/// First recognizable location shape among the arguments. Text arguments
/// are skipped; an argument list with no location shape yields nothing.
fn arg_location(fault: &Fault) -> ArgLocation {
    for arg in &fault.args {
        match arg {
            FaultArg::Location { file, line } => {
                return ArgLocation {
                    file: file.clone(),
                    line: positive_line(*line),
                    ..ArgLocation::default()
                };
            }
            FaultArg::SyntaxContext {
                file,
                line,
                column,
                text,
            } => {
                return ArgLocation {
                    file: file.clone(),
                    line: line.and_then(positive_line),
                    column: column.and_then(positive_line),
                    inline_text: text.clone(),
                };
            }
            FaultArg::Int(value) => {
                return ArgLocation {
                    line: positive_line(*value),
                    ..ArgLocation::default()
                };
            }
            FaultArg::Text(_) => {}
        }
    }
    ArgLocation::default()
}

/// Resolves fault locations for one launcher configuration.
pub struct Locator {
    launcher_id: String,
    default_path: String,
}

impl Locator {
    /// Create a locator from the launcher configuration.
    pub fn new(config: &LaunchConfig, resolver: &PathResolver) -> Self {
        Self {
            launcher_id: config.launcher_id.clone(),
            default_path: resolver.script_default_path(),
        }
    }

    /// Walk the frame chain, outermost first, for the first frame that is
    /// not the launcher's own. When every frame belongs to the launcher,
    /// the innermost frame is still better than nothing.
    fn frame_location(&self, fault: &Fault) -> (Option<String>, Option<u32>) {
        let mut fallback = (None, None);
        for frame in &fault.frames {
            fallback = (Some(frame.source.clone()), frame.line);
            if frame.source != self.launcher_id {
                return fallback;
            }
        }
        fallback
    }

    /// Merge the three candidate sources into a final location.
    pub fn locate(&self, fault: &Fault) -> ResolvedLocation {
        let (frame_file, frame_line) = self.frame_location(fault);
        let args = arg_location(fault);

        let file = args
            .file
            .or(frame_file)
            .or_else(|| Some(self.default_path.clone()));
        // Frame lines win over argument lines: the chain records where
        // execution actually was, arguments record what was reported.
        let line = frame_line.or(args.line);
        let (column, inline_text) = if fault.category == FaultCategory::Syntax {
            (args.column, args.inline_text)
        } else {
            (None, None)
        };

        let initial = ResolvedLocation {
            file,
            line,
            column,
            inline_text,
        };
        let candidate = fault
            .trace_text
            .as_deref()
            .and_then(trace::last_trace_location);
        self.reconcile(fault.category, initial, candidate)
    }

    /// Fold the trace-text candidate into an initial guess.
    ///
    /// The candidate overrides the guess when (a) the guess is empty,
    /// (b) the candidate names a different non-launcher file, or (c) the
    /// fault is a syntax fault (the parser's synthetic frame in the
    /// rendered text is more reliable than the raised object). Otherwise
    /// the candidate only fills fields the guess left empty.
    pub fn reconcile(
        &self,
        category: FaultCategory,
        mut guess: ResolvedLocation,
        candidate: Option<(String, Option<u32>)>,
    ) -> ResolvedLocation {
        let Some((parsed_file, parsed_line)) = candidate else {
            return guess;
        };

        let empty_guess = guess.file.is_none() && guess.line.is_none();
        let names_other_file =
            parsed_file != self.launcher_id && guess.file.as_deref() != Some(parsed_file.as_str());
        let syntax_trusts_parser = category == FaultCategory::Syntax;

        if empty_guess || names_other_file || syntax_trusts_parser {
            tracing::debug!(
                file = %parsed_file,
                line = ?parsed_line,
                "trace text overrides initial location guess"
            );
            guess.file = Some(parsed_file);
            if parsed_line.is_some() {
                guess.line = parsed_line;
            }
        } else {
            if guess.file.is_none() {
                guess.file = Some(parsed_file);
            }
            if guess.line.is_none() {
                guess.line = parsed_line;
            }
        }
        guess
    }
}
