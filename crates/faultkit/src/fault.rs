//! Fault model and classification
//!
//! The runtime hands the launcher one opaque fault per failed run. The
//! pipeline never probes attributes dynamically: a fault is classified
//! once into a fixed category, and its positional arguments are a closed
//! set of shapes the location extractor knows how to read.

use serde::{Deserialize, Serialize};

/// Coarse category a raised fault is classified into.
///
/// Drives the guidance text, the banner title, and one reconciliation
/// rule (syntax faults trust the parsed trace over their own attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultCategory {
    /// A module or library failed to load.
    Import,
    /// A name was not found in any scope.
    Name,
    /// The parser rejected the source.
    Syntax,
    /// An operation was applied to a value of the wrong type.
    Type,
    /// A value had the right type but an unusable value.
    Value,
    /// An operating-system level failure.
    Os,
    /// A generic runtime failure.
    Runtime,
    /// Anything not covered by the categories above.
    Unexpected,
}

impl FaultCategory {
    /// Banner title printed at the top of a diagnosis.
    pub fn title(&self) -> &'static str {
        match self {
            FaultCategory::Import => "IMPORT ERROR",
            FaultCategory::Name => "NAME ERROR",
            FaultCategory::Syntax => "SYNTAX ERROR",
            FaultCategory::Type => "TYPE ERROR",
            FaultCategory::Value => "VALUE ERROR",
            FaultCategory::Os => "OS ERROR",
            FaultCategory::Runtime => "RUNTIME ERROR",
            FaultCategory::Unexpected => "UNEXPECTED ERROR",
        }
    }

    /// Classify a runtime exception name.
    ///
    /// Subclass names collapse into their handler's category the same way
    /// an except-chain would catch them; unknown names land in
    /// [`FaultCategory::Unexpected`] rather than failing.
    pub fn classify(exception_name: &str) -> Self {
        match exception_name {
            "ImportError" | "ModuleNotFoundError" => FaultCategory::Import,
            "NameError" | "UnboundLocalError" => FaultCategory::Name,
            "SyntaxError" | "IndentationError" | "TabError" => FaultCategory::Syntax,
            "TypeError" => FaultCategory::Type,
            "ValueError" | "UnicodeError" => FaultCategory::Value,
            "OSError" | "IOError" | "FileNotFoundError" | "PermissionError" | "TimeoutError" => {
                FaultCategory::Os
            }
            "RuntimeError" | "NotImplementedError" | "RecursionError" => FaultCategory::Runtime,
            _ => FaultCategory::Unexpected,
        }
    }
}

/// One frame of a fault's ownership chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Source identifier the frame reports, usually a file name.
    pub source: String,
    /// 1-based line number, when the runtime recorded one.
    pub line: Option<u32>,
}

impl StackFrame {
    /// Create a frame.
    pub fn new(source: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }
}

/// One positional argument attached to a fault.
///
/// Replaces the runtime's heterogeneous argument tuple with the shapes
/// the location extractor recognizes. Anything else a runtime might
/// attach is carried as [`FaultArg::Text`] and ignored by extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FaultArg {
    /// Plain message text.
    Text(String),
    /// A bare line number.
    Int(i64),
    /// A trailing (filename, line) pair.
    Location { file: Option<String>, line: i64 },
    /// Parser-supplied context. Only syntax faults legitimately carry it.
    SyntaxContext {
        file: Option<String>,
        line: Option<i64>,
        column: Option<i64>,
        text: Option<String>,
    },
}

impl std::fmt::Display for FaultArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultArg::Text(text) => write!(f, "{:?}", text),
            FaultArg::Int(value) => write!(f, "{}", value),
            FaultArg::Location { file, line } => match file {
                Some(file) => write!(f, "({:?}, {})", file, line),
                None => write!(f, "(None, {})", line),
            },
            FaultArg::SyntaxContext {
                file,
                line,
                column,
                text,
            } => {
                let file = file.as_deref().unwrap_or("?");
                let line = line.map(|l| l.to_string()).unwrap_or_else(|| "?".into());
                let column = column.map(|c| c.to_string()).unwrap_or_else(|| "?".into());
                match text {
                    Some(text) => write!(f, "({:?}, {}, {}, {:?})", file, line, column, text),
                    None => write!(f, "({:?}, {}, {})", file, line, column),
                }
            }
        }
    }
}

/// A fault raised by the supervised script, as handed over by the runtime.
///
/// Read-only to the diagnosis pipeline. Serializable so a fault captured
/// on a device can be replayed later through the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    /// Classified category.
    pub category: FaultCategory,
    /// Primary message, when the runtime supplied one.
    #[serde(default)]
    pub message: Option<String>,
    /// Positional arguments in their original order.
    #[serde(default)]
    pub args: Vec<FaultArg>,
    /// Frame chain, oldest caller first.
    #[serde(default)]
    pub frames: Vec<StackFrame>,
    /// Rendered traceback text, when one was captured.
    #[serde(default)]
    pub trace_text: Option<String>,
}

impl Fault {
    /// Create an empty fault of the given category.
    pub fn new(category: FaultCategory) -> Self {
        Self {
            category,
            message: None,
            args: Vec::new(),
            frames: Vec::new(),
            trace_text: None,
        }
    }

    /// Attach the primary message (also recorded as a text argument).
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.args.push(FaultArg::Text(message.clone()));
        self.message = Some(message);
        self
    }

    /// Attach a positional argument.
    pub fn with_arg(mut self, arg: FaultArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Append a stack frame (oldest caller first).
    pub fn with_frame(mut self, frame: StackFrame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Attach the rendered traceback text.
    pub fn with_trace(mut self, text: impl Into<String>) -> Self {
        self.trace_text = Some(text.into());
        self
    }

    /// Summary of the positional arguments for the log record, in the
    /// runtime's tuple notation.
    pub fn args_summary(&self) -> Option<String> {
        if self.args.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.args.iter().map(|arg| arg.to_string()).collect();
        if parts.len() == 1 {
            Some(format!("({},)", parts[0]))
        } else {
            Some(format!("({})", parts.join(", ")))
        }
    }
}
