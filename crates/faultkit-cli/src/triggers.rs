//! Sample fault construction
//!
//! One representative fault per category, shaped the way the classroom
//! runtime actually reports them. Students (and tests) use these to see
//! each guidance path without having to break a real script first.

use clap::ValueEnum;
use faultkit::{Fault, FaultArg, FaultCategory, StackFrame};

/// Which sample fault to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TriggerKind {
    Import,
    Name,
    Syntax,
    Type,
    Value,
    Os,
    Runtime,
    Unexpected,
}

impl TriggerKind {
    /// Build the sample fault for this kind.
    pub fn sample(self, script: &str) -> Fault {
        let script_file = format!("{}.py", script);
        match self {
            TriggerKind::Import => Fault::new(FaultCategory::Import)
                .with_message("no module named 'not_a_real_module'")
                .with_frame(StackFrame::new("main.py", Some(344)))
                .with_frame(StackFrame::new(script_file.clone(), Some(1)))
                .with_trace(format!(
                    "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"{}\", line 1, in <module>\nImportError: no module named 'not_a_real_module'\n",
                    script_file
                )),
            TriggerKind::Name => Fault::new(FaultCategory::Name)
                .with_message("name 'undefined_symbol' isn't defined")
                .with_frame(StackFrame::new("main.py", Some(344)))
                .with_frame(StackFrame::new(script_file.clone(), Some(12)))
                .with_trace(format!(
                    "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"{}\", line 12, in <module>\nNameError: name 'undefined_symbol' isn't defined\n",
                    script_file
                )),
            TriggerKind::Syntax => Fault::new(FaultCategory::Syntax)
                .with_message("invalid syntax")
                .with_arg(FaultArg::SyntaxContext {
                    file: Some(script_file.clone()),
                    line: Some(3),
                    column: Some(9),
                    text: Some("if True print('oops')".to_string()),
                })
                .with_frame(StackFrame::new("main.py", Some(344)))
                .with_trace(format!(
                    "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"{}\", line 3\nSyntaxError: invalid syntax\n",
                    script_file
                )),
            TriggerKind::Type => Fault::new(FaultCategory::Type)
                .with_message("object of type 'int' has no len()")
                .with_frame(StackFrame::new("main.py", Some(344)))
                .with_frame(StackFrame::new(script_file.clone(), Some(21)))
                .with_trace(format!(
                    "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"{}\", line 21, in trigger_type_error\nTypeError: object of type 'int' has no len()\n",
                    script_file
                )),
            TriggerKind::Value => Fault::new(FaultCategory::Value)
                .with_message("invalid literal for int() with base 10: 'abc'")
                .with_frame(StackFrame::new("main.py", Some(344)))
                .with_frame(StackFrame::new(script_file.clone(), Some(24)))
                .with_trace(format!(
                    "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"{}\", line 24, in trigger_value_error\nValueError: invalid literal for int() with base 10: 'abc'\n",
                    script_file
                )),
            TriggerKind::Os => Fault::new(FaultCategory::Os)
                .with_arg(FaultArg::Int(2))
                .with_frame(StackFrame::new("main.py", Some(344)))
                .with_frame(StackFrame::new(script_file.clone(), Some(28)))
                .with_trace(format!(
                    "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"{}\", line 28, in trigger_os_error\nOSError: [Errno 2] ENOENT\n",
                    script_file
                )),
            TriggerKind::Runtime => Fault::new(FaultCategory::Runtime)
                .with_message("maximum recursion depth exceeded")
                .with_frame(StackFrame::new("main.py", Some(344)))
                .with_frame(StackFrame::new(script_file.clone(), Some(31)))
                .with_trace(format!(
                    "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"{}\", line 31, in recurse\nRuntimeError: maximum recursion depth exceeded\n",
                    script_file
                )),
            TriggerKind::Unexpected => Fault::new(FaultCategory::Unexpected)
                .with_message("divide by zero")
                .with_frame(StackFrame::new("main.py", Some(344)))
                .with_frame(StackFrame::new(script_file.clone(), Some(35)))
                .with_trace(format!(
                    "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"{}\", line 35, in <module>\nZeroDivisionError: divide by zero\n",
                    script_file
                )),
        }
    }
}
