//! End-to-end diagnosis tests over the public API
//!
//! These drive the whole pipeline the way the CLI does: a simulated
//! device image in memory, one fault, one report.

use std::path::Path;
use std::sync::Arc;

use faultkit::{
    Fault, FaultArg, FaultCategory, FileSystem, InMemoryFs, LaunchConfig, Launcher, Outcome,
    StackFrame, Supervision,
};
use pretty_assertions::assert_eq;

fn device() -> Arc<InMemoryFs> {
    let fs = InMemoryFs::new();
    let twenty_lines: String = (1..=20).map(|n| format!("line {}\n", n)).collect();
    fs.add_file("/py_scripts/script.py", &twenty_lines);
    fs.add_file("/py_scripts/v02.py", "import servo\n\nservo.begin()\n");
    fs.create_dir("/lib");
    Arc::new(fs)
}

fn launcher(fs: Arc<InMemoryFs>) -> Launcher {
    Launcher::builder().fs(fs).config(LaunchConfig::default()).build()
}

#[test]
fn test_name_fault_window_matches_report_format() {
    let fault = Fault::new(FaultCategory::Name)
        .with_message("name 'sensor' isn't defined")
        .with_frame(StackFrame::new("main.py", Some(344)))
        .with_frame(StackFrame::new("script.py", Some(10)));
    let launcher = launcher(device());

    let Supervision::Diagnosed(diagnosis) =
        launcher.supervise(|_| Outcome::Faulted(fault.clone()))
    else {
        panic!("expected a diagnosis");
    };

    let window: Vec<&str> = diagnosis
        .text
        .lines()
        .skip_while(|line| !line.starts_with("--- Code Context"))
        .take_while(|line| !line.starts_with("--- Traceback"))
        .collect();
    assert_eq!(
        window,
        vec![
            "--- Code Context (/py_scripts/script.py:10) ---",
            "   008: line 8",
            "   009: line 9",
            ">> 010: line 10",
            "   011: line 11",
            "   012: line 12",
        ]
    );
    assert_eq!(
        window.iter().filter(|line| line.starts_with(">>")).count(),
        1
    );
}

#[test]
fn test_syntax_fault_trusts_rendered_trace_over_frames() {
    // The raised object only knows the launcher's frame; the rendered
    // text carries the parser's synthetic frame inside the script.
    let fault = Fault::new(FaultCategory::Syntax)
        .with_message("invalid syntax")
        .with_frame(StackFrame::new("main.py", Some(344)))
        .with_trace(
            "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"v02.py\", line 3\nSyntaxError: invalid syntax\n",
        );
    let launcher = launcher(device());

    let diagnosis = launcher.diagnose(&fault);
    assert_eq!(diagnosis.location.file.as_deref(), Some("v02.py"));
    assert_eq!(diagnosis.location.line, Some(3));
    assert!(diagnosis.text.contains("Location: v02.py:3"));
    assert!(diagnosis.text.contains(">> 003: servo.begin()"));
}

#[test]
fn test_syntax_fault_without_any_file_renders_parser_text() {
    let fs = Arc::new(InMemoryFs::new());
    let launcher = Launcher::builder().fs(fs).build();
    let fault = Fault::new(FaultCategory::Syntax)
        .with_message("invalid syntax")
        .with_arg(FaultArg::SyntaxContext {
            file: None,
            line: Some(1),
            column: Some(8),
            text: Some("if True print('oops')".to_string()),
        })
        .with_arg(FaultArg::Int(1));

    let diagnosis = launcher.diagnose(&fault);
    assert!(diagnosis.text.contains(">> 001: if True print('oops')"));
    // caret lands under column 8, one past the 8-character prefix
    let caret_line = diagnosis
        .text
        .lines()
        .find(|line| line.trim_end() == format!("{}^", " ".repeat(15)))
        .unwrap_or("");
    assert!(!caret_line.is_empty());
}

#[test]
fn test_import_fault_dumps_device_listing() {
    let fault = Fault::new(FaultCategory::Import)
        .with_message("no module named 'servo'")
        .with_frame(StackFrame::new("v02.py", Some(1)));
    let launcher = launcher(device());

    let diagnosis = launcher.diagnose(&fault);
    let text = &diagnosis.text;
    assert!(text.contains("--- Available Files ---"));
    assert!(text.contains("/py_scripts: script.py, v02.py"));
    assert!(text.contains("/lib: <empty>"));
    assert!(text.contains("/: error_log.txt, lib, py_scripts") || text.contains("/: lib, py_scripts"));
}

#[test]
fn test_one_log_record_per_session() {
    let fs = device();
    let launcher = launcher(fs.clone());
    let fault = Fault::new(FaultCategory::Value)
        .with_message("invalid literal")
        .with_frame(StackFrame::new("script.py", Some(4)));

    launcher.diagnose(&fault);
    let first = fs.read_file(Path::new("/error_log.txt")).unwrap();
    launcher.diagnose(&fault);
    let second = fs.read_file(Path::new("/error_log.txt")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_interrupted_run_reports_nothing() {
    let fs = Arc::new(InMemoryFs::new());
    let launcher = Launcher::builder().fs(fs.clone()).build();
    launcher.stop_token().trip();

    let supervision = launcher.supervise(|stop| {
        if stop.is_tripped() {
            Outcome::Cancelled
        } else {
            Outcome::Completed
        }
    });
    assert!(matches!(supervision, Supervision::Interrupted));
    assert!(fs.read_file(Path::new("/error_log.txt")).is_err());
}

#[test]
fn test_fault_without_any_location_still_reports() {
    let launcher = launcher(device());
    let fault = Fault::new(FaultCategory::Runtime);

    let diagnosis = launcher.diagnose(&fault);
    // filename falls back to the configured script's default path
    assert!(diagnosis.text.contains("Location: /py_scripts/v02.py:?"));
    assert!(diagnosis
        .text
        .contains("No line information reported for this fault."));
    assert!(diagnosis.text.contains("--- Traceback ---"));
}

#[test]
fn test_replayed_trace_diagnoses_like_a_live_fault() {
    let trace = "Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"script.py\", line 10, in <module>\nNameError: name 'sensor' isn't defined\n";
    let fault = Fault::from_trace_text(trace).unwrap();
    let launcher = launcher(device());

    let diagnosis = launcher.diagnose(&fault);
    assert_eq!(diagnosis.category, FaultCategory::Name);
    assert!(diagnosis.text.contains("Location: script.py:10"));
    assert!(diagnosis.text.contains(">> 010: line 10"));
    assert!(diagnosis.text.ends_with(trace));
}
