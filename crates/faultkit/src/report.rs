//! Diagnosis orchestration
//!
//! One fault in, one fixed-order report out: category banner, guidance,
//! the available-files dump for import faults, the resolved location,
//! a timestamp, the source context block, and finally the raw traceback.
//! Each step is best-effort; a step with nothing to say never suppresses
//! the steps after it.

use std::sync::Arc;

use chrono::Local;

use crate::config::LaunchConfig;
use crate::context::ContextRenderer;
use crate::fault::{Fault, FaultCategory};
use crate::fs::FileSystem;
use crate::guidance;
use crate::locate::{Locator, ResolvedLocation};
use crate::logbook::{LogRecord, LogWriter};
use crate::paths::PathResolver;

/// A completed diagnosis: the rendered report plus what was resolved.
///
/// `text` is exactly what a console should show, in order. The log record
/// has already been written (or declined) by the time this exists.
#[derive(Debug, Clone)]
pub struct Diagnosis {
    /// Full report text.
    pub text: String,
    /// The fault's category.
    pub category: FaultCategory,
    /// The reconciled location the context block was rendered from.
    pub location: ResolvedLocation,
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Run the full diagnosis sequence for one fault.
pub(crate) fn diagnose(fs: &Arc<dyn FileSystem>, config: &LaunchConfig, fault: &Fault) -> Diagnosis {
    tracing::debug!(category = fault.category.title(), "diagnosing fault");

    let resolver = PathResolver::new(Arc::clone(fs), config);
    let locator = Locator::new(config, &resolver);
    let mut out = String::new();

    out.push_str(fault.category.title());
    out.push('\n');
    guidance::render_advice(fault.category, &mut out);
    if fault.category == FaultCategory::Import {
        guidance::render_available_files(fs.as_ref(), config, &mut out);
    }

    let location = locator.locate(fault);
    if location.file.is_some() || location.line.is_some() {
        out.push_str(&format!(
            "Location: {}:{}\n",
            location.file.as_deref().unwrap_or("unknown"),
            location
                .line
                .map(|line| line.to_string())
                .unwrap_or_else(|| "?".to_string()),
        ));
    }
    let stamp = timestamp();
    out.push_str(&format!("Timestamp: {}\n", stamp));

    ContextRenderer::new(&resolver, config.context_radius).render(fault, &location, &mut out);

    out.push_str("--- Traceback ---\n");
    match &fault.trace_text {
        Some(text) => {
            out.push_str(text);
            if !text.ends_with('\n') {
                out.push('\n');
            }
        }
        None => out.push_str("(no traceback text available)\n"),
    }

    let record = LogRecord {
        stamp,
        title: fault.category.title(),
        source: format!(
            "{}:{}",
            location.file.as_deref().unwrap_or("?"),
            location
                .line
                .map(|line| line.to_string())
                .unwrap_or_else(|| "?".to_string()),
        ),
        message: fault.args_summary(),
        trace_text: fault.trace_text.clone().unwrap_or_default(),
    };
    LogWriter::new(Arc::clone(fs), config.log_file.clone(), config.max_log_bytes).write(&record);

    Diagnosis {
        text: out,
        category: fault.category,
        location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::StackFrame;
    use crate::fs::InMemoryFs;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn device() -> Arc<InMemoryFs> {
        let fs = InMemoryFs::new();
        let script: String = (1..=20)
            .map(|n| format!("line {}\n", n))
            .collect();
        fs.add_file("/py_scripts/script.py", &script);
        fs.add_file("/py_scripts/v02.py", "x = 1\ny = undefined\n");
        fs.create_dir("/lib");
        Arc::new(fs)
    }

    fn diagnose_on(fs: Arc<InMemoryFs>, fault: &Fault) -> Diagnosis {
        let fs: Arc<dyn FileSystem> = fs;
        diagnose(&fs, &LaunchConfig::default(), fault)
    }

    #[test]
    fn test_report_section_order() {
        let fault = Fault::new(FaultCategory::Name)
            .with_message("name 'undefined' isn't defined")
            .with_frame(StackFrame::new("main.py", Some(344)))
            .with_frame(StackFrame::new("v02.py", Some(2)))
            .with_trace("Traceback (most recent call last):\n  File \"main.py\", line 344, in <module>\n  File \"v02.py\", line 2, in <module>\nNameError: name 'undefined' isn't defined\n");
        let diagnosis = diagnose_on(device(), &fault);

        let banner = diagnosis.text.find("NAME ERROR").unwrap();
        let advice = diagnosis.text.find("Raised when a local or global name").unwrap();
        let location = diagnosis.text.find("Location: v02.py:2").unwrap();
        let stamp = diagnosis.text.find("Timestamp: ").unwrap();
        let context = diagnosis.text.find("--- Code Context").unwrap();
        let trace = diagnosis.text.find("--- Traceback ---").unwrap();
        assert!(banner < advice && advice < location && location < stamp);
        assert!(stamp < context && context < trace);
    }

    #[test]
    fn test_end_to_end_window_for_name_fault() {
        // name fault at script.py:10 in a 20-line file, radius 2:
        // exactly lines 8-12, line 10 marked, zero-padded indices
        let fault = Fault::new(FaultCategory::Name)
            .with_frame(StackFrame::new("script.py", Some(10)));
        let diagnosis = diagnose_on(device(), &fault);

        let context: Vec<&str> = diagnosis
            .text
            .lines()
            .skip_while(|line| !line.starts_with("--- Code Context"))
            .take_while(|line| !line.starts_with("--- Traceback"))
            .collect();
        assert_eq!(
            context,
            vec![
                "--- Code Context (/py_scripts/script.py:10) ---",
                "   008: line 8",
                "   009: line 9",
                ">> 010: line 10",
                "   011: line 11",
                "   012: line 12",
            ]
        );
    }

    #[test]
    fn test_import_fault_includes_available_files() {
        let fault = Fault::new(FaultCategory::Import).with_message("no module named 'servo'");
        let diagnosis = diagnose_on(device(), &fault);
        assert!(diagnosis.text.contains("--- Available Files ---"));
        assert!(diagnosis.text.contains("/py_scripts: script.py, v02.py"));
        assert!(diagnosis.text.contains("/lib: <empty>"));
    }

    #[test]
    fn test_non_import_fault_has_no_file_listing() {
        let fault = Fault::new(FaultCategory::Type).with_message("len of int");
        let diagnosis = diagnose_on(device(), &fault);
        assert!(!diagnosis.text.contains("--- Available Files ---"));
    }

    #[test]
    fn test_missing_trace_text_is_noted() {
        let fault = Fault::new(FaultCategory::Runtime);
        let diagnosis = diagnose_on(device(), &fault);
        assert!(diagnosis.text.contains("--- Traceback ---\n(no traceback text available)\n"));
    }

    #[test]
    fn test_diagnosis_writes_log_record() {
        let fs = device();
        let fault = Fault::new(FaultCategory::Name)
            .with_message("name 'undefined' isn't defined")
            .with_frame(StackFrame::new("v02.py", Some(2)))
            .with_trace("NameError: name 'undefined' isn't defined\n");
        diagnose_on(fs.clone(), &fault);

        let log =
            String::from_utf8(fs.read_file(Path::new("/error_log.txt")).unwrap()).unwrap();
        assert!(log.contains("Type: NAME ERROR"));
        assert!(log.contains("Source: v02.py:2"));
        assert!(log.contains("Message: (\"name 'undefined' isn't defined\",)"));
        assert!(log.contains("Traceback:\nNameError"));
    }

    #[test]
    fn test_unwritable_log_does_not_break_diagnosis() {
        let fs = device();
        let config = LaunchConfig {
            // a directory, so every open fails
            log_file: "/py_scripts".to_string(),
            ..LaunchConfig::default()
        };
        let fault = Fault::new(FaultCategory::Value).with_message("bad literal");
        let dyn_fs: Arc<dyn FileSystem> = fs;
        let diagnosis = diagnose(&dyn_fs, &config, &fault);
        assert!(diagnosis.text.contains("VALUE ERROR"));
    }
}
