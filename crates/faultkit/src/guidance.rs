//! Guidance text and available-files listing
//!
//! A static lookup from category to advice lines, written for students
//! reading a classroom console. Import faults additionally dump what is
//! actually stored on the device, since the usual cause is a file that
//! never made it onto the board.

use std::path::Path;

use crate::config::LaunchConfig;
use crate::fault::FaultCategory;
use crate::fs::FileSystem;

/// Advice lines for a category.
pub fn advice(category: FaultCategory) -> &'static [&'static str] {
    match category {
        FaultCategory::Import => &[
            "Raised when the import statement has trouble trying to load a library or module. A common issue is that the module does not exist.",
            "Check that the module/import exists in MicroPython or that you have added the library to the 'lib' folder.",
            "Next step: Confirm the script is stored under /py_scripts or /lib and that the configured script name matches the file.",
        ],
        FaultCategory::Name => &[
            "Raised when a local or global name is not found. This is usually a typo in the name of a variable, method or function.",
            "Check the names of all variables, methods and functions have been typed correctly.",
            "Next step: Compare the highlighted context line with the variable/function definitions to locate the mismatch.",
        ],
        FaultCategory::Syntax => &[
            "Raised when the parser encounters a syntax error. This may be caused by a typo in the code.",
            "Check the white space, colons, brackets and other syntax elements are correct in the code.",
            "Next step: Fix the syntax around the highlighted line, then re-run the program.",
        ],
        FaultCategory::Type => &[
            "Raised when an operation or function is applied to an object of inappropriate type. The associated value is a string giving details about the type mismatch.",
            "Check you are performing the correct processing for the data type.",
            "Next step: Inspect the variables used on the highlighted line and ensure they have the expected data type.",
        ],
        FaultCategory::Value => &[
            "Raised when a built-in operation or function receives an argument that has the right type but an inappropriate value.",
            "Next step: Validate the values being passed to the function on the highlighted line before calling it.",
        ],
        FaultCategory::Os => &[
            "This is a system error catch all.",
            "You may want to check the error code or take this error to your teacher.",
            "Next step: Note the error code, verify any file paths, and retry after checking the hardware connections.",
        ],
        FaultCategory::Runtime => &[
            "This is a runtime catch all error.",
            "You may want to check the error code or take this error to your teacher.",
            "Next step: Use the code context and traceback to narrow down what ran just before the crash.",
        ],
        FaultCategory::Unexpected => &[
            "Raised when an error was not specifically handled above.",
            "Next step: Review the code context and traceback to decide which exception type needs its own handler.",
        ],
    }
}

/// Append the advice block for a category to `out`.
pub fn render_advice(category: FaultCategory, out: &mut String) {
    for line in advice(category) {
        out.push_str(line);
        out.push('\n');
    }
}

/// Append the available-files dump to `out`: the script directory, the
/// library directory, and the filesystem root, each listed independently.
/// An unreadable directory gets the `unavailable` marker, an empty one
/// the `<empty>` marker.
pub fn render_available_files(fs: &dyn FileSystem, config: &LaunchConfig, out: &mut String) {
    out.push_str("--- Available Files ---\n");
    for location in [config.script_dir.as_str(), config.lib_dir.as_str(), "/"] {
        match fs.read_dir(Path::new(location)) {
            Err(_) => {
                out.push_str(&format!("{}: unavailable\n", location));
            }
            Ok(entries) if entries.is_empty() => {
                out.push_str(&format!("{}: <empty>\n", location));
            }
            Ok(mut entries) => {
                entries.sort();
                out.push_str(&format!("{}: {}\n", location, entries.join(", ")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFs;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_category_has_advice() {
        for category in [
            FaultCategory::Import,
            FaultCategory::Name,
            FaultCategory::Syntax,
            FaultCategory::Type,
            FaultCategory::Value,
            FaultCategory::Os,
            FaultCategory::Runtime,
            FaultCategory::Unexpected,
        ] {
            assert!(!advice(category).is_empty());
        }
    }

    #[test]
    fn test_listing_markers() {
        let fs = InMemoryFs::new();
        fs.create_dir("/lib");
        fs.add_file("/py_scripts/v02.py", "pass");
        fs.add_file("/py_scripts/v01.py", "pass");
        // note: no /sd directory
        let config = LaunchConfig {
            script_dir: "/sd".to_string(),
            ..LaunchConfig::default()
        };

        let mut out = String::new();
        render_available_files(&fs, &config, &mut out);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "--- Available Files ---");
        assert_eq!(lines[1], "/sd: unavailable");
        assert_eq!(lines[2], "/lib: <empty>");
        assert_eq!(lines[3], "/: lib, py_scripts");
    }

    #[test]
    fn test_listing_entries_are_sorted() {
        let fs = InMemoryFs::new();
        fs.add_file("/py_scripts/zeta.py", "pass");
        fs.add_file("/py_scripts/alpha.py", "pass");
        fs.create_dir("/lib");
        let config = LaunchConfig::default();

        let mut out = String::new();
        render_available_files(&fs, &config, &mut out);
        assert!(out.contains("/py_scripts: alpha.py, zeta.py\n"));
    }
}
