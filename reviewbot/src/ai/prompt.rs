//! Prompt template loading.
//!
//! The template is a plain Markdown file used verbatim as the system
//! instruction. A missing or blank file is not an error: the built-in
//! minimal instruction keeps the run going.

use std::path::Path;

/// Default template location, relative to the working directory.
pub const DEFAULT_TEMPLATE_PATH: &str = "prompts/review.md";

/// Built-in instruction used when no template file is available.
const BUILT_IN_INSTRUCTIONS: &str = "\
You are a code reviewer. You will receive the aggregated diff of a pull \
request, one `# File:` section per changed file. Review it for bugs, \
risky patterns, and maintainability problems.

Respond with a single JSON object and nothing else:
{\"verdict\": \"findings\" | \"clean\", \"review\": \"<markdown review>\"}

Use \"clean\" only when there is nothing worth flagging.";

/// Load the template at `path`, falling back to the built-in instruction
/// when the file is missing, unreadable, or blank.
pub fn load_template(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            log::warn!(
                "[prompt] template {} is empty, using built-in instructions",
                path.display()
            );
            BUILT_IN_INSTRUCTIONS.to_owned()
        }
        Err(e) => {
            log::warn!(
                "[prompt] could not read template {}: {e}, using built-in instructions",
                path.display()
            );
            BUILT_IN_INSTRUCTIONS.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_template_file_used_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Be terse. Flag only real bugs.").unwrap();

        let template = load_template(file.path());
        assert_eq!(template, "Be terse. Flag only real bugs.");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let template = load_template(Path::new("/nonexistent/prompt.md"));
        assert!(template.contains("verdict"));
    }

    #[test]
    fn test_blank_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "   \n\n  ").unwrap();

        let template = load_template(file.path());
        assert!(template.contains("code reviewer"));
    }
}
