use crate::error::CompileError;

/// One indentation unit in the emitted program.
pub(crate) const INDENT: &str = "    ";

/// Splits a definition template into its one-time and per-iteration sections.
///
/// The one-time section exists only when the template contains both a `# Setup`
/// and a `# Process` marker line, in that order; everything between them is the
/// setup text and everything after the process marker is the iteration text.
/// Without both markers the whole template is per-iteration code. Marker lines
/// themselves are never emitted.
pub(crate) fn split_sections(template: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = template.lines().collect();
    let setup_at = lines.iter().position(|l| l.trim() == "# Setup");
    let process_at = lines.iter().position(|l| l.trim() == "# Process");

    match (setup_at, process_at) {
        (Some(s), Some(p)) if s < p => {
            let setup = lines[s + 1..p].join("\n").trim().to_string();
            let process = lines[p + 1..].join("\n").trim().to_string();
            ((!setup.is_empty()).then_some(setup), process)
        }
        (_, Some(p)) => (None, without_setup_marker(&lines[p + 1..])),
        _ => (None, without_setup_marker(&lines)),
    }
}

/// Drops a stray `# Setup` line from a process-only template (one with no
/// `# Process` marker after it), keeping the never-emit-markers rule intact.
fn without_setup_marker(lines: &[&str]) -> String {
    lines
        .iter()
        .filter(|l| l.trim() != "# Setup")
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// An ordered set of `{token}` -> replacement bindings, applied in a single
/// left-to-right pass.
///
/// The pass never rescans replacement text, so an expansion can not be mistaken
/// for another token. Brace spans that do not name a bound token pass through
/// verbatim, which keeps target-language dict displays and f-string braces
/// intact; a nested opening brace restarts the scan, so `{counter_{id}}`
/// resolves its inner token while the outer braces survive.
#[derive(Debug, Default)]
pub(crate) struct Substitutions {
    bindings: Vec<(String, String)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a token. Rebinding with identical text is a no-op; rebinding with
    /// different text is ambiguous and rejected.
    pub fn bind(&mut self, token: &str, value: impl Into<String>) -> Result<(), CompileError> {
        let value = value.into();
        if let Some((_, existing)) = self.bindings.iter().find(|(t, _)| t == token) {
            if *existing == value {
                return Ok(());
            }
            return Err(CompileError::TokenCollision {
                token: token.to_string(),
            });
        }
        self.bindings.push((token.to_string(), value));
        Ok(())
    }

    fn lookup(&self, token: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
    }

    pub fn apply(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find(['{', '}']) {
                Some(at) if after.as_bytes()[at] == b'}' => {
                    let token = &after[..at];
                    match self.lookup(token) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(token);
                            out.push('}');
                        }
                    }
                    rest = &after[at + 1..];
                }
                Some(at) => {
                    // Inner `{` before any `}`: the outer brace is literal text.
                    out.push('{');
                    out.push_str(&after[..at]);
                    rest = &after[at..];
                }
                None => {
                    out.push('{');
                    out.push_str(after);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Prefixes every non-blank line with `levels` indentation units. Blank lines
/// stay empty so the output carries no trailing whitespace.
pub(crate) fn indent_block(text: &str, levels: usize) -> String {
    let prefix = INDENT.repeat(levels);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
