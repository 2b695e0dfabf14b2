use super::{Instruction, ParsedRecipe};
use crate::error::LintError;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static HEREDOC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<<(-?)["']?([A-Za-z_][A-Za-z0-9_]*)["']?"#).expect("heredoc pattern is valid")
});

/// File name looked up when a directory is given instead of a file.
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";

static VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::?-([^}]*))?\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("variable pattern is valid")
});

/// Line-oriented Dockerfile reader producing a [`ParsedRecipe`].
pub struct DockerfileParser;

struct PendingHeredoc {
    delimiter: String,
    strip_tabs: bool,
    instruction: Instruction,
}

impl DockerfileParser {
    /// Read and parse a Dockerfile from disk. A directory resolves to the
    /// `Dockerfile` inside it.
    pub fn parse_file(path: &Path) -> Result<ParsedRecipe, LintError> {
        let resolved: PathBuf = if path.is_dir() {
            path.join(DEFAULT_DOCKERFILE)
        } else {
            path.to_path_buf()
        };
        if !resolved.is_file() {
            return Err(LintError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(&resolved).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LintError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LintError::Io {
                    path: resolved.clone(),
                    source,
                }
            }
        })?;
        let recipe = Self::parse(&content)?;
        debug!(
            path = %resolved.display(),
            base_image = %recipe.base_image,
            stages = recipe.stage_count(),
            instructions = recipe.instructions.len(),
            "parsed Dockerfile"
        );
        Ok(recipe)
    }

    /// Parse Dockerfile content.
    pub fn parse(content: &str) -> Result<ParsedRecipe, LintError> {
        let instructions = Self::parse_instructions(content);
        let base_image = resolve_base_image(&instructions)?;
        Ok(ParsedRecipe {
            base_image,
            instructions,
        })
    }

    /// Split content into instructions without resolving the base image.
    pub fn parse_instructions(content: &str) -> Vec<Instruction> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let escape = escape_char(content);
        let mut instructions = Vec::new();
        let mut continuation = String::new();
        let mut line_start = 0;
        let mut heredoc: Option<PendingHeredoc> = None;

        for (i, line) in content.lines().enumerate() {
            if let Some(pending) = heredoc.as_mut() {
                let candidate = if pending.strip_tabs {
                    line.trim_start_matches('\t')
                } else {
                    line
                };
                if candidate.trim_end() == pending.delimiter {
                    if let Some(done) = heredoc.take() {
                        instructions.push(done.instruction);
                    }
                } else {
                    pending.instruction.value.push('\n');
                    pending.instruction.value.push_str(line);
                }
                continue;
            }

            let trimmed = line.trim();

            // Comments are dropped even in the middle of a continuation.
            if trimmed.starts_with('#') || trimmed.is_empty() {
                continue;
            }

            if continuation.is_empty() {
                line_start = i + 1;
            }

            if let Some(stripped) = trimmed.strip_suffix(escape) {
                continuation.push_str(stripped.trim_end());
                continuation.push(' ');
                continue;
            }

            let full_line = if continuation.is_empty() {
                trimmed.to_string()
            } else {
                continuation.push_str(trimmed);
                std::mem::take(&mut continuation)
            };

            let instruction = split_directive(&full_line, line_start);

            if opens_heredoc(&instruction.instruction) {
                if let Some((strip_tabs, delimiter)) = heredoc_marker(&instruction.value) {
                    heredoc = Some(PendingHeredoc {
                        strip_tabs,
                        delimiter,
                        instruction,
                    });
                    continue;
                }
            }

            instructions.push(instruction);
        }

        // A dangling continuation or unterminated heredoc still counts as an
        // instruction.
        if !continuation.trim().is_empty() {
            instructions.push(split_directive(continuation.trim(), line_start));
        }
        if let Some(pending) = heredoc {
            instructions.push(pending.instruction);
        }

        instructions
    }
}

fn split_directive(full_line: &str, line: usize) -> Instruction {
    match full_line.split_once(char::is_whitespace) {
        Some((instr, args)) => Instruction {
            instruction: instr.to_uppercase(),
            value: args.trim().to_string(),
            line,
        },
        None => Instruction {
            instruction: full_line.to_uppercase(),
            value: String::new(),
            line,
        },
    }
}

fn opens_heredoc(keyword: &str) -> bool {
    matches!(keyword, "RUN" | "COPY" | "ADD")
}

/// Find a `<<WORD` / `<<-WORD` heredoc opener. It must start a shell word
/// and sit outside quotes and `$((...))` arithmetic; `<<<` is a here-string.
fn heredoc_marker(value: &str) -> Option<(bool, String)> {
    let bytes = value.as_bytes();
    let mut in_single = false;
    let mut in_double = false;
    let mut arith_depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_single {
            in_single = b != b'\'';
            i += 1;
            continue;
        }
        if arith_depth > 0 {
            match b {
                b'(' => arith_depth += 1,
                b')' => arith_depth -= 1,
                _ => {}
            }
            i += 1;
            continue;
        }
        match b {
            b'\\' => {
                i += 2;
                continue;
            }
            b'"' => in_double = !in_double,
            b'\'' if !in_double => in_single = true,
            b'$' if value[i..].starts_with("$((") => {
                arith_depth = 2;
                i += 3;
                continue;
            }
            b'<' if !in_double => {
                let word_start = i == 0 || bytes[i - 1].is_ascii_whitespace();
                let rest = &value[i..];
                if word_start && !rest.starts_with("<<<") {
                    if let Some(caps) = HEREDOC_RE.captures(rest) {
                        return Some((&caps[1] == "-", caps[2].to_string()));
                    }
                }
                // Skip the whole run of '<' so "<<<" is never re-read as "<<".
                while i < bytes.len() && bytes[i] == b'<' {
                    i += 1;
                }
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Honour a leading `# escape=` parser directive; the default is `\`.
fn escape_char(content: &str) -> char {
    for line in content.lines() {
        let trimmed = line.trim();
        let Some(comment) = trimmed.strip_prefix('#') else {
            break;
        };
        if let Some((key, value)) = comment.split_once('=') {
            if key.trim().eq_ignore_ascii_case("escape") {
                if let Some(c) = value.trim().chars().next() {
                    return c;
                }
            }
        }
    }
    '\\'
}

/// The base image of the final build stage, with global `ARG` defaults
/// substituted and stage aliases followed back to a real image.
fn resolve_base_image(instructions: &[Instruction]) -> Result<String, LintError> {
    let mut global_args: HashMap<String, String> = HashMap::new();
    let mut stages: HashMap<String, String> = HashMap::new();
    let mut last: Option<String> = None;
    let mut seen_from = false;

    for instr in instructions {
        if instr.is("ARG") && !seen_from {
            for (name, default) in parse_arg(&instr.value) {
                global_args.insert(name, default);
            }
            continue;
        }
        if !instr.is("FROM") {
            continue;
        }
        seen_from = true;

        let mut tokens = instr
            .value
            .split_whitespace()
            .filter(|t| !t.starts_with("--"));
        let image = tokens.next().map(|t| substitute(t, &global_args)).unwrap_or_default();
        if image.is_empty() {
            return Err(LintError::EmptyBaseImage { line: instr.line });
        }

        let resolved = stages
            .get(&image.to_lowercase())
            .cloned()
            .unwrap_or(image);

        if let (Some(kw), Some(alias)) = (tokens.next(), tokens.next()) {
            if kw.eq_ignore_ascii_case("AS") {
                stages.insert(alias.to_lowercase(), resolved.clone());
            }
        }
        last = Some(resolved);
    }

    last.ok_or(LintError::MissingFrom)
}

/// `ARG NAME=default` / `ARG NAME`, possibly several per line.
fn parse_arg(value: &str) -> Vec<(String, String)> {
    value
        .split_whitespace()
        .map(|token| match token.split_once('=') {
            Some((name, default)) => (
                name.to_string(),
                default.trim_matches('"').trim_matches('\'').to_string(),
            ),
            None => (token.to_string(), String::new()),
        })
        .collect()
}

fn substitute(raw: &str, args: &HashMap<String, String>) -> String {
    VAR_RE
        .replace_all(raw, |caps: &regex::Captures| {
            let name = caps.get(1).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            match args.get(name).filter(|v| !v.is_empty()) {
                Some(v) => v.clone(),
                None => caps.get(2).map_or(String::new(), |m| m.as_str().to_string()),
            }
        })
        .into_owned()
}
