pub mod parser;

use serde::{Deserialize, Serialize};

/// One parsed Dockerfile directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Upper-cased keyword, e.g. `FROM`, `USER`, `RUN`.
    pub instruction: String,
    /// Raw argument text with line continuations joined.
    pub value: String,
    /// 1-based line where the directive starts.
    #[serde(default)]
    pub line: usize,
}

impl Instruction {
    pub fn new(instruction: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            value: value.into(),
            line: 0,
        }
    }

    pub fn is(&self, keyword: &str) -> bool {
        self.instruction == keyword
    }
}

/// The in-memory view every check operates on: the resolved base image plus
/// all instructions in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    pub base_image: String,
    pub instructions: Vec<Instruction>,
}

impl ParsedRecipe {
    pub fn new(base_image: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        Self {
            base_image: base_image.into(),
            instructions,
        }
    }

    /// Number of build stages (FROM instructions).
    pub fn stage_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is("FROM")).count()
    }
}
