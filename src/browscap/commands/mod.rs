//! Business logic of each CLI operation. Commands return structured data
//! and messages; printing is the binary's job.

pub mod build;
pub mod check;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Sizes of the stages of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records: usize,
    pub definitions: usize,
    pub rows: usize,
    pub patterns: usize,
    pub parents: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// The rendered artifact document, when the command produces one.
    pub artifact: Option<String>,
    pub stats: BuildStats,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_artifact(mut self, artifact: String) -> Self {
        self.artifact = Some(artifact);
        self
    }

    pub fn with_stats(mut self, stats: BuildStats) -> Self {
        self.stats = stats;
        self
    }
}
