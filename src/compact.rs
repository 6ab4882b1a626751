use crate::errors::CompactError;
use crate::filter::FilterRules;
use crate::render::MarkdownRenderer;
use crate::reporting::print_stats;
use crate::walk::ProjectWalker;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tiktoken_rs::{get_bpe_from_model, CoreBPE};
use tracing::{debug, info, trace};

/// Name of the document the command-line tool writes.
pub const DEFAULT_OUTPUT_FILE: &str = "compacted.md";

#[derive(Debug, Clone)]
pub struct CompactorConfig {
    pub include_config: bool,
    pub stats: bool,
    pub model: String,
}

impl Default for CompactorConfig {
    fn default() -> Self {
        CompactorConfig {
            include_config: false,
            stats: false,
            model: "gpt-4o".to_owned(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CompactSummary {
    pub files_written: usize,
    pub content_bytes: usize,
    /// Per-file token counts, empty unless statistics were requested.
    pub token_counts: HashMap<PathBuf, usize>,
}

pub trait ProjectCompactor {
    fn compact(&self, root: &Path, sink: &mut dyn Write) -> Result<CompactSummary, CompactError>;
}

pub struct BasicProjectCompactor {
    config: CompactorConfig,
    rules: FilterRules,
    tokenizer: Option<CoreBPE>,
}

impl BasicProjectCompactor {
    /// Compiles the filter rules and, when statistics are on, loads the
    /// tokenizer. Fails before any output is touched.
    pub fn new(config: CompactorConfig) -> Result<Self, CompactError> {
        let rules = FilterRules::new(config.include_config)?;
        let tokenizer = if config.stats {
            debug!("Loading tokenizer for model {}", config.model);
            Some(
                get_bpe_from_model(&config.model)
                    .map_err(|e| CompactError::Tokenizer(e.to_string()))?,
            )
        } else {
            None
        };
        Ok(BasicProjectCompactor {
            config,
            rules,
            tokenizer,
        })
    }

    fn count_tokens(&self, content: &[u8]) -> Option<usize> {
        self.tokenizer
            .as_ref()
            .map(|bpe| bpe.encode_ordinary(&String::from_utf8_lossy(content)).len())
    }
}

impl ProjectCompactor for BasicProjectCompactor {
    fn compact(&self, root: &Path, sink: &mut dyn Write) -> Result<CompactSummary, CompactError> {
        let mut renderer = MarkdownRenderer::begin(sink)?;
        let mut summary = CompactSummary::default();

        for entry in ProjectWalker::new(root, &self.rules) {
            let entry = entry?;
            renderer.write_entry(&entry)?;
            summary.content_bytes += entry.content.len();

            if let Some(tokens) = self.count_tokens(&entry.content) {
                trace!("{} has {} tokens", entry.relative_path.display(), tokens);
                summary.token_counts.insert(entry.relative_path, tokens);
            }
        }

        summary.files_written = renderer.sections();
        renderer.finish()?;
        info!(
            "Compacted {} files ({} bytes of source)",
            summary.files_written, summary.content_bytes
        );
        if self.config.stats {
            print_stats(&summary.token_counts);
        }
        Ok(summary)
    }
}

/// Compacts `root` into an explicit sink.
pub fn compact_project(
    config: CompactorConfig,
    root: &Path,
    sink: &mut dyn Write,
) -> Result<CompactSummary, CompactError> {
    BasicProjectCompactor::new(config)?.compact(root, sink)
}

/// Creates (or truncates) `output` and compacts `root` into it. The file
/// may be left partially written when the walk fails.
pub fn compact_to_file(
    config: CompactorConfig,
    root: &Path,
    output: &Path,
) -> Result<CompactSummary, CompactError> {
    let compactor = BasicProjectCompactor::new(config)?;
    let file = File::create(output).map_err(|source| CompactError::OutputCreate {
        path: output.to_path_buf(),
        source,
    })?;
    debug!("Writing to {}", output.display());
    let mut writer = BufWriter::new(file);
    let summary = compactor.compact(root, &mut writer)?;
    writer.flush()?;
    Ok(summary)
}
