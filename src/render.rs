use crate::errors::CompactError;
use crate::language::language_for_file;
use crate::walk::FileEntry;
use std::io::Write;
use std::path::Path;
use tracing::trace;

pub const DOCUMENT_HEADER: &str = "# Project Code Overview\n\n";

const SECTION_FOOTER: &[u8] = b"\n```\n\n";

/// Writes the markdown document: one header, then a fenced section per
/// file. Contents are embedded byte for byte; a file that itself holds a
/// triple-backtick fence yields malformed markdown.
pub struct MarkdownRenderer<W: Write> {
    writer: W,
    sections: usize,
}

impl<W: Write> MarkdownRenderer<W> {
    /// Wraps `writer` and writes the document header to it.
    pub fn begin(mut writer: W) -> Result<Self, CompactError> {
        writer.write_all(DOCUMENT_HEADER.as_bytes())?;
        Ok(MarkdownRenderer {
            writer,
            sections: 0,
        })
    }

    /// Appends a section and returns its rendered length in bytes. The
    /// file body goes straight to the writer without being copied.
    pub fn write_entry(&mut self, entry: &FileEntry) -> Result<usize, CompactError> {
        let header = section_header(&entry.relative_path, &entry.file_name());
        self.writer.write_all(header.as_bytes())?;
        self.writer.write_all(&entry.content)?;
        self.writer.write_all(SECTION_FOOTER)?;
        self.sections += 1;

        let written = header.len() + entry.content.len() + SECTION_FOOTER.len();
        trace!(
            "Wrote section {} for {} ({} bytes)",
            self.sections,
            entry.relative_path.display(),
            written
        );
        Ok(written)
    }

    pub fn sections(&self) -> usize {
        self.sections
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W, CompactError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn section_header(relative_path: &Path, file_name: &str) -> String {
    format!(
        "## File: `{}`\n\n```{}\n",
        relative_path.display(),
        language_for_file(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(relative: &str, content: &[u8]) -> FileEntry {
        FileEntry {
            path: PathBuf::from("/project").join(relative),
            relative_path: PathBuf::from(relative),
            content: content.to_vec(),
        }
    }

    #[test]
    fn test_header_only_document() {
        let renderer = MarkdownRenderer::begin(Vec::<u8>::new()).unwrap();
        assert_eq!(renderer.sections(), 0);
        let output = renderer.finish().unwrap();
        assert_eq!(output, DOCUMENT_HEADER.as_bytes().to_vec());
    }

    #[test]
    fn test_section_layout() {
        let mut renderer = MarkdownRenderer::begin(Vec::<u8>::new()).unwrap();
        renderer
            .write_entry(&entry("app.ts", b"const x = 1;"))
            .unwrap();
        let output = String::from_utf8(renderer.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "# Project Code Overview\n\n## File: `app.ts`\n\n```typescript\nconst x = 1;\n```\n\n"
        );
    }

    #[test]
    fn test_sections_keep_order() {
        let mut renderer = MarkdownRenderer::begin(Vec::<u8>::new()).unwrap();
        renderer.write_entry(&entry("b.css", b"b {}")).unwrap();
        renderer.write_entry(&entry("a.js", b"a()")).unwrap();
        assert_eq!(renderer.sections(), 2);
        let output = String::from_utf8(renderer.finish().unwrap()).unwrap();
        let css = output.find("## File: `b.css`").unwrap();
        let js = output.find("## File: `a.js`").unwrap();
        assert!(css < js);
    }

    #[test]
    fn test_content_is_verbatim() {
        let content = b"```\nnot escaped\n```\r\n\xff";
        let mut renderer = MarkdownRenderer::begin(Vec::<u8>::new()).unwrap();
        let written = renderer.write_entry(&entry("x.svelte", content)).unwrap();
        let output = renderer.finish().unwrap();

        let section = &output[DOCUMENT_HEADER.len()..];
        let prefix = b"## File: `x.svelte`\n\n```svelte\n";
        assert_eq!(written, section.len());
        assert!(section.starts_with(prefix));
        assert_eq!(&section[prefix.len()..section.len() - SECTION_FOOTER.len()], content);
        assert!(section.ends_with(SECTION_FOOTER));
    }

    #[test]
    fn test_unmapped_extension_uses_text() {
        let mut renderer = MarkdownRenderer::begin(Vec::<u8>::new()).unwrap();
        let written = renderer.write_entry(&entry("package.json", b"{}")).unwrap();
        let output = renderer.finish().unwrap();

        let section = &output[DOCUMENT_HEADER.len()..];
        assert_eq!(section, b"## File: `package.json`\n\n```text\n{}\n```\n\n");
        assert_eq!(written, section.len());
    }
}
