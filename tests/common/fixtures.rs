//! Test fixtures: word-box pages, word-box JSON files, and PDF builders.

use anyhow::Result;
use printpdf::*;
use serde_json::json;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use shroud::domain::{PageWords, WordBox};

/// One page of a small invoice-like document. Concatenated text:
/// `"Contact Jane at jane@co.com SSN 123-45-6789"`.
pub fn invoice_page() -> PageWords {
    PageWords {
        page: 0,
        words: vec![
            WordBox::new("Contact", [10.0, 10.0, 60.0, 22.0]),
            WordBox::new("Jane", [64.0, 10.0, 95.0, 22.0]),
            WordBox::new("at", [99.0, 10.0, 112.0, 22.0]),
            WordBox::new("jane@co.com", [116.0, 9.0, 190.0, 23.0]),
            WordBox::new("SSN", [10.0, 30.0, 38.0, 42.0]),
            WordBox::new("123-45-6789", [42.0, 30.0, 120.0, 42.0]),
        ],
    }
}

/// Just the contact line: `"Contact Jane at jane@co.com"`.
pub fn contact_page() -> PageWords {
    PageWords {
        page: 0,
        words: vec![
            WordBox::new("Contact", [10.0, 10.0, 60.0, 22.0]),
            WordBox::new("Jane", [64.0, 10.0, 95.0, 22.0]),
            WordBox::new("at", [99.0, 10.0, 112.0, 22.0]),
            WordBox::new("jane@co.com", [116.0, 9.0, 190.0, 23.0]),
        ],
    }
}

/// A page with no PII at any severity.
pub fn clean_page(page: u32) -> PageWords {
    PageWords {
        page,
        words: vec![
            WordBox::new("Nothing", [10.0, 10.0, 70.0, 22.0]),
            WordBox::new("sensitive", [74.0, 10.0, 140.0, 22.0]),
            WordBox::new("here", [144.0, 10.0, 175.0, 22.0]),
        ],
    }
}

/// Serializes pages into the word-box JSON the CLI and `JsonWordSource`
/// consume.
pub fn words_json(pages: &[PageWords]) -> String {
    json!({ "pages": pages }).to_string()
}

/// Writes a word-box JSON file into `dir` and returns its path.
pub fn write_words_file(dir: &Path, pages: &[PageWords]) -> Result<PathBuf> {
    let path = dir.join("words.json");
    fs::write(&path, words_json(pages))?;
    Ok(path)
}

/// Builder for creating single-page test PDFs with custom text lines.
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    title: String,
    lines: Vec<String>,
    page_width: Mm,
    page_height: Mm,
}

impl TestPdfBuilder {
    pub fn new() -> Self {
        Self {
            title: "Test Document".to_string(),
            lines: Vec::new(),
            page_width: Mm(215.9),  // US Letter width
            page_height: Mm(279.4), // US Letter height
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Adds a line of body text.
    pub fn with_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Builds the PDF and writes it to the specified path.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        let (doc, page1, layer1) =
            PdfDocument::new(&self.title, self.page_width, self.page_height, "Layer 1");
        let current_layer = doc.get_page(page1).get_layer(layer1);

        let mut content = String::new();
        content.push_str(&self.title);
        content.push_str("\n\n");
        for line in &self.lines {
            content.push_str(line);
            content.push('\n');
        }

        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        current_layer.use_text(&content, 12.0, Mm(20.0), Mm(260.0), &font);

        doc.save(&mut BufWriter::new(fs::File::create(output_path)?))?;

        Ok(output_path.to_path_buf())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_words_json_shape() {
        let json = words_json(&[invoice_page()]);
        assert!(json.starts_with(r#"{"pages":"#));
        assert!(json.contains(r#""text":"jane@co.com""#));
    }

    #[test]
    fn test_builds_a_pdf() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let pdf_path = temp_dir.path().join("test.pdf");
        TestPdfBuilder::new()
            .with_title("Invoice")
            .with_line("Contact Jane at jane@co.com")
            .build(&pdf_path)?;
        assert!(pdf_path.exists());
        Ok(())
    }
}
