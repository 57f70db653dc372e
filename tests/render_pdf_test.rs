//! PDF rendering integration: plans applied to real files on disk.

use anyhow::Result;
use lopdf::content::Content;
use lopdf::{Document, Object};
use tempfile::TempDir;

use shroud::{plan_restoration, PdfBackend, RedactionEngine, RenderBackend};

mod common;
use common::*;

fn operators(path: &std::path::Path) -> Result<Vec<String>> {
    let doc = Document::load(path)?;
    let page_id = doc.get_pages()[&1];
    let content = Content::decode(&doc.get_page_content(page_id)?)?;
    Ok(content
        .operations
        .into_iter()
        .map(|op| op.operator)
        .collect())
}

#[test]
fn test_overlays_survive_save_and_reload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("input.pdf");
    let output = temp_dir.path().join("redacted.pdf");
    TestPdfBuilder::new()
        .with_title("Invoice")
        .with_line("Contact Jane at jane@co.com")
        .build(&input)?;

    let engine = RedactionEngine::with_builtin_detector(40);
    let (plan, _key) = engine.plan_redaction(&[invoice_page()])?;
    assert_eq!(plan.overlays.len(), 2);

    let mut backend = PdfBackend::open(&input)?;
    assert_eq!(backend.page_count(), 1);
    backend.paint_overlays(&plan.overlays)?;
    backend.save(&output)?;

    let ops = operators(&output)?;
    // One filled rectangle per overlay, appended after the original content.
    assert_eq!(ops.iter().filter(|op| *op == "re").count(), 2);
    assert!(ops.iter().filter(|op| *op == "f").count() >= 2);
    Ok(())
}

#[test]
fn test_restored_text_is_drawn_into_the_redacted_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("input.pdf");
    let redacted = temp_dir.path().join("redacted.pdf");
    let restored = temp_dir.path().join("restored.pdf");
    TestPdfBuilder::new()
        .with_line("Contact Jane at jane@co.com")
        .build(&input)?;

    let engine = RedactionEngine::with_builtin_detector(40);
    let (plan, key) = engine.plan_redaction(&[contact_page()])?;

    let mut backend = PdfBackend::open(&input)?;
    backend.paint_overlays(&plan.overlays)?;
    backend.save(&redacted)?;

    let restoration = plan_restoration(&key, &plan.ledger)?;
    let mut backend = PdfBackend::open(&redacted)?;
    backend.draw_text(&restoration.draws)?;
    backend.save(&restored)?;

    let doc = Document::load(&restored)?;
    let page_id = doc.get_pages()[&1];
    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let shown: Vec<Vec<u8>> = content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands[0].as_str().ok().map(<[u8]>::to_vec))
        .collect();
    assert!(
        shown.iter().any(|text| text == b"jane@co.com"),
        "restored text not found in content stream"
    );

    // The restoration font must be wired into the page resources.
    let (resources, _) = doc.get_page_resources(page_id);
    let fonts = resources
        .and_then(|r| r.get(b"Font").ok())
        .and_then(|f| f.as_dict().ok())
        .expect("page has a font dictionary");
    assert!(fonts.iter().any(|(name, obj)| {
        name.starts_with(b"FSh") && matches!(obj, Object::Reference(_))
    }));
    Ok(())
}

#[test]
fn test_plan_for_missing_page_leaves_file_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("input.pdf");
    TestPdfBuilder::new().with_line("one page only").build(&input)?;

    let mut page = invoice_page();
    page.page = 9;
    let engine = RedactionEngine::with_builtin_detector(40);
    let (plan, _key) = engine.plan_redaction(&[page])?;

    let mut backend = PdfBackend::open(&input)?;
    assert!(backend.paint_overlays(&plan.overlays).is_err());
    Ok(())
}
