//! PDF encoding of worksheet documents.

use super::encoding::{encode_win_ansi, is_win_ansi};
use super::image::embed_image;
use super::{deflate, RenderOptions};
use crate::error::{Error, Result};
use crate::layout::MM_PER_PT;
use crate::model::{Document, DrawOp, FontFace, Metadata, Page};
use chrono::{Datelike, Timelike};
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Catalog and page tree take the first two object numbers.
const FIRST_FREE_ID: i32 = 3;

/// Millimeters to PDF points.
fn pt(mm: f64) -> f32 {
    (mm / MM_PER_PT) as f32
}

/// Serialize a document to PDF bytes.
///
/// Text uses the standard Helvetica-Bold face, which every viewer ships, so
/// no font program is embedded.
///
/// # Errors
///
/// `Error::Render` if the document has no pages or a page refers to a
/// missing image resource.
pub fn to_pdf(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    if doc.is_empty() {
        return Err(Error::Render("document has no pages".to_string()));
    }

    let mut pdf = Pdf::new();
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let mut next_ref = FIRST_FREE_ID;
    let mut alloc = || {
        let id = Ref::new(next_ref);
        next_ref += 1;
        id
    };

    pdf.catalog(catalog_id).pages(page_tree_id);

    let fonts: BTreeMap<FontFace, Ref> = used_fonts(doc)
        .into_iter()
        .map(|face| (face, alloc()))
        .collect();
    let image_ids: BTreeMap<&str, Ref> = doc
        .resources
        .keys()
        .map(|id| (id.as_str(), alloc()))
        .collect();
    let page_ids: Vec<(Ref, Ref)> = doc.pages.iter().map(|_| (alloc(), alloc())).collect();
    let info_id = alloc();

    for (face, id) in &fonts {
        pdf.type1_font(*id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (id, resource) in &doc.resources {
        embed_image(&mut pdf, image_ids[id.as_str()], &mut next_ref, resource, options.compress)?;
    }

    for (page, &(page_id, content_id)) in doc.pages.iter().zip(&page_ids) {
        let content = page_content(page, doc)?;
        if options.compress {
            let compressed = deflate(&content)?;
            pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_id, &content);
        }

        let mut pdf_page = pdf.page(page_id);
        pdf_page
            .media_box(Rect::new(0.0, 0.0, pt(page.width), pt(page.height)))
            .parent(page_tree_id)
            .contents(content_id);

        let mut resources = pdf_page.resources();
        {
            let mut font_dict = resources.fonts();
            for face in page_fonts(page) {
                font_dict.pair(Name(face.resource_name().as_bytes()), fonts[&face]);
            }
        }
        {
            let mut xobjects = resources.x_objects();
            for id in page.image_ids() {
                let image_ref = image_ids
                    .get(id)
                    .ok_or_else(|| Error::Render(format!("missing image resource '{}'", id)))?;
                xobjects.pair(Name(id.as_bytes()), *image_ref);
            }
        }
        resources.finish();
        pdf_page.finish();
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|&(page_id, _)| page_id))
        .count(page_ids.len() as i32);

    if options.include_metadata {
        write_info(&mut pdf, info_id, &doc.metadata);
    }

    log::debug!(
        "Encoded {} pages with {} images",
        doc.page_count(),
        doc.resources.len()
    );
    Ok(pdf.finish())
}

/// Serialize a document and write it to `path`.
///
/// The whole file is produced in memory first, so encoding errors never
/// leave a file behind. If the write itself fails, any partial file is
/// removed.
pub fn write_pdf<P: AsRef<Path>>(doc: &Document, path: P, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_pdf(doc, options)?;

    if let Err(source) = fs::write(path, &bytes) {
        let _ = fs::remove_file(path);
        return Err(Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        });
    }

    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Content stream for one page.
fn page_content(page: &Page, doc: &Document) -> Result<Vec<u8>> {
    let height = page.height;
    let mut content = Content::new();

    for op in &page.elements {
        match op {
            DrawOp::Text { text, x, y, style } => {
                if !is_win_ansi(text) {
                    log::warn!(
                        "Page {}: '{}' has characters outside WinAnsi, replacing with '?'",
                        page.number,
                        text
                    );
                }
                let (r, g, b) = style.color.to_unit();
                content.set_fill_rgb(r, g, b);
                content.begin_text();
                content.set_font(Name(style.font.resource_name().as_bytes()), style.size as f32);
                content.next_line(pt(*x), pt(height - y));
                content.show(Str(&encode_win_ansi(text)));
                content.end_text();
            }
            DrawOp::Image {
                resource_id,
                x,
                y,
                width,
                height: draw_height,
            } => {
                if doc.get_resource(resource_id).is_none() {
                    return Err(Error::Render(format!(
                        "page {} refers to missing image resource '{}'",
                        page.number, resource_id
                    )));
                }
                // The unit square is scaled to the image box; PDF y is its bottom edge.
                content.save_state();
                content.transform([
                    pt(*width),
                    0.0,
                    0.0,
                    pt(*draw_height),
                    pt(*x),
                    pt(height - y - draw_height),
                ]);
                content.x_object(Name(resource_id.as_bytes()));
                content.restore_state();
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                let (r, g, b) = color.to_unit();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(pt(*width));
                content.move_to(pt(*x1), pt(height - y1));
                content.line_to(pt(*x2), pt(height - y2));
                content.stroke();
            }
        }
    }

    Ok(content.finish())
}

fn page_fonts(page: &Page) -> BTreeSet<FontFace> {
    page.elements
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { style, .. } => Some(style.font),
            _ => None,
        })
        .collect()
}

fn used_fonts(doc: &Document) -> BTreeSet<FontFace> {
    doc.pages.iter().flat_map(page_fonts).collect()
}

fn write_info(pdf: &mut Pdf, id: Ref, metadata: &Metadata) {
    let mut info = pdf.document_info(id);
    if let Some(title) = &metadata.title {
        info.title(TextStr(title));
    }
    if let Some(author) = &metadata.author {
        info.author(TextStr(author));
    }
    if let Some(creator) = &metadata.creator {
        info.creator(TextStr(creator));
    }
    if let Some(producer) = &metadata.producer {
        info.producer(TextStr(producer));
    }
    if let Some(created) = &metadata.created {
        let date = Date::new(created.year().clamp(0, 9999) as u16)
            .month(created.month() as u8)
            .day(created.day() as u8)
            .hour(created.hour() as u8)
            .minute(created.minute() as u8)
            .second(created.second() as u8)
            .utc_offset_hour(0)
            .utc_offset_minute(0);
        info.creation_date(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout_page, LayoutConfig};
    use crate::model::Resource;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

    fn page_with_image(doc: &mut Document, number: u32, img: &DynamicImage, title: &str) {
        let id = format!("I{}", number);
        let resource = Resource::from_image(img).unwrap();
        let page = layout_page(title, resource.width, resource.height, &LayoutConfig::default())
            .unwrap()
            .into_page(number, &id);
        doc.add_resource(id, resource);
        doc.add_page(page);
    }

    fn sample(pages: u32) -> Document {
        let mut doc = Document::new();
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([0, 0, 0])));
        for n in 1..=pages {
            page_with_image(&mut doc, n, &img, &format!("Problem {}", n));
        }
        doc
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    fn uncompressed() -> RenderOptions {
        RenderOptions::new().with_compression(false)
    }

    #[test]
    fn test_pdf_header_and_trailer() {
        let bytes = to_pdf(&sample(1), &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(count(&bytes, b"%%EOF") >= 1);
    }

    #[test]
    fn test_one_page_per_entry() {
        let bytes = to_pdf(&sample(3), &uncompressed()).unwrap();
        assert_eq!(count(&bytes, b"/Type /Page\n"), 3);
        assert!(count(&bytes, b"/Count 3") == 1);
        assert_eq!(count(&bytes, b"/Subtype /Image"), 3);
    }

    #[test]
    fn test_content_is_readable_uncompressed() {
        let bytes = to_pdf(&sample(1), &uncompressed()).unwrap();
        assert!(count(&bytes, b"(Homework Worksheet) Tj") == 1);
        assert!(count(&bytes, b"(Problem 1) Tj") == 1);
        assert!(count(&bytes, b"(NOTES / SOLUTION AREA) Tj") == 1);
        assert!(count(&bytes, b"/BaseFont /Helvetica-Bold") == 1);
        assert!(count(&bytes, b"/WinAnsiEncoding") >= 1);
        assert!(count(&bytes, b"/I1 Do") == 1);
    }

    #[test]
    fn test_ruled_lines_are_stroked() {
        let doc = sample(1);
        let lines = doc.pages[0].line_count();
        let bytes = to_pdf(&doc, &uncompressed()).unwrap();
        assert_eq!(count(&bytes, b" l\nS\n"), lines);
    }

    #[test]
    fn test_compression_shrinks_output() {
        let doc = sample(2);
        let plain = to_pdf(&doc, &uncompressed()).unwrap();
        let packed = to_pdf(&doc, &RenderOptions::default()).unwrap();
        assert!(packed.len() < plain.len());
        assert!(count(&packed, b"/FlateDecode") >= 1);
    }

    #[test]
    fn test_alpha_gets_soft_mask() {
        let mut doc = Document::new();
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 100])));
        page_with_image(&mut doc, 1, &img, "Alpha");
        let bytes = to_pdf(&doc, &uncompressed()).unwrap();
        assert_eq!(count(&bytes, b"/SMask"), 1);
        assert_eq!(count(&bytes, b"/Subtype /Image"), 2);
    }

    #[test]
    fn test_metadata_toggle() {
        let doc = sample(1);
        let with = to_pdf(&doc, &uncompressed()).unwrap();
        assert!(count(&with, b"/Producer") == 1);
        assert!(count(&with, b"/CreationDate") == 1);

        let without = to_pdf(&doc, &uncompressed().with_metadata(false)).unwrap();
        assert_eq!(count(&without, b"/Producer"), 0);
    }

    #[test]
    fn test_empty_document_rejected() {
        let result = to_pdf(&Document::new(), &RenderOptions::default());
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_missing_resource_rejected() {
        let mut doc = Document::new();
        let page = layout_page("Orphan", 10, 10, &LayoutConfig::default())
            .unwrap()
            .into_page(1, "I9");
        doc.add_page(page);
        assert!(matches!(
            to_pdf(&doc, &RenderOptions::default()),
            Err(Error::Render(_))
        ));
    }

    #[test]
    fn test_write_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.pdf");
        write_pdf(&sample(2), &out, &RenderOptions::default()).unwrap();
        let bytes = fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_write_pdf_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("out.pdf");
        let result = write_pdf(&sample(1), &out, &RenderOptions::default());
        assert!(matches!(result, Err(Error::OutputWrite { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn test_empty_document_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.pdf");
        assert!(write_pdf(&Document::new(), &out, &RenderOptions::default()).is_err());
        assert!(!out.exists());
    }
}
