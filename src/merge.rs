#![allow(missing_docs)]

use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{EaipError, Result};

/// Merge every PDF in a chart-type folder into `<TYPE>-MERGED.pdf`.
///
/// Pages are concatenated in filename-sorted order and the combined file
/// is written into the same folder. Returns `Ok(None)` without touching
/// anything when the folder is absent or holds no PDFs.
pub fn merge_pdf_folder(folder_path: &Path, chart_type: &str) -> Result<Option<PathBuf>> {
    if !folder_path.is_dir() {
        warn!("Chart folder does not exist: {}", folder_path.display());
        return Ok(None);
    }

    let mut pdf_files: Vec<PathBuf> = std::fs::read_dir(folder_path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|ext| ext == "pdf").unwrap_or(false)
        })
        .collect();
    pdf_files.sort();

    if pdf_files.is_empty() {
        warn!("No PDF files to merge in {}", folder_path.display());
        return Ok(None);
    }

    let mut merged = merge_documents(&pdf_files)?;

    let merged_path = folder_path.join(format!("{}-MERGED.pdf", chart_type));
    merged
        .save(&merged_path)
        .map_err(|e| EaipError::Pdf(e.to_string()))?;

    debug!(
        "Merged {} PDFs into {}",
        pdf_files.len(),
        merged_path.display()
    );
    Ok(Some(merged_path))
}

/// Concatenate the pages of several PDF files into one document.
///
/// Objects from each document are renumbered into a common id space, page
/// objects are re-parented under a single page tree, and one catalog is
/// kept. Outlines are dropped; chart PDFs do not carry useful ones.
pub fn merge_documents(paths: &[PathBuf]) -> Result<Document> {
    let mut max_id = 1;
    let mut document_pages: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut document_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for path in paths {
        let mut doc = Document::load(path)
            .map_err(|e| EaipError::Pdf(format!("{}: {}", path.display(), e)))?;

        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for (_, object_id) in doc.get_pages() {
            let object = doc
                .get_object(object_id)
                .map_err(|e| EaipError::Pdf(e.to_string()))?
                .to_owned();
            document_pages.insert(object_id, object);
        }
        document_objects.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    let mut catalog_object: Option<(ObjectId, Object)> = None;
    let mut pages_object: Option<(ObjectId, Object)> = None;

    for (object_id, object) in document_objects.iter() {
        let type_name = object
            .as_dict()
            .ok()
            .and_then(|dict| dict.get(b"Type").ok())
            .and_then(|value| match value {
                Object::Name(name) => Some(name.as_slice()),
                _ => None,
            });

        match type_name {
            // Keep the first catalog and hang everything off it.
            Some(b"Catalog") => {
                let id = catalog_object
                    .as_ref()
                    .map(|(id, _)| *id)
                    .unwrap_or(*object_id);
                catalog_object = Some((id, object.clone()));
            }
            // Collapse all page trees into one.
            Some(b"Pages") => {
                if let Ok(dictionary) = object.as_dict() {
                    let mut dictionary = dictionary.clone();
                    if let Some((_, ref existing)) = pages_object {
                        if let Ok(old_dictionary) = existing.as_dict() {
                            dictionary.extend(old_dictionary);
                        }
                    }
                    let id = pages_object
                        .as_ref()
                        .map(|(id, _)| *id)
                        .unwrap_or(*object_id);
                    pages_object = Some((id, Object::Dictionary(dictionary)));
                }
            }
            // Pages are re-inserted below with a fixed parent.
            Some(b"Page") => {}
            Some(b"Outlines") | Some(b"Outline") => {}
            _ => {
                merged.objects.insert(*object_id, object.clone());
            }
        }
    }

    let (pages_id, pages_root) = pages_object
        .ok_or_else(|| EaipError::Pdf("Pages root not found in merged documents".to_string()))?;
    let (catalog_id, catalog_root) = catalog_object
        .ok_or_else(|| EaipError::Pdf("Catalog not found in merged documents".to_string()))?;

    if let Ok(dictionary) = pages_root.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Count", document_pages.len() as u32);
        dictionary.set(
            "Kids",
            document_pages
                .keys()
                .map(|id| Object::Reference(*id))
                .collect::<Vec<_>>(),
        );
        merged
            .objects
            .insert(pages_id, Object::Dictionary(dictionary));
    }

    for (object_id, object) in document_pages.iter() {
        if let Ok(dictionary) = object.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Parent", Object::Reference(pages_id));
            merged
                .objects
                .insert(*object_id, Object::Dictionary(dictionary));
        }
    }

    if let Ok(dictionary) = catalog_root.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Pages", Object::Reference(pages_id));
        dictionary.remove(b"Outlines");
        merged
            .objects
            .insert(catalog_id, Object::Dictionary(dictionary));
    }

    merged.trailer.set("Root", Object::Reference(catalog_id));
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};
    use tempfile::tempdir;

    fn write_test_pdf(path: &Path, text: &str) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_merge_missing_folder_is_noop() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("GMC");

        let result = merge_pdf_folder(&missing, "GMC").unwrap();
        assert!(result.is_none());
        assert!(!missing.exists());
    }

    #[test]
    fn test_merge_empty_folder_is_noop() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("APDC");
        std::fs::create_dir(&folder).unwrap();

        let result = merge_pdf_folder(&folder, "APDC").unwrap();
        assert!(result.is_none());
        assert_eq!(std::fs::read_dir(&folder).unwrap().count(), 0);
    }

    #[test]
    fn test_merge_concatenates_pages() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("GMC");
        std::fs::create_dir(&folder).unwrap();
        write_test_pdf(&folder.join("ZBAA-GMC-1.pdf"), "chart one");
        write_test_pdf(&folder.join("ZBAA-GMC-2.pdf"), "chart two");

        let merged_path = merge_pdf_folder(&folder, "GMC").unwrap().unwrap();
        assert_eq!(merged_path, folder.join("GMC-MERGED.pdf"));

        let merged = Document::load(&merged_path).unwrap();
        assert_eq!(merged.get_pages().len(), 2);
    }
}
