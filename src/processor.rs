#![allow(missing_docs)]

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::error::{EaipError, Result};
use crate::merge::merge_pdf_folder;
use crate::types::{ChartIndexEntry, EaipConfig, ManifestRecord};

/// Chart-type classification tokens, in tie-break order.
///
/// Classification is first-substring-match over this list; downstream
/// index consumers depend on the ordering, so it is not configurable.
pub const CHART_TYPES: &[&str] = &[
    "ADC",
    "APDC",
    "GMC",
    "DGS",
    "AOC",
    "PATC",
    "FDA",
    "ATCMAS",
    "SID",
    "STAR",
    "WAYPOINT LIST",
    "DATABASE CODING TABLE",
    "IAC",
    "ATCSMAC",
];

/// Chart types whose folders are collapsed into a single merged PDF
/// before indexing.
pub const SPECIAL_CHART_TYPES: &[&str] =
    &["WAYPOINT LIST", "GMC", "APDC", "DATABASE CODING TABLE"];

/// One step of the cycle-update pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    Rename,
    Organize,
    Index,
}

impl UpdateAction {
    /// The full pipeline in its contractual order.
    pub const ALL: [UpdateAction; 3] = [
        UpdateAction::Rename,
        UpdateAction::Organize,
        UpdateAction::Index,
    ];
}

/// Classify a chart filename against [`CHART_TYPES`], first match wins.
pub fn classify(file_name: &str) -> Option<&'static str> {
    CHART_TYPES
        .iter()
        .copied()
        .find(|chart_type| file_name.contains(*chart_type))
}

/// Processes an eAIP cycle's on-disk chart tree: renames manifest-listed
/// files into airport folders, sorts loose PDFs into chart-type
/// subfolders, and generates each airport's `index.json`.
pub struct ChartProcessor {
    config: EaipConfig,
}

impl ChartProcessor {
    /// Create a processor after validating the cycle's directory layout.
    pub fn new(config: EaipConfig) -> Result<Self> {
        let cycle_path = config.cycle_path();
        if !cycle_path.exists() {
            return Err(EaipError::Config(format!(
                "data directory does not exist: {}",
                cycle_path.display()
            )));
        }
        let terminal_path = config.terminal_path();
        if !terminal_path.exists() {
            return Err(EaipError::Config(format!(
                "Terminal directory does not exist: {}",
                terminal_path.display()
            )));
        }
        let manifest_path = config.manifest_path();
        if !manifest_path.exists() {
            return Err(EaipError::Config(format!(
                "AD.JSON manifest does not exist: {}",
                manifest_path.display()
            )));
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &EaipConfig {
        &self.config
    }

    /// Run the given pipeline steps in order.
    pub fn update(&self, actions: &[UpdateAction]) -> Result<()> {
        for action in actions {
            match action {
                UpdateAction::Rename => {
                    info!("Running rename step");
                    self.rename_chart_files()?;
                }
                UpdateAction::Organize => {
                    info!("Running organize step");
                    self.organize_airport_files()?;
                }
                UpdateAction::Index => {
                    info!("Running index step");
                    self.generate_index()?;
                }
            }
        }
        info!("Chart update completed");
        Ok(())
    }

    /// Relocate every manifest-listed PDF into its airport folder under
    /// its canonical name. Missing sources are logged and skipped.
    pub fn rename_chart_files(&self) -> Result<()> {
        let manifest_path = self.config.manifest_path();
        let raw = fs::read_to_string(&manifest_path)?;
        let records: Vec<ManifestRecord> = serde_json::from_str(&raw)?;
        info!(
            "Read {} manifest records from {}",
            records.len(),
            manifest_path.display()
        );

        let cycle_path = self.config.cycle_path();
        let terminal_path = self.config.terminal_path();

        for record in &records {
            let Some(pdf_path) = record.pdf_path.as_deref().filter(|p| !p.is_empty()) else {
                continue;
            };

            let old_path = cycle_path.join(pdf_path.trim_start_matches('/'));
            let Some(icao) = icao_from_path(&old_path) else {
                warn!("Cannot determine ICAO code for {}", old_path.display());
                continue;
            };

            let directory = terminal_path.join(&icao);
            let new_path = directory.join(sanitize_chart_name(&record.name));

            if !old_path.exists() {
                warn!("Manifest source does not exist: {}", old_path.display());
                continue;
            }

            let rename =
                fs::create_dir_all(&directory).and_then(|_| fs::rename(&old_path, &new_path));
            match rename {
                Ok(()) => info!(
                    "Renamed {} -> {}",
                    old_path.display(),
                    new_path.display()
                ),
                Err(e) => error!("Rename failed for {}: {}", old_path.display(), e),
            }
        }

        Ok(())
    }

    /// Move loose PDFs in each airport folder into chart-type subfolders.
    /// Files matching no type token stay in the airport root.
    pub fn organize_airport_files(&self) -> Result<()> {
        let airports = self.airport_dirs()?;
        info!("Organizing {} airport folders", airports.len());

        for (_, airport_path) in &airports {
            for pdf_path in pdf_files(airport_path)? {
                let Some(file_name) = file_name_str(&pdf_path) else {
                    continue;
                };
                let Some(chart_type) = classify(&file_name) else {
                    continue;
                };

                let type_folder = airport_path.join(chart_type);
                let new_path = type_folder.join(&file_name);
                let moved =
                    fs::create_dir_all(&type_folder).and_then(|_| fs::rename(&pdf_path, &new_path));
                match moved {
                    Ok(()) => info!(
                        "Moved {} -> {}",
                        pdf_path.display(),
                        new_path.display()
                    ),
                    Err(e) => error!("Move failed for {}: {}", pdf_path.display(), e),
                }
            }
        }

        Ok(())
    }

    /// Rebuild every airport's `index.json` from the current directory
    /// layout, merging special chart folders first.
    pub fn generate_index(&self) -> Result<()> {
        for (icao, airport_path) in self.airport_dirs()? {
            self.merge_special_charts(&airport_path);

            let entries = index_airport(&airport_path, &icao)?;
            write_index(&airport_path.join("index.json"), &entries)?;

            info!("Indexed {} charts for {}", entries.len(), icao);
        }

        Ok(())
    }

    /// Collapse each special chart-type folder into one merged PDF. A
    /// failed merge is logged; indexing proceeds without the merged file.
    fn merge_special_charts(&self, airport_path: &Path) {
        for chart_type in SPECIAL_CHART_TYPES {
            let type_folder = airport_path.join(chart_type);
            if !type_folder.is_dir() {
                continue;
            }
            if let Err(e) = merge_pdf_folder(&type_folder, chart_type) {
                error!("Merge failed for {}: {}", type_folder.display(), e);
            }
        }
    }

    fn airport_dirs(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut airports = Vec::new();
        for entry in fs::read_dir(self.config.terminal_path())? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                airports.push((entry.file_name().to_string_lossy().into_owned(), path));
            }
        }
        Ok(airports)
    }
}

/// Build the index entries for one airport: loose PDFs first (classified
/// as `"general"`), then each chart-type subfolder's contents.
fn index_airport(airport_path: &Path, icao: &str) -> Result<Vec<ChartIndexEntry>> {
    let mut entries = Vec::new();
    let mut chart_id = 1;

    for pdf_path in pdf_files(airport_path)? {
        let Some(name) = file_name_str(&pdf_path) else {
            continue;
        };
        entries.push(ChartIndexEntry {
            id: chart_id.to_string(),
            code: "general".to_string(),
            name: name.clone(),
            path: name,
            sort: "general".to_string(),
        });
        chart_id += 1;
    }

    for folder in subdirs(airport_path)? {
        let Some(folder_name) = file_name_str(&folder) else {
            continue;
        };
        for pdf_path in pdf_files(&folder)? {
            let Some(name) = file_name_str(&pdf_path) else {
                continue;
            };
            entries.push(ChartIndexEntry {
                id: chart_id.to_string(),
                code: chart_code(&name, &folder_name, icao),
                name: name.clone(),
                path: format!("{}/{}", folder_name, name),
                sort: folder_name.clone(),
            });
            chart_id += 1;
        }
    }

    Ok(entries)
}

/// Derive an entry's code: the filename text before the chart-type token,
/// with everything up to and including the last `"<ICAO>-"` stripped.
fn chart_code(file_name: &str, folder_name: &str, icao: &str) -> String {
    let before = file_name.split(folder_name).next().unwrap_or(file_name);
    let prefix = format!("{}-", icao);
    before
        .rsplit(prefix.as_str())
        .next()
        .unwrap_or(before)
        .to_string()
}

/// Replace path-unsafe characters in a canonical chart name and give it
/// the `.pdf` extension.
fn sanitize_chart_name(name: &str) -> String {
    let sanitized = name.replace([':', '/', '\\'], "-");
    format!("{}.pdf", sanitized)
}

/// Find the owning bucket of a manifest source path: a `GeneralDoc`
/// segment wins, otherwise the segment following `Terminal`.
fn icao_from_path(path: &Path) -> Option<String> {
    let parts: Vec<String> = path
        .iter()
        .map(|part| part.to_string_lossy().into_owned())
        .collect();

    for (i, part) in parts.iter().enumerate() {
        if part.contains("GeneralDoc") {
            return Some("GeneralDoc".to_string());
        }
        if part.contains("Terminal") && i + 1 < parts.len() {
            return Some(parts[i + 1].clone());
        }
    }
    None
}

/// Write the index as pretty-printed UTF-8 JSON with 4-space indentation.
fn write_index(index_path: &Path, entries: &[ChartIndexEntry]) -> Result<()> {
    let file = fs::File::create(index_path)?;
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(file, formatter);
    entries.serialize(&mut serializer)?;
    Ok(())
}

fn pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map(|ext| ext == "pdf").unwrap_or(false) {
            files.push(path);
        }
    }
    Ok(files)
}

fn subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

fn file_name_str(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}
