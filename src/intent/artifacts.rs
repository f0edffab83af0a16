//! The trained artifact bundle: vectorizer, model and label table.
//!
//! A model directory counts as trained only when all three files exist.
//! [`ArtifactBundle::save`] writes each file under a temporary name and renames
//! it into place, labels last, so a reader never sees a complete set of names
//! before every file is fully written.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{NluError, Result};
use crate::intent::logistic::LogisticRegression;
use crate::intent::tfidf::TfIdfVectorizer;

/// Fitted TF-IDF vectorizer (bincode).
pub const VECTORIZER_FILE: &str = "vectorizer.bin";
/// Fitted logistic-regression model (bincode).
pub const MODEL_FILE: &str = "intent_model.bin";
/// Label -> class index table (JSON).
pub const LABELS_FILE: &str = "labels.json";
/// All files of a bundle, in write order.
pub const ARTIFACT_FILES: [&str; 3] = [VECTORIZER_FILE, MODEL_FILE, LABELS_FILE];

/// Bidirectional mapping between intent labels and class indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, usize>", into = "BTreeMap<String, usize>")]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Build a table from labels; indices follow sorted label order.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        labels.dedup();
        Self { labels }
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl TryFrom<BTreeMap<String, usize>> for LabelTable {
    type Error = NluError;

    fn try_from(map: BTreeMap<String, usize>) -> Result<Self> {
        let mut labels: Vec<Option<String>> = vec![None; map.len()];
        for (label, index) in map {
            let slot = labels.get_mut(index).ok_or_else(|| {
                NluError::model(format!("label {label:?} has out-of-range index {index}"))
            })?;
            if let Some(existing) = slot {
                return Err(NluError::model(format!(
                    "labels {existing:?} and {label:?} share index {index}"
                )));
            }
            *slot = Some(label);
        }
        // Every slot is filled: n distinct in-range indices for n labels.
        let labels: Vec<String> = labels.into_iter().flatten().collect();
        if labels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(NluError::model("label indices must follow sorted label order"));
        }
        Ok(Self { labels })
    }
}

impl From<LabelTable> for BTreeMap<String, usize> {
    fn from(table: LabelTable) -> Self {
        table
            .labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| (label, index))
            .collect()
    }
}

/// The three artifacts produced by training, loaded and saved as a unit.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub vectorizer: TfIdfVectorizer,
    pub model: LogisticRegression,
    pub labels: LabelTable,
}

impl ArtifactBundle {
    /// Assemble a bundle, checking that the parts agree on dimensions.
    pub fn new(
        vectorizer: TfIdfVectorizer,
        model: LogisticRegression,
        labels: LabelTable,
    ) -> Result<Self> {
        model.validate()?;
        if model.n_features() != vectorizer.vocabulary_size() {
            return Err(NluError::model(format!(
                "model expects {} features but vectorizer produces {}",
                model.n_features(),
                vectorizer.vocabulary_size()
            )));
        }
        if model.n_classes() != labels.len() {
            return Err(NluError::model(format!(
                "model has {} classes but label table has {} labels",
                model.n_classes(),
                labels.len()
            )));
        }
        Ok(Self {
            vectorizer,
            model,
            labels,
        })
    }

    /// Artifact files absent from `dir`.
    pub fn missing_files<P: AsRef<Path>>(dir: P) -> Vec<&'static str> {
        let dir = dir.as_ref();
        ARTIFACT_FILES
            .iter()
            .copied()
            .filter(|name| !dir.join(name).is_file())
            .collect()
    }

    /// Whether `dir` holds all three artifacts.
    pub fn is_complete<P: AsRef<Path>>(dir: P) -> bool {
        Self::missing_files(dir).is_empty()
    }

    /// Load a bundle. Fails if any artifact is missing or unreadable.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let missing = Self::missing_files(dir);
        if !missing.is_empty() {
            return Err(NluError::model(format!(
                "incomplete model bundle in {}: missing {}",
                dir.display(),
                missing.join(", ")
            )));
        }

        let vectorizer: TfIdfVectorizer =
            bincode::deserialize_from(BufReader::new(File::open(dir.join(VECTORIZER_FILE))?))?;
        let model: LogisticRegression =
            bincode::deserialize_from(BufReader::new(File::open(dir.join(MODEL_FILE))?))?;
        let labels: LabelTable =
            serde_json::from_reader(BufReader::new(File::open(dir.join(LABELS_FILE))?))?;

        let bundle = Self::new(vectorizer, model, labels)?;
        info!(
            "loaded model bundle from {} ({} labels, {} features)",
            dir.display(),
            bundle.labels.len(),
            bundle.vectorizer.vocabulary_size()
        );
        Ok(bundle)
    }

    /// Write the bundle into `dir`, creating it if needed.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        write_atomically(dir, VECTORIZER_FILE, |w| {
            bincode::serialize_into(w, &self.vectorizer).map_err(NluError::from)
        })?;
        write_atomically(dir, MODEL_FILE, |w| {
            bincode::serialize_into(w, &self.model).map_err(NluError::from)
        })?;
        write_atomically(dir, LABELS_FILE, |w| {
            serde_json::to_writer_pretty(w, &self.labels).map_err(NluError::from)
        })?;

        info!("saved model bundle to {}", dir.display());
        Ok(())
    }

    /// Delete any artifact files in `dir`, including temporary files left by
    /// an interrupted save.
    pub fn remove_files<P: AsRef<Path>>(dir: P) -> Result<()> {
        let dir = dir.as_ref();
        for name in ARTIFACT_FILES {
            for path in [dir.join(name), temp_path_for(dir, name)] {
                if path.exists() {
                    debug!("removing stale artifact {}", path.display());
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }
}

fn temp_path_for(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.tmp"))
}

fn write_atomically<F>(dir: &Path, name: &str, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let final_path = dir.join(name);
    let tmp_path = temp_path_for(dir, name);

    let written = File::create(&tmp_path)
        .map_err(NluError::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            Ok(())
        });
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            debug!("could not remove {}: {cleanup}", tmp_path.display());
        }
        return Err(e);
    }

    fs::rename(&tmp_path, &final_path)?;
    debug!("wrote {}", final_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_table_sorted_indices() {
        let table = LabelTable::from_labels(["transfer_money", "check_balance", "check_balance"]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.index_of("check_balance"), Some(0));
        assert_eq!(table.index_of("transfer_money"), Some(1));
        assert_eq!(table.label(1), Some("transfer_money"));
        assert_eq!(table.index_of("unknown"), None);
    }

    #[test]
    fn test_label_table_json_shape() {
        let table = LabelTable::from_labels(["b", "a"]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"a":0,"b":1}"#);

        let restored: LabelTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_label_table_rejects_bad_indices() {
        assert!(serde_json::from_str::<LabelTable>(r#"{"a":0,"b":0}"#).is_err());
        assert!(serde_json::from_str::<LabelTable>(r#"{"a":0,"b":5}"#).is_err());
        assert!(serde_json::from_str::<LabelTable>(r#"{"a":1,"b":0}"#).is_err());
    }

    #[test]
    fn test_missing_files_in_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ArtifactBundle::missing_files(dir.path()), ARTIFACT_FILES.to_vec());
        assert!(!ArtifactBundle::is_complete(dir.path()));

        let err = ArtifactBundle::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("vectorizer.bin"));
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = write_atomically(dir.path(), MODEL_FILE, |w| {
            w.write_all(b"partial")?;
            Err(NluError::model("encoder failed"))
        });

        assert!(result.is_err());
        assert!(!dir.path().join(MODEL_FILE).exists());
        assert!(!temp_path_for(dir.path(), MODEL_FILE).exists());
    }

    #[test]
    fn test_remove_files_clears_temp_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LABELS_FILE), "{}").unwrap();
        fs::write(temp_path_for(dir.path(), VECTORIZER_FILE), "partial").unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        ArtifactBundle::remove_files(dir.path()).unwrap();

        assert!(!dir.path().join(LABELS_FILE).exists());
        assert!(!temp_path_for(dir.path(), VECTORIZER_FILE).exists());
        assert!(dir.path().join("notes.txt").exists());
    }
}
