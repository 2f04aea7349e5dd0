use std::path::{Path, PathBuf};

use super::outcome::{AddedQuestion, Outcome, Reconciled, UpdatedQuestion};

/// 处理过程中记录的一条说明（无效题目、等级降级、文档失败）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingNote {
    pub document: PathBuf,
    pub message: String,
}

impl std::fmt::Display for ProcessingNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.document.file_name().unwrap_or_default().to_string_lossy();
        write!(f, "[{}] {}", name, self.message)
    }
}

/// 单个文档的处理汇总
#[derive(Debug, Clone, Default)]
pub struct DocumentSummary {
    pub path: PathBuf,
    pub added: Vec<AddedQuestion>,
    pub updated: Vec<UpdatedQuestion>,
    pub skipped: usize,
    pub invalid: usize,
    pub notes: Vec<ProcessingNote>,
}

impl DocumentSummary {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            ..Default::default()
        }
    }

    /// 按结果类型归档一道题
    pub fn record(&mut self, question: &str, reconciled: Reconciled) {
        if let Some(coercion) = reconciled.coercion {
            self.note(coercion.to_string());
        }

        match reconciled.outcome {
            Outcome::Added(added) => self.added.push(added),
            Outcome::Updated(updated) => self.updated.push(updated),
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Invalid(reason) => {
                self.invalid += 1;
                self.note(format!("question '{}' skipped: {}", question, reason));
            }
        }
    }

    fn note(&mut self, message: String) {
        self.notes.push(ProcessingNote {
            document: self.path.clone(),
            message,
        });
    }
}

/// 整个运行的汇总
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub added: Vec<AddedQuestion>,
    pub updated: Vec<UpdatedQuestion>,
    pub skipped: usize,
    pub invalid: usize,
    pub documents_processed: usize,
    pub failed_documents: Vec<ProcessingNote>,
    pub notes: Vec<ProcessingNote>,
    pub bootstrap_user_created: bool,
}

impl RunSummary {
    /// 合并一个文档的结果
    pub fn absorb(&mut self, document: DocumentSummary) {
        self.documents_processed += 1;
        self.added.extend(document.added);
        self.updated.extend(document.updated);
        self.skipped += document.skipped;
        self.invalid += document.invalid;
        self.notes.extend(document.notes);
    }

    /// 记录一个整体失败、没有任何贡献的文档
    pub fn record_failed_document(&mut self, path: &Path, reason: impl std::fmt::Display) {
        self.failed_documents.push(ProcessingNote {
            document: path.to_path_buf(),
            message: reason.to_string(),
        });
    }

    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::outcome::{LevelCoercion, SkipReason};
    use crate::models::{Level, RawLevel};

    fn added(text: &str) -> Reconciled {
        Reconciled {
            outcome: Outcome::Added(AddedQuestion {
                text: text.to_string(),
                level: Level::Ten,
                answer_count: 2,
                correct_answer: "a".to_string(),
            }),
            coercion: None,
        }
    }

    #[test]
    fn record_partitions_outcomes() {
        let mut doc = DocumentSummary::new(Path::new("seeds/initial/a.json"));
        doc.record("q1", added("q1"));
        doc.record(
            "q2",
            Reconciled {
                outcome: Outcome::Skipped(SkipReason::AlreadyExists),
                coercion: Some(LevelCoercion {
                    question: "q2".to_string(),
                    raw: RawLevel::Number(7),
                }),
            },
        );
        doc.record(
            "q3",
            Reconciled {
                outcome: Outcome::Invalid(ValidationError::NoCorrectAnswer),
                coercion: None,
            },
        );

        assert_eq!(doc.added.len(), 1);
        assert_eq!(doc.skipped, 1);
        assert_eq!(doc.invalid, 1);
        assert_eq!(doc.notes.len(), 2);
        assert_eq!(
            doc.notes[1].to_string(),
            "[a.json] question 'q3' skipped: no correct answer"
        );
    }

    #[test]
    fn absorb_accumulates_across_documents() {
        let mut run = RunSummary::default();
        assert!(!run.has_changes());

        let mut first = DocumentSummary::new(Path::new("a.json"));
        first.record("q1", added("q1"));
        let mut second = DocumentSummary::new(Path::new("b.json"));
        second.record("q2", added("q2"));

        run.absorb(first);
        run.absorb(second);
        run.record_failed_document(Path::new("c.json"), "JSON解析失败");

        assert_eq!(run.documents_processed, 2);
        assert_eq!(run.added.len(), 2);
        assert_eq!(run.failed_documents.len(), 1);
        assert!(run.has_changes());
    }
}
