use crate::error::DocumentError;
use crate::models::question::SourceItem;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 一个已解析的源文档
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub items: Vec<SourceItem>,
}

impl Document {
    /// 文件名（用于日志）
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// 从 JSON 文件加载数据并转换为 Document 对象
pub async fn load_document(json_file_path: &Path) -> Result<Document, DocumentError> {
    let content = match fs::read_to_string(json_file_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DocumentError::NotFound {
                path: json_file_path.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(DocumentError::Read {
                path: json_file_path.to_path_buf(),
                source: e,
            })
        }
    };

    let items: Vec<SourceItem> =
        serde_json::from_str(&content).map_err(|e| DocumentError::Parse {
            path: json_file_path.to_path_buf(),
            source: e,
        })?;

    Ok(Document {
        path: json_file_path.to_path_buf(),
        items,
    })
}

/// 列出文件夹中所有 JSON 文件，按文件名字典序排列
///
/// 更新文件以日期开头，字典序即时间顺序。文件夹不存在时返回空列表；
/// 存在但无法读取时返回 `DocumentError::Read`。
pub async fn list_documents(folder: &Path) -> Result<Vec<PathBuf>, DocumentError> {
    let read_failed = |e| DocumentError::Read {
        path: folder.to_path_buf(),
        source: e,
    };

    let mut entries = match fs::read_dir(folder).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("⚠️ 文件夹不存在: {}", folder.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(read_failed(e)),
    };

    let mut paths = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_failed)? {
        let path = entry.path();
        let is_file = entry.file_type().await.map_err(read_failed)?.is_file();
        if is_file && path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}
