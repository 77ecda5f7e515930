use crate::error::SpecLoadError;
use crate::models::spec::SpecGroup;
use std::fs;
use std::path::{Path, PathBuf};

/// 从 TOML 文件加载一个类别的题目规格
pub fn load_spec_group(toml_file_path: &Path) -> Result<SpecGroup, SpecLoadError> {
    let content = fs::read_to_string(toml_file_path).map_err(|source| SpecLoadError::ReadFailed {
        path: toml_file_path.to_path_buf(),
        source,
    })?;

    let group: SpecGroup =
        toml::from_str(&content).map_err(|source| SpecLoadError::TomlParseFailed {
            path: toml_file_path.to_path_buf(),
            source,
        })?;

    Ok(group.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有 TOML 规格文件，按文件名排序
///
/// 任何一个文件加载失败都会中止，不会带着缺失的类别继续生成
pub fn load_all_spec_groups(folder_path: &Path) -> Result<Vec<SpecGroup>, SpecLoadError> {
    if !folder_path.is_dir() {
        return Err(SpecLoadError::DirectoryNotFound {
            path: folder_path.to_path_buf(),
        });
    }

    let entries = fs::read_dir(folder_path).map_err(|source| SpecLoadError::ReadFailed {
        path: folder_path.to_path_buf(),
        source,
    })?;

    let mut toml_files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SpecLoadError::ReadFailed {
            path: folder_path.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    if toml_files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到 TOML 文件", folder_path.display());
    }

    let mut groups = Vec::with_capacity(toml_files.len());
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        let group = load_spec_group(&path)?;
        tracing::info!("成功加载 [{}] {} 个题目规格", group.category, group.questions.len());
        groups.push(group);
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
category = "Psicologia"

[[questions]]
question = "Qual golpe é comum em sites de terapia online falsos?"
correct = "Cobrança por sessões com profissionais inexistentes"
distractors = ["Terapeutas certificados", "Sigilo garantido", "Plano personalizado"]
tip = "Verifique o registro do profissional."
interests = ["Psicologia", "Tecnologia"]
"#;

    #[test]
    fn loads_group_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("psicologia.toml");
        fs::write(&path, SAMPLE).unwrap();

        let group = load_spec_group(&path).unwrap();
        assert_eq!(group.category, "Psicologia");
        assert_eq!(group.questions.len(), 1);
        assert_eq!(group.questions[0].distractors.len(), 3);
        assert!(group.file_path.is_some());
    }

    #[test]
    fn loads_folder_in_name_order_and_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.toml"), "category = \"B\"\n").unwrap();
        fs::write(dir.path().join("a.toml"), "category = \"A\"\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let groups = load_all_spec_groups(dir.path()).unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(groups[0].questions.is_empty());
    }

    #[test]
    fn broken_file_aborts_loading() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.toml"), SAMPLE).unwrap();
        fs::write(dir.path().join("b.toml"), "category = ").unwrap();

        let err = load_all_spec_groups(dir.path()).unwrap_err();
        assert!(matches!(err, SpecLoadError::TomlParseFailed { .. }));
    }

    #[test]
    fn missing_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_all_spec_groups(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SpecLoadError::DirectoryNotFound { .. }));
    }
}
