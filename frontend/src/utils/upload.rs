use gloo_file::{futures::read_as_bytes, Blob};
use leptos::ev::Event;
use leptos::event_target;
use thiserror::Error;
use web_sys::HtmlInputElement;

use crate::api::UploadFile;

pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls"];
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("请选择文件")]
    NoFile,
    #[error("只支持 {0} 格式的文件")]
    UnsupportedType(String),
    #[error("读取文件失败: {0}")]
    Read(String),
}

/// Case-insensitive extension check.
pub fn has_extension(name: &str, allowed: &[&str]) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

pub fn check_extension(name: &str, allowed: &[&str]) -> Result<(), UploadError> {
    if has_extension(name, allowed) {
        Ok(())
    } else {
        let listed = allowed
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join("/");
        Err(UploadError::UnsupportedType(listed))
    }
}

/// Takes the selected file from a file input and clears the input so the
/// same file can be picked again.
pub fn take_selected_file(ev: &Event) -> Option<web_sys::File> {
    let input = event_target::<HtmlInputElement>(ev);
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}

pub async fn read_upload(file: web_sys::File) -> Result<UploadFile, UploadError> {
    let name = file.name();
    let mime = Some(file.type_()).filter(|mime| !mime.is_empty());
    let blob = Blob::from(file);
    let bytes = read_as_bytes(&blob)
        .await
        .map_err(|err| UploadError::Read(err.to_string()))?;
    Ok(UploadFile { name, mime, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_extension("员工.XLSX", SPREADSHEET_EXTENSIONS));
        assert!(has_extension("a.b.csv", CSV_EXTENSIONS));
        assert!(!has_extension("schedule", CSV_EXTENSIONS));
        assert!(!has_extension("data.txt", SPREADSHEET_EXTENSIONS));
    }

    #[test]
    fn unsupported_type_lists_allowed_extensions() {
        let err = check_extension("x.pdf", SPREADSHEET_EXTENSIONS).unwrap_err();
        assert_eq!(err.to_string(), "只支持 .xlsx/.xls 格式的文件");
    }
}
