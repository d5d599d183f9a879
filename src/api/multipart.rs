use reqwest::multipart::{Form, Part};

use crate::portfolio::uploader::LocalFile;

/// Multipart body assembled field by field, inspectable before it is
/// turned into a `reqwest` form.
#[derive(Debug, Clone, Default)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
    files: Vec<(String, LocalFile)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, file: LocalFile) -> Self {
        self.files.push((name.to_string(), file));
        self
    }

    pub fn files(mut self, name: &str, files: impl IntoIterator<Item = LocalFile>) -> Self {
        for file in files {
            self.files.push((name.to_string(), file));
        }
        self
    }

    /// First text value under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    pub fn text_fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn file_names(&self, name: &str) -> Vec<&str> {
        self.files
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, f)| f.file_name.as_str())
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn into_form(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for (name, file) in self.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime)?;
            form = form.part(name, part);
        }
        Ok(form)
    }
}
