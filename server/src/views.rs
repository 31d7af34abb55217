//! HTML views rendered with handlebars.
//!
//! Templates are compiled into the binary. Handlebars HTML-escapes every
//! `{{value}}`, so filenames and codes are safe to interpolate.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

use crate::models::LicenseEntry;

const NOT_FOUND: &str = "Not Found";

pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("index", include_str!("../templates/index.hbs"))?;
        handlebars.register_template_string("project", include_str!("../templates/project.hbs"))?;
        Ok(Self { handlebars })
    }

    pub fn render_index(&self, projects: &[String]) -> Result<String, RenderError> {
        let view = IndexView {
            projects: projects
                .iter()
                .map(|name| ProjectLink {
                    name: name.clone(),
                    href: format!("/project/{}", urlencoding::encode(name)),
                })
                .collect(),
        };
        self.handlebars.render("index", &view)
    }

    pub fn render_project(
        &self,
        project: &str,
        entries: &[LicenseEntry],
    ) -> Result<String, RenderError> {
        let base = format!("/project/{}", urlencoding::encode(project));
        let view = ProjectView {
            project: project.to_string(),
            upload_url: format!("{}/upload", base),
            licenses: entries
                .iter()
                .map(|entry| LicenseRow::new(&base, entry))
                .collect(),
        };
        self.handlebars.render("project", &view)
    }
}

#[derive(Serialize)]
struct IndexView {
    projects: Vec<ProjectLink>,
}

#[derive(Serialize)]
struct ProjectLink {
    name: String,
    href: String,
}

#[derive(Serialize)]
struct ProjectView {
    project: String,
    upload_url: String,
    licenses: Vec<LicenseRow>,
}

#[derive(Serialize)]
struct LicenseRow {
    filename: String,
    code: String,
    expiration: String,
    keyword: String,
    download_url: String,
    delete_url: String,
}

impl LicenseRow {
    fn new(base: &str, entry: &LicenseEntry) -> Self {
        let encoded = urlencoding::encode(&entry.filename);
        Self {
            filename: entry.filename.clone(),
            code: entry
                .info
                .code
                .clone()
                .unwrap_or_else(|| NOT_FOUND.to_string()),
            expiration: entry
                .info
                .expiration
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            keyword: entry
                .info
                .keyword
                .map(|keyword| keyword.to_string())
                .unwrap_or_default(),
            download_url: format!("{}/download/{}", base, encoded),
            delete_url: format!("{}/delete/{}", base, encoded),
        }
    }
}
